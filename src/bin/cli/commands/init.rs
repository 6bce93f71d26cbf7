use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, catalog_dir: Option<PathBuf>, format: &OutputFormat) -> Result<()> {
    let catalog_dir = catalog_dir
        .or_else(|| app.state.settings.catalog_dir.clone())
        .context("No catalog directory given. Pass --catalog-dir <dir with hsk-1.json .. hsk-6.json>.")?;

    let loaded = app
        .state
        .load_catalog(&catalog_dir)
        .with_context(|| format!("Failed to load catalog from {}", catalog_dir.display()))?;
    let total = app.state.catalog.count();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "loaded": loaded,
                "total": total,
                "catalogDir": catalog_dir.to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if loaded == 0 {
                println!("Catalog already loaded ({} words).", total);
            } else {
                println!("Loaded {} words from {}.", loaded, catalog_dir.display());
            }
        }
    }

    Ok(())
}
