use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use clmandarin_lib::transfer::{export_list, import_files, write_export};

use crate::app::App;
use crate::OutputFormat;

pub fn run_export(app: &App, query: &str, out: Option<PathBuf>, format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    let dir = match out.or_else(|| app.state.settings.export_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let file = export_list(&list, &app.state.catalog);
    let path = write_export(&dir, &file)
        .with_context(|| format!("Failed to export \"{}\" to {}", list.name, dir.display()))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": path.to_string_lossy(),
                "listId": list.id,
                "words": file.words.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Exported \"{}\" ({} words) to {}", list.name, file.words.len(), path.display());
        }
    }
    Ok(())
}

pub fn run_import(app: &mut App, files: &[PathBuf], format: &OutputFormat) -> Result<()> {
    let state = &mut app.state;
    let report = import_files(files, &state.lists, &mut state.catalog);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "imported": report.imported,
                "errors": report.errors,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} of {} files", report.imported, files.len());
            for error in &report.errors {
                eprintln!("  {}", error);
            }
        }
    }

    if report.imported == 0 && !report.is_clean() {
        bail!("No files were imported");
    }
    Ok(())
}
