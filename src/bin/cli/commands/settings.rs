use std::path::PathBuf;

use anyhow::{Context, Result};

use clmandarin_lib::settings::{settings_path, AppSettings};

use crate::app::App;
use crate::OutputFormat;

/// Changes requested on the command line. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct SettingsChange {
    pub hanzi: Option<bool>,
    pub pinyin: Option<bool>,
    pub english: Option<bool>,
    pub hints: Option<bool>,
    pub search_limit: Option<usize>,
    pub export_dir: Option<PathBuf>,
}

impl SettingsChange {
    fn is_empty(&self) -> bool {
        self.hanzi.is_none()
            && self.pinyin.is_none()
            && self.english.is_none()
            && self.hints.is_none()
            && self.search_limit.is_none()
            && self.export_dir.is_none()
    }

    fn apply(self, settings: &mut AppSettings) {
        if let Some(v) = self.hanzi {
            settings.visibility.hanzi = v;
        }
        if let Some(v) = self.pinyin {
            settings.visibility.pinyin = v;
        }
        if let Some(v) = self.english {
            settings.visibility.english = v;
        }
        if let Some(v) = self.hints {
            settings.show_hints = v;
        }
        if let Some(v) = self.search_limit {
            settings.search_limit = v;
        }
        if let Some(v) = self.export_dir {
            settings.export_dir = Some(v);
        }
    }
}

/// Show the settings, after applying any requested changes
pub fn run(app: &mut App, change: SettingsChange, format: &OutputFormat) -> Result<()> {
    if !change.is_empty() {
        app.state
            .update_settings(|s| change.apply(s))
            .context("Failed to save settings")?;
    }
    let settings = &app.state.settings;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Plain => {
            let on_off = |v: bool| if v { "shown" } else { "hidden" };
            println!("Settings ({})", settings_path(&app.state.data_dir).display());
            println!("  hanzi:        {}", on_off(settings.visibility.hanzi));
            println!("  pinyin:       {}", on_off(settings.visibility.pinyin));
            println!("  english:      {}", on_off(settings.visibility.english));
            println!("  study hints:  {}", on_off(settings.show_hints));
            println!("  search limit: {}", settings.search_limit);
            if let Some(dir) = &settings.catalog_dir {
                println!("  catalog dir:  {}", dir.display());
            }
            if let Some(dir) = &settings.export_dir {
                println!("  export dir:   {}", dir.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_touches_given_fields() {
        let mut settings = AppSettings::default();
        let change = SettingsChange {
            english: Some(false),
            search_limit: Some(10),
            ..Default::default()
        };
        assert!(!change.is_empty());

        change.apply(&mut settings);
        assert!(settings.visibility.hanzi);
        assert!(settings.visibility.pinyin);
        assert!(!settings.visibility.english);
        assert_eq!(settings.search_limit, 10);
        assert!(SettingsChange::default().is_empty());
    }
}
