// Application settings
// Loaded from ~/.config/taskgrid/settings.json

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Export
    #[serde(rename = "export.defaultFilename")]
    pub export_default_filename: String,

    #[serde(rename = "export.includeHeaders")]
    pub export_include_headers: bool,

    // History
    #[serde(rename = "history.maxEntries")]
    pub history_max_entries: Option<usize>,  // None = unbounded

    // Presence
    #[serde(rename = "presence.enabled")]
    pub presence_enabled: bool,

    #[serde(rename = "presence.pollIntervalMs")]
    pub presence_poll_interval_ms: u64,

    // Grid appearance
    /// Column key -> width in pixels, applied over the built-in widths
    #[serde(rename = "grid.columnWidths")]
    pub column_widths: BTreeMap<String, f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Export
            export_default_filename: "spreadsheet".to_string(),
            export_include_headers: true,
            // History
            history_max_entries: None,
            // Presence
            presence_enabled: true,
            presence_poll_interval_ms: 5000,
            // Grid
            column_widths: BTreeMap::new(),
        }
    }
}

const DEFAULT_CONFIG: &str = r#"{
    // Export
    "export.defaultFilename": "spreadsheet",
    "export.includeHeaders": true,

    // Undo history (null = unbounded)
    "history.maxEntries": null,

    // Collaborator presence
    "presence.enabled": true,
    "presence.pollIntervalMs": 5000,

    // Grid appearance, e.g. { "jobRequest": 400 } (minimum 60)
    "grid.columnWidths": {}
}
"#;

/// Drop whole-line `//` comments so the rest parses as plain JSON.
fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| !line.trim().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskgrid");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults.
    /// Writes a commented default file on first run.
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            Self::create_default_file(&path);
            return Self::default();
        }

        Self::load_from(&path)
    }

    /// Load settings from `path`. Missing keys take their defaults; a missing
    /// or unparseable file yields `Settings::default()`.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                if path.exists() {
                    log::warn!("Error reading {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }

    /// Parse settings text, tolerating `//` comment lines.
    pub fn parse(contents: &str) -> Result<Self, String> {
        serde_json::from_str(&strip_comments(contents)).map_err(|e| e.to_string())
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    fn create_default_file(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_file_parses_to_defaults() {
        assert_eq!(Settings::parse(DEFAULT_CONFIG).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::parse(
            r#"{
    // keep the last fifty edits
    "history.maxEntries": 50,
    "presence.enabled": false,
    "grid.columnWidths": { "jobRequest": 400, "url": 150.5 }
}"#,
        )
        .unwrap();

        assert_eq!(settings.column_widths.get("jobRequest"), Some(&400.0));
        assert_eq!(settings.column_widths.get("url"), Some(&150.5));

        assert_eq!(settings.history_max_entries, Some(50));
        assert!(!settings.presence_enabled);
        assert_eq!(settings.export_default_filename, "spreadsheet");
        assert_eq!(settings.presence_poll_interval_ms, 5000);
    }

    #[test]
    fn test_unparseable_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempdir().unwrap();
        assert_eq!(
            Settings::load_from(&dir.path().join("absent.json")),
            Settings::default()
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            export_default_filename: "q3-report".to_string(),
            export_include_headers: false,
            history_max_entries: Some(10),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"export.defaultFilename\": \"q3-report\""));
        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        let path = Settings::config_path();
        assert!(path.ends_with("taskgrid/settings.json"));
    }
}
