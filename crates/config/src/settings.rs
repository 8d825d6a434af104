// Application settings
// Loaded from ~/.config/seatplan/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use seatplan_engine::grid::{validate_dimensions, DEFAULT_COLS, DEFAULT_ROWS};
use seatplan_engine::history::DEFAULT_MAX_ENTRIES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Layout used by `init` and by a fresh data file
    #[serde(rename = "layout.defaultRows")]
    pub default_rows: usize,

    #[serde(rename = "layout.defaultCols")]
    pub default_cols: usize,

    // Display
    #[serde(rename = "display.showCoordinates")]
    pub show_coordinates: bool,

    // Import
    #[serde(rename = "import.overwriteExisting")]
    pub overwrite_existing: bool,

    // History
    #[serde(rename = "history.maxEntries")]
    pub max_history: Option<usize>, // None = unbounded

    // Storage
    #[serde(rename = "storage.dataFile")]
    pub data_file: Option<PathBuf>, // None = platform data dir
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
            show_coordinates: true,
            overwrite_existing: false,
            max_history: Some(DEFAULT_MAX_ENTRIES),
            data_file: None,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seatplan");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from an explicit file. Missing or unreadable files
    /// yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings text. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Self {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        match serde_json::from_str::<Settings>(&cleaned) {
            Ok(settings) => settings.validated(),
            Err(e) => {
                log::warn!("Error parsing settings.json: {}", e);
                log::warn!("Using default settings");
                Self::default()
            }
        }
    }

    /// Replace a default layout outside the allowed bounds.
    fn validated(mut self) -> Self {
        if let Err(e) = validate_dimensions(self.default_rows, self.default_cols) {
            log::warn!("settings: {e}; using {DEFAULT_ROWS}x{DEFAULT_COLS}");
            self.default_rows = DEFAULT_ROWS;
            self.default_cols = DEFAULT_COLS;
        }
        self
    }

    /// Where the classroom is stored unless `--file` overrides it.
    pub fn data_file(&self) -> PathBuf {
        match &self.data_file {
            Some(path) => path.clone(),
            None => Self::data_dir().join("classroom.seatplan"),
        }
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seatplan")
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Classroom size for `seatplan init` (rows 1-15, columns 1-12)
    "layout.defaultRows": 8,
    "layout.defaultCols": 6,

    // Show row/column labels on seats
    "display.showCoordinates": true,

    // Roster import: update students whose name already exists
    "import.overwriteExisting": false,

    // Undo depth, null = unbounded
    "history.maxEntries": 100,

    // Classroom data file, null = platform data directory
    "storage.dataFile": null
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}
