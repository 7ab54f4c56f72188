use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::io::paths::state_path;

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("list", "day")
    pub view: String,
    /// Last selected day-view date
    #[serde(default)]
    pub selected_date: Option<NaiveDate>,
    /// List view cursor position
    #[serde(default)]
    pub list_cursor: usize,
    /// Day view vertical scroll (cells)
    #[serde(default)]
    pub day_scroll: i32,
    /// Day view zoom (cells per hour)
    #[serde(default)]
    pub zoom: Option<u16>,
    /// Last title search
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let path = state_path(data_dir);
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_path(data_dir), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let state = UiState {
            view: "day".into(),
            selected_date: NaiveDate::from_ymd_opt(2026, 5, 2),
            list_cursor: 3,
            day_scroll: 18,
            zoom: Some(4),
            last_search: Some("report".into()),
        };
        write_ui_state(dir.path(), &state).unwrap();
        let loaded = read_ui_state(dir.path()).unwrap();
        assert_eq!(loaded.view, "day");
        assert_eq!(loaded.selected_date, NaiveDate::from_ymd_opt(2026, 5, 2));
        assert_eq!(loaded.day_scroll, 18);
        assert_eq!(loaded.zoom, Some(4));
    }

    #[test]
    fn missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_ui_state(dir.path()).is_none());
    }
}
