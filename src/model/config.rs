use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub day: DayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Day-view tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConfig {
    /// Minimum column width in cells
    #[serde(default = "default_min_col_width")]
    pub min_col_width: i32,
    /// Rectangles shorter than this many cells are not rendered
    #[serde(default = "default_min_visible_height")]
    pub min_visible_height: i32,
    /// Cells per hour row (1, 2, or 4)
    #[serde(default = "default_zoom")]
    pub zoom: u16,
}

impl Default for DayConfig {
    fn default() -> Self {
        DayConfig {
            min_col_width: default_min_col_width(),
            min_visible_height: default_min_visible_height(),
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides: name -> "#RRGGBB" (see tui::theme for names)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

fn default_min_col_width() -> i32 {
    12
}

fn default_min_visible_height() -> i32 {
    1
}

fn default_zoom() -> u16 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.day.min_col_width, 12);
        assert_eq!(config.day.min_visible_height, 1);
        assert_eq!(config.day.zoom, 2);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_day_section_fills_rest() {
        let config: AppConfig = toml::from_str("[day]\nzoom = 4\n").unwrap();
        assert_eq!(config.day.zoom, 4);
        assert_eq!(config.day.min_col_width, 12);
    }
}
