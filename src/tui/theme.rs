use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::registry::{Registry, Rgb};
use crate::model::task::status;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub grid_line: Color,
    pub now_line: Color,
    pub hover_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x10, 0x18),
            text: Color::Rgb(0xC8, 0xC8, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x41, 0x87, 0xFA),
            dim: Color::Rgb(0x6A, 0x6A, 0x80),
            red: Color::Rgb(0xE8, 0x4C, 0x4C),
            yellow: Color::Rgb(0xFF, 0xC6, 0x3C),
            green: Color::Rgb(0x3C, 0xC8, 0x78),
            selection_bg: Color::Rgb(0x2A, 0x2A, 0x46),
            grid_line: Color::Rgb(0x30, 0x30, 0x44),
            now_line: Color::Rgb(0xE8, 0x4C, 0x4C),
            hover_border: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    Rgb::parse_hex(hex).map(rgb_to_color)
}

pub fn rgb_to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

impl Theme {
    /// Create a theme from the data-dir config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "grid_line" => theme.grid_line = color,
                    "now_line" => theme.now_line = color,
                    "hover_border" => theme.hover_border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Registry color for a project card
    pub fn project_color(&self, registry: &Registry, project: &str) -> Color {
        rgb_to_color(registry.project_color(project))
    }

    /// Registry color for a priority marker
    pub fn priority_color(&self, registry: &Registry, priority: &str) -> Color {
        rgb_to_color(registry.priority_color(priority))
    }

    /// Color for a status name in the list view
    pub fn status_color(&self, s: &str) -> Color {
        match s {
            status::DONE => self.dim,
            status::OVERDUE => self.red,
            status::IN_PROGRESS => self.highlight,
            status::POSTPONED => self.yellow,
            _ => self.text,
        }
    }
}
