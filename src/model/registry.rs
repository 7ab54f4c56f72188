use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::task::status;

/// An RGB color as stored in registry.json and mapped to terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse "#RRGGBB" (leading '#' optional)
    pub fn parse_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        // Length is in bytes; slicing below needs all-ASCII input anyway
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }
}

/// Fallback color for unknown projects/priorities.
pub const FALLBACK_COLOR: Rgb = Rgb::new(100, 100, 100);

/// Registry of user-definable projects, statuses, and priorities.
///
/// Projects and priorities carry a display color. "System" entries ship as
/// defaults and cannot be removed; everything else is user CRUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub projects: IndexMap<String, Rgb>,
    pub statuses: Vec<String>,
    pub priorities: IndexMap<String, Rgb>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut projects = IndexMap::new();
        projects.insert("Work".to_string(), Rgb::new(65, 135, 250));
        projects.insert("Study".to_string(), Rgb::new(255, 170, 0));
        projects.insert("Home".to_string(), Rgb::new(60, 200, 120));
        projects.insert("General".to_string(), Rgb::new(100, 100, 100));

        let statuses = vec![
            status::NOT_STARTED.to_string(),
            status::IN_PROGRESS.to_string(),
            status::DONE.to_string(),
            status::POSTPONED.to_string(),
            status::OVERDUE.to_string(),
        ];

        let mut priorities = IndexMap::new();
        priorities.insert("Low".to_string(), Rgb::new(0, 200, 0));
        priorities.insert("Medium".to_string(), Rgb::new(230, 200, 0));
        priorities.insert("High".to_string(), Rgb::new(220, 40, 40));

        Registry {
            projects,
            statuses,
            priorities,
        }
    }
}

const SYSTEM_PROJECTS: &[&str] = &["General"];
const SYSTEM_PRIORITIES: &[&str] = &["Medium"];

impl Registry {
    /// Merge loaded data over the defaults: loaded projects/priorities
    /// override or extend, unknown statuses are appended.
    pub fn merge_loaded(&mut self, loaded: Registry) {
        for (name, color) in loaded.projects {
            self.projects.insert(name, color);
        }
        for status in loaded.statuses {
            if !self.statuses.contains(&status) {
                self.statuses.push(status);
            }
        }
        for (name, color) in loaded.priorities {
            self.priorities.insert(name, color);
        }
    }

    pub fn project_color(&self, name: &str) -> Rgb {
        self.projects.get(name).copied().unwrap_or(FALLBACK_COLOR)
    }

    pub fn priority_color(&self, name: &str) -> Rgb {
        self.priorities.get(name).copied().unwrap_or(FALLBACK_COLOR)
    }

    pub fn is_system_project(&self, name: &str) -> bool {
        SYSTEM_PROJECTS.contains(&name)
    }

    pub fn is_system_status(&self, name: &str) -> bool {
        [
            status::NOT_STARTED,
            status::IN_PROGRESS,
            status::DONE,
            status::POSTPONED,
            status::OVERDUE,
        ]
        .contains(&name)
    }

    pub fn is_system_priority(&self, name: &str) -> bool {
        SYSTEM_PRIORITIES.contains(&name)
    }

    /// Rejects empty names and duplicates.
    pub fn add_project(&mut self, name: &str, color: Rgb) -> bool {
        if name.is_empty() || self.projects.contains_key(name) {
            return false;
        }
        self.projects.insert(name.to_string(), color);
        true
    }

    pub fn add_status(&mut self, name: &str) -> bool {
        if name.is_empty() || self.statuses.iter().any(|s| s == name) {
            return false;
        }
        self.statuses.push(name.to_string());
        true
    }

    pub fn add_priority(&mut self, name: &str, color: Rgb) -> bool {
        if name.is_empty() || self.priorities.contains_key(name) {
            return false;
        }
        self.priorities.insert(name.to_string(), color);
        true
    }

    /// Rejects unknown names and system entries.
    pub fn remove_project(&mut self, name: &str) -> bool {
        if !self.projects.contains_key(name) || self.is_system_project(name) {
            return false;
        }
        self.projects.shift_remove(name);
        true
    }

    pub fn remove_status(&mut self, name: &str) -> bool {
        if !self.statuses.iter().any(|s| s == name) || self.is_system_status(name) {
            return false;
        }
        self.statuses.retain(|s| s != name);
        true
    }

    pub fn remove_priority(&mut self, name: &str) -> bool {
        if !self.priorities.contains_key(name) || self.is_system_priority(name) {
            return false;
        }
        self.priorities.shift_remove(name);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_system_entries() {
        let reg = Registry::default();
        assert!(reg.projects.contains_key("General"));
        assert_eq!(reg.statuses.len(), 5);
        assert!(reg.priorities.contains_key("Medium"));
    }

    #[test]
    fn add_rejects_duplicates_and_empty() {
        let mut reg = Registry::default();
        assert!(!reg.add_project("Work", Rgb::new(1, 2, 3)));
        assert!(!reg.add_project("", Rgb::new(1, 2, 3)));
        assert!(reg.add_project("Side", Rgb::new(1, 2, 3)));
        assert!(!reg.add_status("Done"));
        assert!(reg.add_status("Waiting"));
    }

    #[test]
    fn system_entries_cannot_be_removed() {
        let mut reg = Registry::default();
        assert!(!reg.remove_project("General"));
        assert!(!reg.remove_status("Done"));
        assert!(!reg.remove_priority("Medium"));
        assert!(reg.remove_project("Work"));
        assert!(reg.remove_priority("High"));
    }

    #[test]
    fn merge_extends_without_duplicating_statuses() {
        let mut reg = Registry::default();
        let mut loaded = Registry::default();
        loaded.add_status("Waiting");
        loaded.add_project("Side", Rgb::new(9, 9, 9));
        reg.merge_loaded(loaded);
        assert_eq!(reg.statuses.iter().filter(|s| *s == "Done").count(), 1);
        assert!(reg.statuses.iter().any(|s| s == "Waiting"));
        assert_eq!(reg.project_color("Side"), Rgb::new(9, 9, 9));
    }

    #[test]
    fn unknown_names_fall_back() {
        let reg = Registry::default();
        assert_eq!(reg.project_color("Nope"), FALLBACK_COLOR);
    }

    #[test]
    fn parse_hex_colors() {
        assert_eq!(Rgb::parse_hex("#FF0080"), Some(Rgb::new(255, 0, 128)));
        assert_eq!(Rgb::parse_hex("4187fa"), Some(Rgb::new(65, 135, 250)));
        assert_eq!(Rgb::parse_hex("#FFF"), None);
        assert_eq!(Rgb::parse_hex("not-a-color"), None);
        // 6 bytes but not 6 ASCII digits; must not panic on the slice
        assert_eq!(Rgb::parse_hex("\u{20ac}abc"), None);
    }
}
