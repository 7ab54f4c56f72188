use std::fs;
use std::path::{Path, PathBuf};

use crate::io::paths::config_path;
use crate::model::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load config.toml, falling back to defaults when the file is absent.
/// The config is hand-edited; daybook never writes it.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.day.zoom, 2);
    }

    #[test]
    fn reads_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            config_path(dir.path()),
            "[day]\nmin_col_width = 20\n\n[ui.colors]\nbackground = \"#101010\"\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.day.min_col_width, 20);
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(config_path(dir.path()), "[day\n").unwrap();
        assert!(load_config(dir.path()).is_err());
    }
}
