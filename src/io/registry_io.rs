use std::fs;
use std::path::{Path, PathBuf};

use crate::io::paths::registry_path;
use crate::model::registry::Registry;

#[derive(Debug, thiserror::Error)]
pub enum RegistryIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize registry: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Load registry.json merged over the built-in defaults, so system entries
/// are always present even if the file predates them.
pub fn load_registry(data_dir: &Path) -> Result<Registry, RegistryIoError> {
    let path = registry_path(data_dir);
    let mut registry = Registry::default();
    if !path.exists() {
        return Ok(registry);
    }
    let content = fs::read_to_string(&path).map_err(|e| RegistryIoError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let loaded: Registry =
        serde_json::from_str(&content).map_err(|e| RegistryIoError::ParseError { path, source: e })?;
    registry.merge_loaded(loaded);
    Ok(registry)
}

pub fn save_registry(data_dir: &Path, registry: &Registry) -> Result<(), RegistryIoError> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(registry)?;
    fs::write(registry_path(data_dir), content)?;
    Ok(())
}
