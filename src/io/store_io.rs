use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::io::paths::tasks_path;
use crate::model::task::Task;

/// Error type for task persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreIoError {
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
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Load tasks.json from the data directory. A missing file is an empty
/// collection, not an error.
pub fn load_tasks(data_dir: &Path) -> Result<Vec<Task>, StoreIoError> {
    let path = tasks_path(data_dir);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(&path).map_err(|e| StoreIoError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StoreIoError::ParseError { path, source: e })
}

/// Write tasks.json atomically: serialize to a temp file in the same
/// directory, then rename over the target.
pub fn save_tasks(data_dir: &Path, tasks: &[Task]) -> Result<(), StoreIoError> {
    fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(tasks)?;
    let mut tmp = NamedTempFile::new_in(data_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(tasks_path(data_dir))
        .map_err(|e| StoreIoError::IoError(e.error))?;
    Ok(())
}
