use std::path::{Path, PathBuf};

/// File names inside the data directory.
pub const TASKS_FILE: &str = "tasks.json";
pub const REGISTRY_FILE: &str = "registry.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const STATE_FILE: &str = ".state.json";
pub const LOCK_FILE: &str = ".lock";

/// Resolve the data directory: an explicit `-C` override wins, otherwise the
/// platform data dir (e.g. ~/.local/share/daybook).
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook"),
    }
}

pub fn tasks_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TASKS_FILE)
}

pub fn registry_path(data_dir: &Path) -> PathBuf {
    data_dir.join(REGISTRY_FILE)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

pub fn state_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STATE_FILE)
}
