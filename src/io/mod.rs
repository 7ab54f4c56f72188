pub mod config_io;
pub mod lock;
pub mod paths;
pub mod registry_io;
pub mod state;
pub mod store_io;
pub mod watcher;
