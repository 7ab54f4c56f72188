pub mod config;
pub mod registry;
pub mod task;

pub use config::*;
pub use registry::*;
pub use task::*;
