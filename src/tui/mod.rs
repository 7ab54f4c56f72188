pub mod app;
pub mod grid;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
