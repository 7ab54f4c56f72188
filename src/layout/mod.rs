pub mod day;
pub mod geometry;
pub mod overlay;

pub use day::{LayoutOptions, PositionedTask, layout_day};
pub use geometry::{Rect, RowGeometry, UniformRows};
pub use overlay::ScheduleOverlay;
