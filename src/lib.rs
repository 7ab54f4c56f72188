pub mod cli;
pub mod filter;
pub mod io;
pub mod layout;
pub mod model;
pub mod ops;
pub mod store;
pub mod tui;
pub mod util;
