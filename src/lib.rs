pub mod cli;
pub mod color;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod template;
pub mod tui;
pub mod util;
