pub mod app;
pub mod input;
pub mod keys;
pub mod render;

pub use app::run;
