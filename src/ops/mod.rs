pub mod command;
pub mod search;
pub mod sort;
