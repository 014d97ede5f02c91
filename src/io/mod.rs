pub mod config_io;
pub mod export;
pub mod task_cmd;
