use std::path::PathBuf;

use clap::Parser;
use tasknc::cli::commands::{Cli, Commands};
use tasknc::cli::handlers;
use tasknc::io::config_io;

fn main() {
    let cli = Cli::parse();

    // Init is handled before the config is read: the file may not exist yet
    if let Some(Commands::Init(args)) = cli.command {
        if let Err(e) = handlers::cmd_init(cli.config.as_deref(), args) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = match config_io::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let log_path: Option<PathBuf> = cli
        .log_file
        .clone()
        .or_else(|| config.general.log_file.clone())
        .or_else(config_io::default_log_path);
    if let Some(path) = log_path
        && let Err(e) = tasknc::logging::init_file_logging(&path, &cli.log_level)
    {
        eprintln!("warning: cannot log to {}: {}", path.display(), e);
    }

    if let Err(e) = handlers::dispatch(cli, &config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
