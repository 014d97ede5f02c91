use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tasknc", about = concat!("tasknc v", env!("CARGO_PKG_VERSION"), " - a terminal dashboard for taskwarrior"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: <config dir>/tasknc/config.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the configured or default log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented default config file
    Init(InitArgs),
    /// Print the task list to stdout
    Print(PrintArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct PrintArgs {
    /// Filter passed to task export (default: from config)
    #[arg(long)]
    pub filter: Option<String>,
    /// Sort key sequence, e.g. "drpu" (default: from config)
    #[arg(long)]
    pub sort: Option<String>,
    /// Line width used for `$>` fills
    #[arg(long, default_value_t = 80)]
    pub width: usize,
}
