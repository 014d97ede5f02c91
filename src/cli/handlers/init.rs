use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io;

/// Commented config written by `tasknc init`. Every value shown is the
/// built-in default.
pub const CONFIG_TEMPLATE: &str = r##"[general]
# binary used for every task command
task_bin = "task"
# filter passed to `task export`
filter = "status:pending"
# sort keys, tried left to right; uppercase reverses a key
#   n index, p project, d due, r priority, u uuid
sort = "drpu"
# color pairs available to color rules
palette_size = 64
# log_file = "/path/to/tasknc.log"

[format]
# $> pushes the rest of the line to the right edge
title = " $program_name ($selected_line/$task_count) $> $date"
task = " $project $description $> ?$due?$due?$-6priority?"

# --- Colors ---
# Rules are applied after the built-in ones. For tasks the last matching
# rule wins. Predicates: ~p 'project'  ~d 'description'  ~r 'H'  ~t  ~t 'tag'  ~s
#
# [[color]]
# object = "task"
# fg = "yellow"
# bg = "default"
# rule = "~p 'work'"

# --- Keys ---
# Override default bindings: key = action
#
# [keys]
# "J" = "scroll_down"
# "x" = "complete"
"##;

/// Write the default config to `explicit` or the default config path.
pub fn cmd_init(explicit: Option<&Path>, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_io::default_config_path().ok_or("cannot determine config directory")?,
    };

    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, CONFIG_TEMPLATE)?;
    println!("wrote {}", path.display());
    Ok(())
}
