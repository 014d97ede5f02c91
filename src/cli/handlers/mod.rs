mod init;
pub use init::{CONFIG_TEMPLATE, cmd_init};

use std::io::Write;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::task_cmd::TaskTool;
use crate::model::Config;
use crate::tui::app::App;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        None => crate::tui::run(config),
        Some(Commands::Init(args)) => cmd_init(cli.config.as_deref(), args),
        Some(Commands::Print(args)) => cmd_print(config, args, json),
    }
}

// ---------------------------------------------------------------------------
// Print
// ---------------------------------------------------------------------------

fn cmd_print(config: &Config, args: PrintArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let lines = render_print(config, &args, json)?;
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}

/// Export, sort and render the task list the way the UI would draw it.
/// Returns the output lines (a single JSON document when `json` is set).
pub fn render_print(
    config: &Config,
    args: &PrintArgs,
    json: bool,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut app = App::new(config, TaskTool::new(config.general.task_bin.clone()));
    if let Some(filter) = &args.filter {
        app.filter = filter.clone();
    }
    if let Some(sort) = &args.sort {
        app.sort = sort.clone();
    }
    if let Ok(version) = app.tool.version() {
        app.task_version = version;
    }
    app.try_reload()?;
    app.refresh_vars();

    let ctx = app.render_context();
    let task_lines = (0..app.store.len())
        .filter_map(|idx| app.task_line(&ctx, idx, args.width))
        .map(|(text, _)| text.trim_end().to_string());

    if json {
        let records: Vec<RecordJson> = app
            .store
            .iter()
            .zip(task_lines)
            .map(|(record, line)| RecordJson::new(record, line))
            .collect();
        return Ok(vec![serde_json::to_string_pretty(&records)?]);
    }

    let (title, _) = app.title_line(&ctx, args.width);
    let mut out = vec![title.trim_end().to_string()];
    out.extend(task_lines);
    Ok(out)
}
