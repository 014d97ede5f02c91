use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::task_cmd::TaskTool;
use crate::model::{Config, Record};
use crate::tui::app::App;

/// A task binary that does not exist, so any accidental call fails fast.
pub const MISSING_TASK_BIN: &str = "/nonexistent/tasknc-test/task";

/// Render into an in-memory buffer and return it.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A pending task with no dates or priority.
pub fn record(uuid: &str, description: &str, project: Option<&str>) -> Record {
    let mut record = Record::new(uuid, description);
    record.project = project.map(String::from);
    record
}

/// An app over `records` with default config. The task tool is never run.
pub fn app_with_records(records: Vec<Record>) -> App {
    let mut app = App::new(&Config::default(), TaskTool::new(MISSING_TASK_BIN));
    app.set_records(records);
    app.refresh_vars();
    app
}

/// Replace both line formats.
pub fn set_formats(app: &mut App, title: &str, task: &str) {
    app.title_format = title.to_string();
    app.task_format = task.to_string();
    app.recompile_templates();
}
