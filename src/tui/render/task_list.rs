use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::template::RenderContext;
use crate::tui::app::App;

use super::pad_to;

/// Render the visible slice of the task list, one colored line per task.
/// The scroll offset must already fit `area` (see [`App::adjust_scroll`]).
pub fn render_task_list(frame: &mut Frame, app: &App, ctx: &RenderContext, area: Rect) {
    let height = area.height as usize;
    let width = area.width as usize;

    let end = app.store.len().min(app.scroll_offset + height);
    let lines: Vec<Line> = (app.scroll_offset..end)
        .filter_map(|idx| app.task_line(ctx, idx, width))
        .map(|(text, style)| Line::styled(pad_to(text, width), style))
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
