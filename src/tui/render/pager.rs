use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::color::ObjectKind;
use crate::tui::app::App;

/// Render the task info pager over the list area
pub fn render_pager(frame: &mut Frame, app: &App, area: Rect) {
    let Some(pager) = &app.pager else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(pager.title.as_str())
        .title_style(app.colors.style(ObjectKind::Header, None, false));
    let lines: Vec<Line> = pager
        .lines
        .iter()
        .skip(pager.scroll)
        .map(|l| Line::raw(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
