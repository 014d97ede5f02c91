use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::template::RenderContext;
use crate::tui::app::App;

use super::pad_to;

/// Render the title line (top of screen) in the header color
pub fn render_title_bar(frame: &mut Frame, app: &App, ctx: &RenderContext, area: Rect) {
    let width = area.width as usize;
    let (text, style) = app.title_line(ctx, width);
    let paragraph = Paragraph::new(Line::styled(pad_to(text, width), style));
    frame.render_widget(paragraph, area);
}
