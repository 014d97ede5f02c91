use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::color::ObjectKind;
use crate::tui::app::App;
use crate::tui::keys::Action;

use super::centered_rect;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let key_style = Style::default().add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = Action::ALL
        .iter()
        .filter_map(|&action| {
            let keys = app.keymap.keys_for(action);
            if keys.is_empty() {
                return None;
            }
            Some(Line::from(vec![
                Span::styled(format!(" {:<14}", keys.join("/")), key_style),
                Span::raw(action.description()),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Key Bindings ")
        .title_style(app.colors.style(ObjectKind::Header, None, false));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
