use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Prompt(kind) => {
            // Keep the tail of long input visible next to the cursor
            let label = kind.label();
            let room = width.saturating_sub(display_width(label) + 1);
            let input = tail_to_width(&app.prompt_input, room);
            Line::from(vec![
                Span::raw(label),
                Span::raw(input),
                Span::raw("\u{258C}"), // ▌ cursor
            ])
        }
        _ => match &app.status {
            Some(msg) => {
                let style = if msg.is_error {
                    app.error_style()
                } else {
                    Style::default()
                };
                Line::from(Span::styled(truncate_to_width(&msg.text, width), style))
            }
            None => Line::default(),
        },
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn tail_to_width(s: &str, width: usize) -> &str {
    let mut start = 0;
    while display_width(&s[start..]) > width {
        match s[start..].chars().next() {
            Some(c) => start += c.len_utf8(),
            None => break,
        }
    }
    &s[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::PromptKind;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    #[test]
    fn prompt_with_cursor() {
        let mut app = app_with_records(vec![]);
        app.open_prompt(PromptKind::Filter, "project:home");
        let output = render_to_string(40, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, "filter: project:home\u{258C}");
    }

    #[test]
    fn long_prompt_shows_tail() {
        let mut app = app_with_records(vec![]);
        app.open_prompt(PromptKind::Command, "set filter abcdefgh");
        let output = render_to_string(10, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, ":abcdefgh\u{258C}");
    }

    #[test]
    fn error_uses_error_color() {
        let mut app = app_with_records(vec![]);
        app.set_error("task failed");
        let buf = render_to_buffer(20, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(buf[(0, 0)].symbol(), "t");
        assert_eq!(buf[(0, 0)].fg, Color::Red);
    }

    #[test]
    fn long_message_is_truncated() {
        let mut app = app_with_records(vec![]);
        app.set_status("a very long status message");
        let output = render_to_string(10, 1, |frame, area| {
            render_status_row(frame, &app, area);
        });
        assert_eq!(output, "a very lo\u{2026}");
    }
}
