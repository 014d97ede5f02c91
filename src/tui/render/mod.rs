pub mod help_overlay;
pub mod pager;
pub mod status_row;
pub mod task_list;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: title (1 row) | task list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    app.adjust_scroll(chunks[1].height as usize);
    let app: &App = app;
    let ctx = app.render_context();

    title_bar::render_title_bar(frame, app, &ctx, chunks[0]);

    if app.mode == Mode::Pager {
        pager::render_pager(frame, app, chunks[1]);
    } else {
        task_list::render_task_list(frame, app, &ctx, chunks[1]);
    }

    if app.mode == Mode::Help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Pad `text` with spaces so a styled row covers the full width
pub(super) fn pad_to(text: String, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let mut text = text;
    text.extend(std::iter::repeat_n(' ', width - len));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;
    use chrono::{Local, TimeZone, Utc};
    use ratatui::style::Color;

    #[test]
    fn full_screen() {
        let mut high = record("a", "water plants", None);
        high.priority = Some(Priority::High);
        let mut app = app_with_records(vec![high, record("b", "pay rent", None)]);
        set_formats(&mut app, "$program_name ($selected_line/$task_count)", "$description$>$priority");

        let output = render_to_string(30, 5, |frame, _| render(frame, &mut app));
        assert_snapshot!(output, @r"
tasknc (1/2)
pay rent
water plants                 H
");
    }

    #[test]
    fn list_scrolls_to_selection() {
        let records = (0..5)
            .map(|i| record(&format!("u{}", i), &format!("t{}", i), None))
            .collect();
        let mut app = app_with_records(records);
        set_formats(&mut app, "$selected_line/$task_count", "$description");
        app.perform(crate::tui::keys::Action::End);
        app.refresh_vars();

        let output = render_to_string(20, 4, |frame, _| render(frame, &mut app));
        assert_snapshot!(output, @r"
5/5
t3
t4
");
        assert_eq!(app.scroll_offset, 3);
    }

    #[test]
    fn row_styles_follow_color_rules() {
        let mut started = record("b", "started", None);
        started.start = Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        let mut app = app_with_records(vec![record("a", "plain", None), started]);

        let buf = render_to_buffer(20, 4, |frame, _| render(frame, &mut app));
        // Header: black on blue
        assert_eq!(buf[(0, 0)].bg, Color::Blue);
        assert_eq!(buf[(0, 0)].fg, Color::Black);
        // Selected row: black on cyan, to the right edge
        assert_eq!(buf[(19, 1)].bg, Color::Cyan);
        // Started row: green
        assert_eq!(buf[(0, 2)].fg, Color::Green);
    }

    #[test]
    fn lines_render_with_the_given_context() {
        let mut app = app_with_records(vec![record("a", "water plants", Some("household"))]);
        set_formats(&mut app, "$time", "$project|$description");

        let mut ctx = app.render_context();
        ctx.default_project_width = 5;
        ctx.now = Local.with_ymd_and_hms(2025, 6, 15, 7, 5, 0).unwrap();

        let (title, _) = app.title_line(&ctx, 20);
        assert_eq!(title, "07:05");
        let (line, _) = app.task_line(&ctx, 0, 40).unwrap();
        assert_eq!(line, "house|water plants");
    }

    #[test]
    fn pad_to_width() {
        assert_eq!(pad_to("ab".into(), 4), "ab  ");
        assert_eq!(pad_to("abcdef".into(), 4), "abcdef");
    }
}
