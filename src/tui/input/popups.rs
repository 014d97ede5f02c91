use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Scrolling and closing the task info pager
pub(super) fn handle_pager(app: &mut App, key: KeyEvent) {
    let page = app.list_height.max(1);
    let Some(pager) = app.pager.as_mut() else {
        app.mode = Mode::Normal;
        return;
    };
    let last = pager.lines.len().saturating_sub(1);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
            app.pager = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Char('j') | KeyCode::Down => pager.scroll = (pager.scroll + 1).min(last),
        KeyCode::Char('k') | KeyCode::Up => pager.scroll = pager.scroll.saturating_sub(1),
        KeyCode::PageDown | KeyCode::Char(' ') => pager.scroll = (pager.scroll + page).min(last),
        KeyCode::PageUp => pager.scroll = pager.scroll.saturating_sub(page),
        KeyCode::Char('g') | KeyCode::Home => pager.scroll = 0,
        KeyCode::Char('G') | KeyCode::End => pager.scroll = last,
        _ => {}
    }
}

/// Any key closes the help overlay
pub(super) fn handle_help(app: &mut App, _key: KeyEvent) {
    app.mode = Mode::Normal;
}
