use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::keys::key_label;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.keymap.lookup(key.code) {
        Some(action) => {
            tracing::trace!(action = action.name(), "key action");
            app.status = None;
            app.perform(action);
        }
        None if key.code == KeyCode::Esc => app.status = None,
        None => app.set_error(format!("unhandled key: {}", key_label(key.code))),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use crate::tui::app::{Mode, PromptKind};
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::{app_with_records, record};

    fn press(app: &mut crate::tui::app::App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn three_records() -> Vec<crate::model::Record> {
        vec![
            record("u1", "first", None),
            record("u2", "second", None),
            record("u3", "third", None),
        ]
    }

    #[test]
    fn movement_clamps_at_both_ends() {
        let mut app = app_with_records(three_records());
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected, 2);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn movement_on_empty_list_stays_at_zero() {
        let mut app = app_with_records(vec![]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn prompt_keys_open_prompts() {
        let mut app = app_with_records(three_records());
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, Mode::Prompt(PromptKind::Search));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);

        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.mode, Mode::Prompt(PromptKind::Sort));
        assert_eq!(app.prompt_input, app.sort);
    }

    #[test]
    fn help_and_quit() {
        let mut app = app_with_records(three_records());
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, Mode::Help);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.mode, Mode::Normal);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = app_with_records(vec![]);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn unbound_key_reports_error() {
        let mut app = app_with_records(vec![]);
        press(&mut app, KeyCode::Char('Z'));
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert_eq!(status.text, "unhandled key: Z");
    }

    #[test]
    fn edit_is_deferred_to_event_loop() {
        let mut app = app_with_records(three_records());
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.pending_edit.as_deref(), Some("u2"));
    }
}
