use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

/// Line editing for the bottom prompt
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Char('c') if ctrl => app.cancel_prompt(),
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Backspace if app.prompt_input.is_empty() => app.cancel_prompt(),
        KeyCode::Backspace => unicode::pop_grapheme(&mut app.prompt_input),
        KeyCode::Char('w') if ctrl => unicode::pop_word(&mut app.prompt_input),
        KeyCode::Char('u') if ctrl => app.prompt_input.clear(),
        KeyCode::Char(c) if !ctrl => app.prompt_input.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use crate::color::ObjectKind;
    use crate::tui::app::{App, Mode, PromptKind};
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::{app_with_records, record};

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn enter(app: &mut App) {
        handle_key(app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn typing_and_editing() {
        let mut app = app_with_records(vec![]);
        app.open_prompt(PromptKind::Search, "");
        type_str(&mut app, "buy milk");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.prompt_input, "buy ");
        handle_key(&mut app, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.prompt_input, "buy");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.prompt_input, "");
        assert_eq!(app.mode, Mode::Prompt(PromptKind::Search));
        handle_key(&mut app, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn search_prompt_selects_match() {
        let mut app = app_with_records(vec![
            record("u1", "water plants", None),
            record("u2", "pay rent", None),
            record("u3", "call mom", None),
        ]);
        app.open_prompt(PromptKind::Search, "");
        type_str(&mut app, "RENT");
        enter(&mut app);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.selected_record().unwrap().uuid, "u2");
        assert_eq!(app.last_search.as_deref(), Some("RENT"));
    }

    #[test]
    fn search_without_match_reports_error() {
        let mut app = app_with_records(vec![record("u1", "water plants", None)]);
        app.search("nothing here");
        assert_eq!(app.selected, 0);
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn sort_prompt_reorders_and_keeps_selection() {
        let mut app = app_with_records(vec![
            record("b", "second", Some("beta")),
            record("a", "first", Some("alpha")),
        ]);
        app.set_sort("u");
        assert_eq!(app.selected_record().unwrap().uuid, "a");
        app.selected = 1;
        app.open_prompt(PromptKind::Sort, "");
        type_str(&mut app, "p");
        enter(&mut app);
        assert_eq!(app.sort, "p");
        assert_eq!(app.store.get(0).unwrap().uuid, "a");
        assert_eq!(app.selected_record().unwrap().uuid, "b");
    }

    #[test]
    fn command_prompt_changes_task_format() {
        let mut app = app_with_records(vec![record("u1", "water plants", None)]);
        app.open_prompt(PromptKind::Command, "");
        type_str(&mut app, "set task_format [$description]");
        enter(&mut app);
        assert_eq!(app.task_format, "[$description]");
        let (text, _) = app.task_line(&app.render_context(), 0, 20).unwrap();
        assert_eq!(text, "[water plants]");
    }

    #[test]
    fn command_prompt_adds_and_removes_colors() {
        let mut app = app_with_records(vec![record("u1", "water plants", None)]);
        let before = app.colors.rules().len();
        app.execute_command("color task yellow default ~d 'water'");
        assert_eq!(app.colors.rules().len(), before + 1);
        app.execute_command("uncolor task ~d 'water'");
        assert_eq!(app.colors.rules().len(), before);
        app.execute_command("uncolor task ~d 'water'");
        assert!(app.status.as_ref().unwrap().is_error);
        assert_eq!(app.colors.rules().iter().filter(|r| r.kind == ObjectKind::Task).count(), 3);
    }

    #[test]
    fn bad_command_reports_error() {
        let mut app = app_with_records(vec![]);
        app.execute_command("frobnicate");
        assert!(app.status.as_ref().unwrap().is_error);
        app.execute_command("quit");
        assert!(app.should_quit);
    }

    #[test]
    fn filter_reload_failure_keeps_running() {
        let mut app = app_with_records(vec![record("u1", "water plants", None)]);
        app.open_prompt(PromptKind::Filter, "");
        type_str(&mut app, "project:home");
        enter(&mut app);
        assert_eq!(app.filter, "project:home");
        assert!(app.status.as_ref().unwrap().is_error);
        assert_eq!(app.store.len(), 1);
    }
}
