use std::collections::HashMap;

use crossterm::event::KeyCode;

/// Everything a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    Complete,
    Delete,
    ToggleStart,
    Undo,
    Add,
    Modify,
    Annotate,
    Edit,
    View,
    Reload,
    Filter,
    Search,
    SearchNext,
    Sort,
    Command,
    Help,
    Quit,
}

impl Action {
    pub const ALL: [Action; 23] = [
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Home,
        Action::End,
        Action::Complete,
        Action::Delete,
        Action::ToggleStart,
        Action::Undo,
        Action::Add,
        Action::Modify,
        Action::Annotate,
        Action::Edit,
        Action::View,
        Action::Reload,
        Action::Filter,
        Action::Search,
        Action::SearchNext,
        Action::Sort,
        Action::Command,
        Action::Help,
        Action::Quit,
    ];

    /// Name used in the `[keys]` config table
    pub fn name(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Home => "home",
            Action::End => "end",
            Action::Complete => "complete",
            Action::Delete => "delete",
            Action::ToggleStart => "toggle_start",
            Action::Undo => "undo",
            Action::Add => "add",
            Action::Modify => "modify",
            Action::Annotate => "annotate",
            Action::Edit => "edit",
            Action::View => "view",
            Action::Reload => "reload",
            Action::Filter => "filter",
            Action::Search => "search",
            Action::SearchNext => "search_next",
            Action::Sort => "sort",
            Action::Command => "command",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }

    /// One-line description for the help overlay
    pub fn description(self) -> &'static str {
        match self {
            Action::ScrollUp => "previous task",
            Action::ScrollDown => "next task",
            Action::PageUp => "page up",
            Action::PageDown => "page down",
            Action::Home => "first task",
            Action::End => "last task",
            Action::Complete => "mark task done",
            Action::Delete => "delete task",
            Action::ToggleStart => "start / stop task",
            Action::Undo => "undo last change",
            Action::Add => "add a task",
            Action::Modify => "modify task",
            Action::Annotate => "annotate task",
            Action::Edit => "edit task in $EDITOR",
            Action::View => "show task info",
            Action::Reload => "reload tasks",
            Action::Filter => "set filter",
            Action::Search => "search",
            Action::SearchNext => "next search match",
            Action::Sort => "set sort order",
            Action::Command => "command line",
            Action::Help => "this help",
            Action::Quit => "quit",
        }
    }
}

/// Parse a key name from the config: a single character, or one of
/// `enter esc tab space backspace delete up down left right home end
/// pgup pgdn`
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some(code)
}

/// Display name of a key for the help overlay
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pgup".into(),
        KeyCode::PageDown => "pgdn".into(),
        other => format!("{:?}", other),
    }
}

/// Key → action table for normal mode
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Action::*;
        let defaults = [
            (KeyCode::Char('k'), ScrollUp),
            (KeyCode::Up, ScrollUp),
            (KeyCode::Char('j'), ScrollDown),
            (KeyCode::Down, ScrollDown),
            (KeyCode::PageUp, PageUp),
            (KeyCode::PageDown, PageDown),
            (KeyCode::Char('g'), Home),
            (KeyCode::Home, Home),
            (KeyCode::Char('G'), End),
            (KeyCode::End, End),
            (KeyCode::Char('c'), Complete),
            (KeyCode::Char('d'), Delete),
            (KeyCode::Char('s'), ToggleStart),
            (KeyCode::Char('u'), Undo),
            (KeyCode::Char('a'), Add),
            (KeyCode::Char('m'), Modify),
            (KeyCode::Char('A'), Annotate),
            (KeyCode::Char('e'), Edit),
            (KeyCode::Char('v'), View),
            (KeyCode::Enter, View),
            (KeyCode::Char('r'), Reload),
            (KeyCode::Char('f'), Filter),
            (KeyCode::Char('/'), Search),
            (KeyCode::Char('n'), SearchNext),
            (KeyCode::Char('o'), Sort),
            (KeyCode::Char(':'), Command),
            (KeyCode::Char('?'), Help),
            (KeyCode::Char('q'), Quit),
        ];
        KeyMap {
            bindings: defaults.into_iter().collect(),
        }
    }
}

impl KeyMap {
    /// Default bindings with `[keys]` overrides applied. Returns the map
    /// and a list of entries that could not be used.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> (KeyMap, Vec<String>) {
        let mut map = KeyMap::default();
        let mut rejected = Vec::new();
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();
        for (key, action) in entries {
            match (parse_key(key), Action::from_name(action)) {
                (Some(code), Some(action)) => {
                    map.bindings.insert(code, action);
                }
                _ => rejected.push(format!("{} = {}", key, action)),
            }
        }
        (map, rejected)
    }

    pub fn lookup(&self, code: KeyCode) -> Option<Action> {
        self.bindings.get(&code).copied()
    }

    /// Keys bound to an action, sorted by label
    pub fn keys_for(&self, action: Action) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| key_label(*k))
            .collect();
        keys.sort();
        keys
    }
}
