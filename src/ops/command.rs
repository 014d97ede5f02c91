use crate::color::{ColorError, ObjectKind};

/// Settings changeable with `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Filter,
    Sort,
    TitleFormat,
    TaskFormat,
}

impl Setting {
    fn from_name(name: &str) -> Option<Setting> {
        match name {
            "filter" => Some(Setting::Filter),
            "sort" => Some(Setting::Sort),
            "title_format" => Some(Setting::TitleFormat),
            "task_format" => Some(Setting::TaskFormat),
            _ => None,
        }
    }
}

/// A parsed `:` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set {
        setting: Setting,
        value: String,
    },
    Color {
        kind: ObjectKind,
        fg: String,
        bg: String,
        rule: Option<String>,
    },
    Uncolor {
        kind: ObjectKind,
        rule: Option<String>,
    },
    Reload,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Parse a command line such as `color task red default ~p 'home'`.
///
/// Values for `set` keep their inner spacing (formats often start with a
/// space); surrounding double quotes are removed.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (name, rest) = split_word(line);
    match name {
        "" => Err(CommandError::Empty),
        "quit" | "q" => Ok(Command::Quit),
        "reload" => Ok(Command::Reload),
        "set" => {
            let (setting, value) = split_word(rest);
            if setting.is_empty() {
                return Err(CommandError::MissingArgument("set"));
            }
            let setting = Setting::from_name(setting)
                .ok_or_else(|| CommandError::UnknownSetting(setting.to_string()))?;
            let value = value.strip_prefix(' ').unwrap_or(value);
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Ok(Command::Set {
                setting,
                value: value.to_string(),
            })
        }
        "color" => {
            let (kind, rest) = split_word(rest);
            let (fg, rest) = split_word(rest);
            let (bg, rule) = split_word(rest);
            if bg.is_empty() {
                return Err(CommandError::MissingArgument("color"));
            }
            Ok(Command::Color {
                kind: kind.parse()?,
                fg: fg.to_string(),
                bg: bg.to_string(),
                rule: non_empty(rule),
            })
        }
        "uncolor" => {
            let (kind, rule) = split_word(rest);
            if kind.is_empty() {
                return Err(CommandError::MissingArgument("uncolor"));
            }
            Ok(Command::Uncolor {
                kind: kind.parse()?,
                rule: non_empty(rule),
            })
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// First whitespace-delimited word and the untrimmed remainder
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], &s[idx..]),
        None => (s, ""),
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
