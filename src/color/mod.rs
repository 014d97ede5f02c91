//! Color rules: which display attribute a task line, the header or an error
//! message is drawn with.

pub mod palette;
pub mod predicate;
pub mod rules;

use std::fmt;
use std::str::FromStr;

pub use palette::{AttrHandle, Palette, parse_color};
pub use predicate::{Predicate, PredicateError};
pub use rules::{ColorEngine, ColorRule};

/// What a color rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Task,
    Header,
    Error,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Task => "task",
            ObjectKind::Header => "header",
            ObjectKind::Error => "error",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectKind {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task" => Ok(ObjectKind::Task),
            "header" => Ok(ObjectKind::Header),
            "error" => Ok(ObjectKind::Error),
            other => Err(ColorError::UnknownObject(other.to_string())),
        }
    }
}

/// Error type for color rule registration
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("no free color pairs (palette holds {capacity})")]
    PaletteExhausted { capacity: usize },
    #[error("unknown color: {0}")]
    UnknownColor(String),
    #[error("unknown color object: {0}")]
    UnknownObject(String),
}
