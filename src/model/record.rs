use std::cell::Cell;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::AttrHandle;

/// Task priority as stored by taskwarrior (`H`, `M`, `L`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse the single priority character. Anything else is unset.
    pub fn from_char(c: char) -> Option<Priority> {
        match c {
            'H' => Some(Priority::High),
            'M' => Some(Priority::Medium),
            'L' => Some(Priority::Low),
            _ => None,
        }
    }

    /// The character used by the task tool
    pub fn as_char(self) -> char {
        match self {
            Priority::High => 'H',
            Priority::Medium => 'M',
            Priority::Low => 'L',
        }
    }

    /// Sort rank: higher is more urgent
    pub fn rank(self) -> i64 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// A single task record exported by the task tool
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Stable unique key
    pub uuid: String,
    /// Working-set id (0 when the tool did not report one)
    pub index: u32,
    pub project: Option<String>,
    pub description: String,
    pub tags: Vec<String>,
    pub priority: Option<Priority>,
    pub due: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub entry: Option<DateTime<Utc>>,

    // --- Color cache, owned by the color engine ---
    attr_selected: Cell<Option<AttrHandle>>,
    attr_unselected: Cell<Option<AttrHandle>>,
}

impl Record {
    /// Create a record with only its key and description set
    pub fn new(uuid: impl Into<String>, description: impl Into<String>) -> Self {
        Record {
            uuid: uuid.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Whether the task has been started
    pub fn is_started(&self) -> bool {
        self.start.is_some_and(|t| t.timestamp() != 0)
    }

    /// Tags as a single space-separated string
    pub fn tags_text(&self) -> String {
        self.tags.join(" ")
    }

    /// Cached color for the given selection state, if resolved
    pub fn cached_attr(&self, selected: bool) -> Option<AttrHandle> {
        self.slot(selected).get()
    }

    pub fn cache_attr(&self, selected: bool, attr: AttrHandle) {
        self.slot(selected).set(Some(attr));
    }

    /// Drop both cached colors. Must be called after any change to the
    /// record's fields or to the task color rules.
    pub fn invalidate_colors(&self) {
        self.attr_selected.set(None);
        self.attr_unselected.set(None);
    }

    fn slot(&self, selected: bool) -> &Cell<Option<AttrHandle>> {
        if selected {
            &self.attr_selected
        } else {
            &self.attr_unselected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn priority_chars() {
        assert_eq!(Priority::from_char('H'), Some(Priority::High));
        assert_eq!(Priority::from_char('x'), None);
        assert_eq!(Priority::Low.as_char(), 'L');
        assert!(Priority::High.rank() > Priority::Medium.rank());
    }

    #[test]
    fn started_requires_nonzero_timestamp() {
        let mut r = Record::new("u1", "write docs");
        assert!(!r.is_started());
        r.start = Some(Utc.timestamp_opt(0, 0).unwrap());
        assert!(!r.is_started());
        r.start = Some(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        assert!(r.is_started());
    }

    #[test]
    fn cache_slots_are_independent() {
        let r = Record::new("u1", "x");
        r.cache_attr(true, AttrHandle(3));
        assert_eq!(r.cached_attr(true), Some(AttrHandle(3)));
        assert_eq!(r.cached_attr(false), None);
        r.invalidate_colors();
        assert_eq!(r.cached_attr(true), None);
    }
}
