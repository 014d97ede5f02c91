use regex::{Regex, RegexBuilder};

use crate::model::Record;

/// Build a case-insensitive search regex. Invalid patterns are searched
/// for literally.
pub fn search_regex(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

/// Whether a record's description, project or tags match
pub fn record_matches(re: &Regex, record: &Record) -> bool {
    re.is_match(&record.description)
        || record.project.as_deref().is_some_and(|p| re.is_match(p))
        || record.tags.iter().any(|t| re.is_match(t))
}

/// Index of the next matching record after `current`, wrapping around.
/// The current record itself is checked last.
pub fn find_next(records: &[Record], re: &Regex, current: usize) -> Option<usize> {
    let len = records.len();
    if len == 0 {
        return None;
    }
    (1..=len)
        .map(|offset| (current + offset) % len)
        .find(|&idx| record_matches(re, &records[idx]))
}
