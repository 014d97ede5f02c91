use std::cmp::Ordering;

use crate::model::Record;

/// Sort records in place by a key sequence such as `"drpu"`.
///
/// Each character picks a key, tried left to right until one differs:
///
/// - `n` index
/// - `p` project (tasks without a project go last)
/// - `d` due date (no due date counts as the epoch)
/// - `r` priority (`L` < `M` < `H`, unset lowest)
/// - `u` uuid
///
/// An uppercase letter reverses that key only. Unknown letters compare
/// equal. The sort is not stable; end the sequence with `u` for a
/// deterministic order.
pub fn sort_records(records: &mut [Record], keys: &str) {
    let keys: Vec<char> = keys.chars().collect();
    records.sort_unstable_by(|a, b| compare(a, b, &keys));
}

/// Compare two records by a key sequence
pub fn compare(a: &Record, b: &Record, keys: &[char]) -> Ordering {
    let Some((&key, rest)) = keys.split_first() else {
        return Ordering::Equal;
    };
    let invert = key.is_uppercase();
    let raw = compare_key(a, b, key.to_ascii_lowercase());
    let ord = if invert { raw.reverse() } else { raw };
    ord.then_with(|| compare(a, b, rest))
}

fn compare_key(a: &Record, b: &Record, key: char) -> Ordering {
    match key {
        'n' => a.index.cmp(&b.index),
        'p' => match (&a.project, &b.project) {
            (Some(pa), Some(pb)) => pa.cmp(pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        'd' => due_stamp(a).cmp(&due_stamp(b)),
        'r' => priority_rank(a).cmp(&priority_rank(b)),
        'u' => a.uuid.cmp(&b.uuid),
        _ => Ordering::Equal,
    }
}

fn due_stamp(r: &Record) -> i64 {
    r.due.map_or(0, |d| d.timestamp())
}

fn priority_rank(r: &Record) -> i64 {
    r.priority.map_or(0, |p| p.rank())
}

/// Whether every character of a key sequence names a known key
pub fn is_known_sequence(keys: &str) -> bool {
    keys.chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'n' | 'p' | 'd' | 'r' | 'u'))
}
