use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::model::{Priority, Record};

/// A task as written by `task export`
#[derive(Debug, Deserialize)]
struct ExportedTask {
    #[serde(default)]
    id: u32,
    uuid: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due: Option<String>,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    entry: Option<String>,
}

impl From<ExportedTask> for Record {
    fn from(t: ExportedTask) -> Self {
        let mut record = Record::new(t.uuid, t.description);
        record.index = t.id;
        record.project = t.project.filter(|p| !p.is_empty());
        record.tags = t.tags;
        record.priority = t
            .priority
            .as_deref()
            .and_then(|p| p.chars().next())
            .and_then(Priority::from_char);
        record.due = t.due.as_deref().and_then(parse_task_date);
        record.start = t.start.as_deref().and_then(parse_task_date);
        record.entry = t.entry.as_deref().and_then(parse_task_date);
        record
    }
}

/// Parse export output: either a JSON array or one JSON object per line
/// (older task versions, with or without trailing commas).
pub fn parse_export(text: &str) -> Result<Vec<Record>, serde_json::Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        let tasks: Vec<ExportedTask> = serde_json::from_str(trimmed)?;
        return Ok(tasks.into_iter().map(Record::from).collect());
    }

    let mut records = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim().trim_end_matches(',');
        if line.is_empty() {
            continue;
        }
        let task: ExportedTask = serde_json::from_str(line)?;
        records.push(task.into());
    }
    Ok(records)
}

/// Parse a task date: `20250105T120000Z`, RFC 3339, or epoch seconds
pub fn parse_task_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    tracing::warn!(date = s, "unrecognized date in task export");
    None
}
