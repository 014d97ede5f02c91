use serde::Serialize;

use crate::model::Record;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct RecordJson {
    pub uuid: String,
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// The task line as rendered by the task format
    pub line: String,
}

impl RecordJson {
    pub fn new(record: &Record, line: String) -> Self {
        RecordJson {
            uuid: record.uuid.clone(),
            id: record.index,
            project: record.project.clone(),
            description: record.description.clone(),
            tags: record.tags.clone(),
            priority: record.priority.map(|p| p.as_char().to_string()),
            due: record.due.map(|d| d.to_rfc3339()),
            line,
        }
    }
}
