use std::io;
use std::process::{Command, ExitStatus, Stdio};

use crate::io::export::parse_export;
use crate::model::Record;

/// Error type for running the task binary
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("could not run {bin}: {source}")]
    Spawn { bin: String, source: io::Error },
    #[error("`{command}` failed: {message}")]
    Failed { command: String, message: String },
    #[error("could not parse task export: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A change applied to a single task by uuid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Complete,
    Delete,
    Start,
    Stop,
    Modify(String),
    Annotate(String),
}

impl TaskAction {
    fn args(&self) -> Vec<String> {
        match self {
            TaskAction::Complete => vec!["done".into()],
            TaskAction::Delete => vec!["delete".into()],
            TaskAction::Start => vec!["start".into()],
            TaskAction::Stop => vec!["stop".into()],
            TaskAction::Modify(text) => with_words("modify", text),
            TaskAction::Annotate(text) => with_words("annotate", text),
        }
    }

    /// Past-tense description for status messages
    pub fn done_message(&self) -> &'static str {
        match self {
            TaskAction::Complete => "task completed",
            TaskAction::Delete => "task deleted",
            TaskAction::Start => "task started",
            TaskAction::Stop => "task stopped",
            TaskAction::Modify(_) => "task modified",
            TaskAction::Annotate(_) => "task annotated",
        }
    }

    /// Whether the task leaves the pending list
    pub fn removes_task(&self) -> bool {
        matches!(self, TaskAction::Complete | TaskAction::Delete)
    }
}

fn with_words(verb: &str, text: &str) -> Vec<String> {
    std::iter::once(verb.to_string())
        .chain(split_args(text))
        .collect()
}

/// Split typed arguments with shell quoting rules, so a term like
/// `description:"buy milk"` stays one argument. Unbalanced quotes fall back
/// to splitting on whitespace.
pub fn split_args(text: &str) -> Vec<String> {
    shlex::split(text).unwrap_or_else(|| {
        tracing::warn!(text, "unbalanced quotes, splitting on whitespace");
        text.split_whitespace().map(String::from).collect()
    })
}

/// Client for the external `task` binary
#[derive(Debug, Clone)]
pub struct TaskTool {
    bin: String,
}

impl TaskTool {
    pub fn new(bin: impl Into<String>) -> Self {
        TaskTool { bin: bin.into() }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Version reported by `task --version`
    pub fn version(&self) -> Result<String, TaskError> {
        Ok(self.run(["--version"])?.trim().to_string())
    }

    /// All tasks matching a filter, in export order
    pub fn export(&self, filter: &str) -> Result<Vec<Record>, TaskError> {
        let mut args = vec!["rc.json.array=on".to_string(), "rc.verbose=nothing".into()];
        args.extend(split_args(filter));
        args.push("export".into());
        let out = self.run(&args)?;
        Ok(parse_export(&out)?)
    }

    /// A single task, `None` if it no longer exists
    pub fn export_one(&self, uuid: &str) -> Result<Option<Record>, TaskError> {
        let filter = format!("uuid:{}", uuid);
        let out = self.run([
            "rc.json.array=on",
            "rc.verbose=nothing",
            filter.as_str(),
            "export",
        ])?;
        Ok(parse_export(&out)?.into_iter().next())
    }

    /// Apply an action to one task. Returns the tool's output.
    pub fn apply(&self, uuid: &str, action: &TaskAction) -> Result<String, TaskError> {
        let mut args = vec!["rc.confirmation=off".to_string(), uuid.to_string()];
        args.extend(action.args());
        self.run(&args)
    }

    /// `task add <words>`
    pub fn add(&self, text: &str) -> Result<String, TaskError> {
        let mut args = vec!["rc.confirmation=off".to_string()];
        args.extend(with_words("add", text));
        self.run(&args)
    }

    /// Revert the most recent change
    pub fn undo(&self) -> Result<String, TaskError> {
        self.run(["rc.confirmation=off", "undo"])
    }

    /// Report produced by `task <uuid> info`
    pub fn info(&self, uuid: &str) -> Result<String, TaskError> {
        self.run([uuid, "info"])
    }

    /// Run `task <uuid> edit` attached to the terminal. The caller must
    /// hand the terminal over before calling this.
    pub fn edit(&self, uuid: &str) -> Result<ExitStatus, TaskError> {
        tracing::debug!(bin = %self.bin, uuid, "running interactive edit");
        Command::new(&self.bin)
            .args([uuid, "edit"])
            .status()
            .map_err(|source| TaskError::Spawn {
                bin: self.bin.clone(),
                source,
            })
    }

    fn run<I, S>(&self, args: I) -> Result<String, TaskError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let args: Vec<std::ffi::OsString> =
            args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        let command = std::iter::once(self.bin.clone())
            .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(%command, "running task");

        let output = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| TaskError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            tracing::warn!(%command, %message, "task command failed");
            return Err(TaskError::Failed { command, message });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
