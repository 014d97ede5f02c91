use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default title line format
pub const DEFAULT_TITLE_FORMAT: &str = " $program_name ($selected_line/$task_count) $> $date";
/// Default task line format
pub const DEFAULT_TASK_FORMAT: &str = " $project $description $> ?$due?$due?$-6priority?";
/// Default sort key sequence: due, priority, project, uuid
pub const DEFAULT_SORT: &str = "drpu";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub format: FormatConfig,
    /// Color rules, applied in order after the built-in ones
    #[serde(default, rename = "color")]
    pub colors: Vec<ColorRuleConfig>,
    /// Key → action name overrides
    #[serde(default)]
    pub keys: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Task binary to run
    #[serde(default = "default_task_bin")]
    pub task_bin: String,
    /// Filter passed to every export
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Sort key sequence
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Number of color pairs the palette may allocate
    #[serde(default = "default_palette_size")]
    pub palette_size: usize,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            task_bin: default_task_bin(),
            filter: default_filter(),
            sort: default_sort(),
            palette_size: default_palette_size(),
            log_file: None,
        }
    }
}

fn default_task_bin() -> String {
    "task".into()
}

fn default_filter() -> String {
    "status:pending".into()
}

fn default_sort() -> String {
    DEFAULT_SORT.into()
}

fn default_palette_size() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default = "default_title_format")]
    pub title: String,
    #[serde(default = "default_task_format")]
    pub task: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        FormatConfig {
            title: default_title_format(),
            task: default_task_format(),
        }
    }
}

fn default_title_format() -> String {
    DEFAULT_TITLE_FORMAT.into()
}

fn default_task_format() -> String {
    DEFAULT_TASK_FORMAT.into()
}

/// One `[[color]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRuleConfig {
    /// `task`, `header` or `error`
    pub object: String,
    #[serde(default = "default_color")]
    pub fg: String,
    #[serde(default = "default_color")]
    pub bg: String,
    /// Predicate, e.g. `~p 'home' ~S`
    #[serde(default)]
    pub rule: Option<String>,
}

fn default_color() -> String {
    "default".into()
}
