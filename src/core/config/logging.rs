use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::debug;

/// Terminal stream the console log layer writes to.
///
/// Defaults to stderr so that anything a binary prints on stdout stays
/// free of log lines.
#[derive(
    Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, EnumIter, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Console {
    #[default]
    Stderr,
    Stdout,
    Off,
}

/// Where log output goes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Logging {
    pub console: Console,
    /// Write a daily rolling log file in addition to the console.
    pub file_output: bool,
    pub directory: PathBuf,
    pub file_name: String,
}

impl Default for Logging {
    #[tracing::instrument(level = "debug")]
    fn default() -> Self {
        debug!("Creating default logging config");
        Self {
            console: Console::Stderr,
            file_output: true,
            directory: PathBuf::from("./logs"),
            file_name: "bptrust.log".to_string(),
        }
    }
}
