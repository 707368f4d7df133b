use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::severity::DEFAULT_ALPHA;

/// How measurement rows are drawn.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Appearance {
    /// Opacity of the severity color behind each row.
    pub alpha: f32,
    /// Row background the severity gradient fades into.
    pub background: [u8; 3],
}

impl Default for Appearance {
    /// Returns the list appearance with 40 % severity opacity on white.
    #[tracing::instrument(level = "debug")]
    fn default() -> Self {
        debug!("Creating default appearance");
        Self {
            alpha: DEFAULT_ALPHA,
            background: [0xFF, 0xFF, 0xFF],
        }
    }
}
