use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::measurement::{fixtures, Measurement};

/// What a freshly started store contains.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Store {
    /// Seed the demo readings before any configured entries.
    pub seed_fixtures: bool,
    /// Additional readings appended after the fixtures, in file order.
    pub seed: Vec<Measurement>,
}

impl Default for Store {
    #[tracing::instrument(level = "debug")]
    fn default() -> Self {
        debug!("Creating default store config");
        Self {
            seed_fixtures: true,
            seed: Vec::new(),
        }
    }
}

impl Store {
    /// Measurements a new store starts out with, fixtures relative to `now`.
    #[must_use]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn initial_measurements(&self, now: NaiveDateTime) -> Vec<Measurement> {
        let mut measurements = if self.seed_fixtures {
            fixtures(now)
        } else {
            Vec::new()
        };
        measurements.extend(self.seed.iter().cloned());
        debug!("Seeding store with {} measurements", measurements.len());
        measurements
    }
}
