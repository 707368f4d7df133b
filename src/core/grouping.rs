use std::{collections::HashMap, fmt};

use chrono::{Datelike, Month, NaiveDateTime};
use num_traits::FromPrimitive;
use tracing::trace;

use super::measurement::Measurement;

/// Calendar day a measurement belongs to in the list view.
///
/// The year is deliberately not part of the key: the same day and month
/// in different years share one group.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DayKey {
    pub day: u32,
    pub month: Month,
}

impl DayKey {
    /// Day and month of `timestamp`.
    ///
    /// `month()` of a valid date is always within `1..=12`, so the
    /// `January` fallback is unreachable.
    #[must_use]
    pub fn from_timestamp(timestamp: &NaiveDateTime) -> Self {
        Self {
            day: timestamp.day(),
            month: Month::from_u32(timestamp.month()).unwrap_or(Month::January),
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.month.name().to_lowercase())
    }
}

/// All measurements sharing one [`DayKey`], in input order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DayGroup {
    pub key: DayKey,
    pub measurements: Vec<Measurement>,
}

impl DayGroup {
    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// Partitions `measurements` by calendar day.
///
/// Groups appear in the order their first member appears in the input and
/// members keep their input order. No sorting by date takes place.
#[must_use]
#[tracing::instrument(level = "trace", skip_all, fields(count = measurements.len()))]
pub fn group_by_day(measurements: &[Measurement]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<DayKey, usize> = HashMap::new();

    for measurement in measurements {
        let key = DayKey::from_timestamp(&measurement.timestamp());
        let position = *index.entry(key).or_insert_with(|| {
            groups.push(DayGroup {
                key,
                measurements: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].measurements.push(measurement.clone());
    }

    trace!("Grouped measurements into {} days", groups.len());
    groups
}
