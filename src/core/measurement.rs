use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single blood pressure and heart rate reading.
///
/// Values are never range checked; zero and negative readings are
/// accepted as given. A measurement is immutable once built, so a
/// correction is recorded as a new measurement.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Measurement {
    #[serde(default = "local_now")]
    timestamp: NaiveDateTime,
    systolic: i32,
    diastolic: i32,
    heart_rate: i32,
}

impl Measurement {
    /// Creates a measurement stamped with the current local time.
    #[must_use]
    #[tracing::instrument(level = "trace")]
    pub fn new(systolic: i32, diastolic: i32, heart_rate: i32) -> Self {
        Self::at(local_now(), systolic, diastolic, heart_rate)
    }

    /// Creates a measurement taken at the given local time.
    #[must_use]
    pub const fn at(
        timestamp: NaiveDateTime,
        systolic: i32,
        diastolic: i32,
        heart_rate: i32,
    ) -> Self {
        Self {
            timestamp,
            systolic,
            diastolic,
            heart_rate,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[must_use]
    pub const fn systolic(&self) -> i32 {
        self.systolic
    }

    #[must_use]
    pub const fn diastolic(&self) -> i32 {
        self.diastolic
    }

    #[must_use]
    pub const fn heart_rate(&self) -> i32 {
        self.heart_rate
    }
}

/// Current local wall-clock time, the timestamp of any reading that does
/// not carry one.
#[must_use]
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

const FIXTURE_DIASTOLIC: i32 = 80;
const FIXTURE_HEART_RATE: i32 = 70;
const FIXTURE_MONTH: u32 = 3;

/// Returns the demo readings a fresh store is seeded with.
///
/// Five readings sit at `now`, the remaining four at the same day and
/// time moved into March. If `now` cannot be moved into March the
/// unmodified `now` is used.
#[must_use]
#[tracing::instrument(level = "debug")]
pub fn fixtures(now: NaiveDateTime) -> Vec<Measurement> {
    debug!("Creating fixture measurements");
    let march = now.with_month(FIXTURE_MONTH).unwrap_or(now);
    let current = [100, 110, 120, 130, 140]
        .into_iter()
        .map(|systolic| Measurement::at(now, systolic, FIXTURE_DIASTOLIC, FIXTURE_HEART_RATE));
    let moved = [150, 160, 170, 80]
        .into_iter()
        .map(|systolic| Measurement::at(march, systolic, FIXTURE_DIASTOLIC, FIXTURE_HEART_RATE));
    current.chain(moved).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;
    use crate::tests::timestamp;

    #[test]
    fn new_uses_current_time() {
        let before = Local::now().naive_local();
        let measurement = Measurement::new(120, 80, 60);
        let after = Local::now().naive_local();

        assert!(measurement.timestamp() >= before);
        assert!(measurement.timestamp() <= after);
        assert_eq!(measurement.systolic(), 120);
        assert_eq!(measurement.diastolic(), 80);
        assert_eq!(measurement.heart_rate(), 60);
    }

    #[test]
    fn missing_timestamp_deserializes_as_now() -> anyhow::Result<()> {
        let before = local_now();
        let measurement: Measurement =
            toml::from_str("systolic = 120\ndiastolic = 80\nheart_rate = 60")?;
        let after = local_now();

        assert!(measurement.timestamp() >= before);
        assert!(measurement.timestamp() <= after);
        assert_eq!(measurement.systolic(), 120);
        Ok(())
    }

    #[test]
    fn accepts_zero_and_negative_values() {
        let measurement = Measurement::at(timestamp(2024, 1, 1, 8, 0), 0, -5, -70);

        assert_eq!(measurement.systolic(), 0);
        assert_eq!(measurement.diastolic(), -5);
        assert_eq!(measurement.heart_rate(), -70);
    }

    #[test]
    fn fixtures_match_seed_layout() {
        let now = timestamp(2024, 10, 16, 9, 30);
        let seed = fixtures(now);

        let systolic: Vec<i32> = seed.iter().map(Measurement::systolic).collect();
        assert_eq!(systolic, vec![100, 110, 120, 130, 140, 150, 160, 170, 80]);
        assert!(seed
            .iter()
            .all(|m| m.diastolic() == 80 && m.heart_rate() == 70));

        assert!(seed[..5].iter().all(|m| m.timestamp() == now));
        for moved in &seed[5..] {
            assert_eq!(moved.timestamp().month(), 3);
            assert_eq!(moved.timestamp().day(), 16);
            assert_eq!(moved.timestamp().year(), 2024);
            assert_eq!(moved.timestamp().hour(), 9);
        }
    }

    #[test]
    fn fixtures_in_march_stay_put() {
        let now = timestamp(2023, 3, 31, 23, 59);
        let seed = fixtures(now);

        assert!(seed.iter().all(|m| m.timestamp() == now));
    }
}
