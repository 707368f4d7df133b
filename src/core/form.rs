use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use strum_macros::{Display, EnumIter};
use tracing::debug;

use super::measurement::{local_now, Measurement};

/// Value recorded for any field the user left empty.
pub const DEFAULT_VALUE: i32 = 0;

#[derive(Debug, PartialEq, Eq, Clone, Copy, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Systolic,
    Diastolic,
    HeartRate,
}

/// Input collected for one new measurement.
///
/// Dismissing the form always records a measurement: unset fields fall
/// back to [`DEFAULT_VALUE`], so an untouched form stores `0 / 0, 0`.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct MeasurementForm {
    systolic: Option<i32>,
    diastolic: Option<i32>,
    heart_rate: Option<i32>,
}

impl MeasurementForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` from user text.
    ///
    /// Surrounding whitespace is ignored and empty text clears the field.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not an integer. The field keeps its
    /// previous value in that case.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set(&mut self, field: Field, text: &str) -> Result<()> {
        let text = text.trim();
        let value = if text.is_empty() {
            None
        } else {
            Some(
                text.parse::<i32>()
                    .with_context(|| format!("Invalid {field} value '{text}'"))?,
            )
        };
        *self.slot(field) = value;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the text is not an integer.
    pub fn set_systolic(&mut self, text: &str) -> Result<()> {
        self.set(Field::Systolic, text)
    }

    /// # Errors
    ///
    /// Returns an error if the text is not an integer.
    pub fn set_diastolic(&mut self, text: &str) -> Result<()> {
        self.set(Field::Diastolic, text)
    }

    /// # Errors
    ///
    /// Returns an error if the text is not an integer.
    pub fn set_heart_rate(&mut self, text: &str) -> Result<()> {
        self.set(Field::HeartRate, text)
    }

    #[must_use]
    pub const fn get(&self, field: Field) -> Option<i32> {
        match field {
            Field::Systolic => self.systolic,
            Field::Diastolic => self.diastolic,
            Field::HeartRate => self.heart_rate,
        }
    }

    /// Builds the measurement stamped with the current local time.
    #[must_use]
    pub fn submit(self) -> Measurement {
        self.submit_at(local_now())
    }

    /// Builds the measurement, replacing unset fields with
    /// [`DEFAULT_VALUE`].
    #[must_use]
    #[tracing::instrument(level = "debug")]
    pub fn submit_at(self, timestamp: NaiveDateTime) -> Measurement {
        if self.systolic.is_none() || self.diastolic.is_none() || self.heart_rate.is_none() {
            debug!("Submitting form with unset fields, defaulting them to {DEFAULT_VALUE}");
        }
        Measurement::at(
            timestamp,
            self.systolic.unwrap_or(DEFAULT_VALUE),
            self.diastolic.unwrap_or(DEFAULT_VALUE),
            self.heart_rate.unwrap_or(DEFAULT_VALUE),
        )
    }

    fn slot(&mut self, field: Field) -> &mut Option<i32> {
        match field {
            Field::Systolic => &mut self.systolic,
            Field::Diastolic => &mut self.diastolic,
            Field::HeartRate => &mut self.heart_rate,
        }
    }
}
