use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::core::{
    config::appearance::Appearance,
    form::MeasurementForm,
    grouping::{group_by_day, DayGroup},
    measurement::Measurement,
    severity::{display_color, DisplayColor},
    store::{Change, MeasurementStore, MemoryStore},
};

/// One measurement formatted for the list.
#[derive(Debug, PartialEq, Clone)]
pub struct Row {
    /// Local time of day, `HH:MM`.
    pub time: String,
    /// `"{systolic} / {diastolic}"`.
    pub pressure: String,
    pub heart_rate: String,
    pub color: DisplayColor,
}

impl Row {
    #[must_use]
    pub fn from_measurement(measurement: &Measurement, alpha: f32) -> Self {
        Self {
            time: measurement.timestamp().format("%H:%M").to_string(),
            pressure: format!("{} / {}", measurement.systolic(), measurement.diastolic()),
            heart_rate: measurement.heart_rate().to_string(),
            color: display_color(measurement.systolic(), alpha),
        }
    }

    /// Stops of the horizontal gradient drawn behind the row: the severity
    /// color in the middle third, fading into the background at both ends.
    #[must_use]
    pub const fn gradient(&self, background: [u8; 3]) -> [DisplayColor; 6] {
        let background = DisplayColor::opaque(background);
        [
            background, background, self.color, self.color, background, background,
        ]
    }
}

/// All rows of one day under a sticky header.
#[derive(Debug, PartialEq, Clone)]
pub struct Section {
    pub header: String,
    pub rows: Vec<Row>,
}

impl Section {
    #[must_use]
    pub fn from_group(group: &DayGroup, alpha: f32) -> Self {
        Self {
            header: group.key.to_string(),
            rows: group
                .measurements
                .iter()
                .map(|measurement| Row::from_measurement(measurement, alpha))
                .collect(),
        }
    }
}

/// Builds the day sections for `measurements` in display order.
#[must_use]
#[tracing::instrument(level = "debug", skip(measurements), fields(count = measurements.len()))]
pub fn sections(measurements: &[Measurement], alpha: f32) -> Vec<Section> {
    group_by_day(measurements)
        .iter()
        .map(|group| Section::from_group(group, alpha))
        .collect()
}

/// Glue between a measurement store and whatever draws the list.
///
/// The store is injected, so tests and multi-threaded front ends can pass
/// their own. Redraw triggers come from [`ViewModel::version`] or from a
/// store subscription.
#[derive(Debug)]
pub struct ViewModel<S: MeasurementStore = MemoryStore> {
    store: S,
    appearance: Appearance,
}

impl<S: MeasurementStore> ViewModel<S> {
    #[must_use]
    pub const fn new(store: S, appearance: Appearance) -> Self {
        Self { store, appearance }
    }

    /// Snapshot of all measurements in insertion order.
    #[must_use]
    pub fn data(&self) -> Vec<Measurement> {
        self.store.get_all()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn new_item(&mut self, item: Measurement) {
        debug!("Recording new measurement");
        self.store.append(item);
    }

    /// Records whatever the form holds, unset fields as zero.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn submit(&mut self, form: MeasurementForm) {
        let measurement = form.submit();
        info!(
            "Submitting {} / {}, {}",
            measurement.systolic(),
            measurement.diastolic(),
            measurement.heart_rate()
        );
        self.new_item(measurement);
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    #[must_use]
    pub const fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Day sections of the current store contents.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        sections(&self.data(), self.appearance.alpha)
    }
}

impl ViewModel<MemoryStore> {
    /// Subscribes to appends made through this view model.
    pub fn subscribe(&mut self) -> Receiver<Change> {
        self.store.subscribe()
    }
}
