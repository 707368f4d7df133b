use std::sync::{
    mpsc::{channel, Receiver, Sender},
    Arc, Mutex, MutexGuard, PoisonError,
};

use tracing::{debug, trace};

use super::measurement::Measurement;

/// Notification sent to subscribers after every append.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Change {
    /// Store version after the append.
    pub version: u64,
    /// Number of stored measurements after the append.
    pub len: usize,
}

/// Append-only, ordered collection of measurements.
///
/// There is no update or delete: insertion order is the only order a store
/// knows about.
pub trait MeasurementStore {
    /// Returns a snapshot of all measurements in insertion order.
    fn get_all(&self) -> Vec<Measurement>;

    /// Appends `item` after all existing measurements.
    fn append(&mut self, item: Measurement);

    /// Number of appends performed so far; starts at zero.
    fn version(&self) -> u64;
}

/// In-memory store; everything is lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    measurements: Vec<Measurement>,
    version: u64,
    subscribers: Vec<Sender<Change>>,
}

impl MemoryStore {
    #[must_use]
    #[tracing::instrument(level = "debug")]
    pub fn new() -> Self {
        debug!("Creating empty measurement store");
        Self::default()
    }

    /// Creates a store pre-seeded with `measurements`.
    ///
    /// Seeding does not count as an append, the version starts at zero.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(count = measurements.len()))]
    pub fn with_measurements(measurements: Vec<Measurement>) -> Self {
        debug!("Creating seeded measurement store");
        Self {
            measurements,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Borrowing view of the stored measurements.
    #[must_use]
    pub fn as_slice(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Registers a new listener that receives a [`Change`] for every
    /// subsequent append.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        debug!("Added subscriber, now {}", self.subscribers.len());
        rx
    }

    fn notify(&mut self) {
        let change = Change {
            version: self.version,
            len: self.measurements.len(),
        };
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }
}

impl MeasurementStore for MemoryStore {
    fn get_all(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    #[tracing::instrument(level = "trace", skip(self))]
    fn append(&mut self, item: Measurement) {
        self.measurements.push(item);
        self.version += 1;
        trace!("Appended measurement, version {}", self.version);
        self.notify();
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Cloneable handle for stores written from more than one thread.
///
/// Appends are serialized by a mutex, so measurements land in the order the
/// lock was acquired.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<MemoryStore>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Subscribes to changes of the underlying store.
    pub fn subscribe(&self) -> Receiver<Change> {
        self.lock().subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panicking writer cannot leave a half-appended entry behind.
    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MeasurementStore for SharedStore {
    fn get_all(&self) -> Vec<Measurement> {
        self.lock().get_all()
    }

    fn append(&mut self, item: Measurement) {
        self.lock().append(item);
    }

    fn version(&self) -> u64 {
        self.lock().version()
    }
}
