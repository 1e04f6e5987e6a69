use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{CounterRecord, CounterStore, Delta, StoreError, COUNTER_ID};

/// Process-local store. Nothing survives a restart.
///
/// The mutex is held across the whole read-modify-write, which is what makes
/// `apply` atomic here.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<CounterRecord>>,
}

impl MemoryStore {
    /// Empty store; `ensure_initialized` creates the record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose record already exists with `value`.
    pub fn with_value(value: i64) -> Self {
        Self {
            record: Mutex::new(Some(CounterRecord::new(value))),
        }
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let mut record = self.record.lock();
        if record.is_none() {
            *record = Some(CounterRecord::new(0));
        }
        Ok(())
    }

    async fn record(&self) -> Result<CounterRecord, StoreError> {
        self.record
            .lock()
            .clone()
            .ok_or(StoreError::InvariantViolation { id: COUNTER_ID })
    }

    async fn apply(&self, delta: Delta) -> Result<i64, StoreError> {
        let mut guard = self.record.lock();
        let record = guard
            .as_mut()
            .ok_or(StoreError::InvariantViolation { id: COUNTER_ID })?;
        record.value = delta.apply_to(record.value)?;
        record.updated_at = Utc::now();
        Ok(record.value)
    }
}
