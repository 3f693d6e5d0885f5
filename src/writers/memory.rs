//! In-memory writer
//!
//! Keeps every record it receives. Clones share the same buffer, so one
//! handle can be given to the logger and another kept for inspection.

use crate::core::{OutputRecord, RecordWriter, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    records: Arc<Mutex<Vec<OutputRecord>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record written so far
    pub fn records(&self) -> Vec<OutputRecord> {
        self.records.lock().clone()
    }

    /// Records parsed as JSON; text records are skipped
    pub fn values(&self) -> Vec<Value> {
        self.records
            .lock()
            .iter()
            .filter_map(OutputRecord::to_value)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl RecordWriter for MemoryWriter {
    fn write(&mut self, record: &OutputRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
