use core::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

use super::{ExpressionId, ExpressionRecord, Outcome};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("expression {0} not found")]
    NotFound(ExpressionId),

    #[error("expression {0} already exists")]
    AlreadyExists(ExpressionId),

    #[error("expression {0} has already finished")]
    AlreadyFinished(ExpressionId),
}

/// Persistence for expression records.
///
/// A record is created once as `processing` and finished at most once.
pub trait ExpressionStore: Send + Sync {
    fn create(&self, record: ExpressionRecord) -> Result<(), StoreError>;

    fn finish(&self, id: ExpressionId, outcome: Outcome) -> Result<ExpressionRecord, StoreError>;

    fn get(&self, id: ExpressionId) -> Option<ExpressionRecord>;

    /// All records in creation order.
    fn list(&self) -> Vec<ExpressionRecord>;
}

/// In-memory [`ExpressionStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<ExpressionId, ExpressionRecord>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExpressionStore for MemoryStore {
    fn create(&self, mut record: ExpressionRecord) -> Result<(), StoreError> {
        match self.records.entry(record.id) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists(record.id)),
            Entry::Vacant(slot) => {
                record.seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(record);
                Ok(())
            }
        }
    }

    fn finish(&self, id: ExpressionId, outcome: Outcome) -> Result<ExpressionRecord, StoreError> {
        let mut record = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if record.status.is_terminal() {
            return Err(StoreError::AlreadyFinished(id));
        }
        record.finish(outcome);
        Ok(record.value().clone())
    }

    fn get(&self, id: ExpressionId) -> Option<ExpressionRecord> {
        self.records.get(&id).map(|record| record.value().clone())
    }

    fn list(&self) -> Vec<ExpressionRecord> {
        let mut records: Vec<_> = self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.seq);
        records
    }
}
