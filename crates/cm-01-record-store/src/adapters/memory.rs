use crate::adapters::transaction::TableTransaction;
use crate::domain::errors::StoreError;
use crate::domain::tables::Tables;
use crate::ports::store::{RecordStore, StoreTransaction};
use parking_lot::Mutex;

/// Process-local record store.
///
/// One mutex guards all three tables, so every transaction is serializable
/// and unique-index checks cannot race. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryRecordStore {
    tables: Mutex<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows (fixtures, migrations).
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    /// Copy of the committed tables.
    pub fn snapshot(&self) -> Tables {
        self.tables.lock().clone()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>, StoreError> {
        Ok(Box::new(TableTransaction::new(self.tables.lock(), None)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
