// 🏖️ Beach Records - One row per beach, immutable after load
// The store is replaced wholesale; records are never patched in place

use serde::{Deserialize, Serialize};

// ============================================================================
// BEACH RECORD
// ============================================================================

/// One beach as delivered by the data files.
///
/// Every field is required. Absence of a value is an empty string,
/// never a missing key. Identity is positional, duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeachRecord {
    pub name: String,

    pub address: String,

    /// Free-form display text, not parsed
    pub open_time: String,

    pub has_lifeguard: bool,

    pub has_shower: bool,

    pub is_free: bool,

    pub note: String,
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// In-memory collection for the active language
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<BeachRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore { records: Vec::new() }
    }

    /// Replace the whole collection (no merge)
    pub fn replace(&mut self, records: Vec<BeachRecord>) {
        self.records = records;
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[BeachRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<BeachRecord>> for RecordStore {
    fn from(records: Vec<BeachRecord>) -> Self {
        RecordStore { records }
    }
}

// ============================================================================
// TESTS
// ============================================================================
