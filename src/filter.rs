// 🧮 Filter Engine - one stable linear pass, input untouched

use crate::criteria::{build_predicate, FilterCriteria};
use crate::record::BeachRecord;

/// Keep the records the predicate accepts, in source order
pub fn filter_records<P>(records: &[BeachRecord], predicate: P) -> Vec<BeachRecord>
where
    P: Fn(&BeachRecord) -> bool,
{
    records.iter().filter(|beach| predicate(beach)).cloned().collect()
}

pub fn apply_criteria(records: &[BeachRecord], criteria: &FilterCriteria) -> Vec<BeachRecord> {
    filter_records(records, build_predicate(criteria))
}

// ============================================================================
// TESTS
// ============================================================================
