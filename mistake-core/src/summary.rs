//! Totals across the whole record collection.
use serde::{Deserialize, Serialize};

use crate::numbers::{round_f64_to_u64, u64_to_f64, usize_to_f64};
use crate::record::StaffRecord;

/// Count, total, and mean of final deductions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub count: usize,
    pub total: u64,
    pub average: u64,
}

/// Reduce `records` to a [`Summary`]; always recomputed from scratch.
#[must_use]
pub fn summarize(records: &[StaffRecord]) -> Summary {
    let count = records.len();
    let total = records
        .iter()
        .fold(0_u64, |sum, record| sum.saturating_add(record.final_amount));
    let average = if count == 0 {
        0
    } else {
        round_f64_to_u64(u64_to_f64(total) / usize_to_f64(count))
    };
    Summary {
        count,
        total,
        average,
    }
}
