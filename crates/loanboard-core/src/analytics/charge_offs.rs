use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeOffSummary {
    pub unsecured_total: Money,
    pub secured_total: Money,
    pub months_reported: u64,
}

// ---------------------------------------------------------------------------
// Main function
// ---------------------------------------------------------------------------

/// Dollar totals over the full charge-off table. The raw table stays with
/// the caller; the monthly rate series is charted from it directly.
pub fn compute_charge_off_summary(charge_offs: &ChargeOffTable) -> ComputationOutput<ChargeOffSummary> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if charge_offs.records.is_empty() {
        warnings.push("Charge-off table is empty".to_string());
    }

    let unsecured_total: Decimal = charge_offs
        .records
        .iter()
        .filter_map(|record| record.unsecured_amount)
        .sum();
    let secured_total: Decimal = charge_offs
        .records
        .iter()
        .filter_map(|record| record.secured_amount)
        .sum();

    let result = ChargeOffSummary {
        unsecured_total,
        secured_total,
        months_reported: charge_offs.records.len() as u64,
    };

    with_metadata(
        "Unsecured and secured charge-off dollar sums over all rows",
        &serde_json::json!({
            "missing_amounts": "treated as zero",
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    )
}
