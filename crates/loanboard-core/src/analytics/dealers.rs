use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use crate::types::*;

/// Bucket for rows with a blank or missing clinic name.
pub const UNKNOWN_DEALER: &str = "(unknown)";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerRow {
    pub clinic_name: String,
    pub loan_count: u64,
    pub total_approved: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealerPerformance {
    /// Full ranking, descending by loan count. Ties keep first-appearance
    /// order. Truncation to a top-N is a presentation decision.
    pub dealers: Vec<DealerRow>,
}

// ---------------------------------------------------------------------------
// Main function
// ---------------------------------------------------------------------------

/// Per-dealer loan count and approved total, ranked by volume.
pub fn compute_dealer_performance(loans: &LoanBook) -> ComputationOutput<DealerPerformance> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DealerRow> = Vec::new();
    let mut unnamed_rows = 0u64;
    for record in &loans.records {
        let name = record
            .clinic_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_DEALER);
        if name == UNKNOWN_DEALER {
            unnamed_rows += 1;
        }

        let slot = *slots.entry(name.to_string()).or_insert_with(|| {
            groups.push(DealerRow {
                clinic_name: name.to_string(),
                loan_count: 0,
                total_approved: Decimal::ZERO,
            });
            groups.len() - 1
        });
        groups[slot].loan_count += 1;
        if let Some(amount) = record.amount_approved {
            groups[slot].total_approved += amount;
        }
    }

    if unnamed_rows > 0 {
        warnings.push(format!(
            "{unnamed_rows} row(s) without a clinic name grouped under \"{UNKNOWN_DEALER}\""
        ));
    }
    if groups.is_empty() {
        warnings.push("Loan book is empty; ranking is empty".to_string());
    }

    // Vec::sort_by is stable, so equal counts keep first-appearance order.
    groups.sort_by(|a, b| b.loan_count.cmp(&a.loan_count));

    with_metadata(
        "Loan count and approved-amount sum grouped by clinic, descending by count",
        &serde_json::json!({
            "missing_amounts": "treated as zero",
            "missing_clinic_names": UNKNOWN_DEALER,
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        DealerPerformance { dealers: groups },
    )
}
