use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub loan_count: u64,
    pub total_approved: Money,
    /// Absent when no row carries a credit score. Never zero, never NaN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_credit_score: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Main function
// ---------------------------------------------------------------------------

/// Headline figures over the loan book.
///
/// Total over any well-formed book: an empty book yields a zero count and
/// sum and an absent average. Missing amounts sum as zero; rows without a
/// credit score are excluded from both sides of the mean.
pub fn compute_kpis(loans: &LoanBook) -> ComputationOutput<KpiSummary> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let loan_count = loans.records.len() as u64;
    if loan_count == 0 {
        warnings.push("Loan book is empty".to_string());
    }

    let total_approved: Decimal = loans
        .records
        .iter()
        .filter_map(|record| record.amount_approved)
        .sum();

    let scores: Vec<Decimal> = loans
        .records
        .iter()
        .filter_map(|record| record.credit_score)
        .collect();
    let average_credit_score = if scores.is_empty() {
        if loan_count > 0 {
            warnings.push("No credit scores present; average is undefined".to_string());
        }
        None
    } else {
        Some(scores.iter().copied().sum::<Decimal>() / Decimal::from(scores.len() as u64))
    };

    let result = KpiSummary {
        loan_count,
        total_approved,
        average_credit_score,
    };

    with_metadata(
        "Row count, approved-amount sum, and mean credit score over the loan book",
        &serde_json::json!({
            "missing_amounts": "treated as zero",
            "missing_scores": "excluded from the mean",
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    )
}
