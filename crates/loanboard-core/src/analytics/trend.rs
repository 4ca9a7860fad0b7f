use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::types::*;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    /// First day of the calendar month.
    pub month: NaiveDate,
    pub loan_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    /// Chronologically ascending, one entry per month present in the data.
    pub months: Vec<MonthlyVolume>,
    pub dated_rows: u64,
    pub undated_rows: u64,
}

// ---------------------------------------------------------------------------
// Main function
// ---------------------------------------------------------------------------

/// Loan volume per calendar month of the entry date.
///
/// Rows without an entry date are excluded from the grouping; the exclusion
/// count is reported both in the result and as a warning.
pub fn compute_monthly_trend(loans: &LoanBook) -> ComputationOutput<MonthlyTrend> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    let mut undated_rows = 0u64;
    for record in &loans.records {
        match record.entry_date {
            Some(date) => {
                *buckets.entry((date.year(), date.month())).or_insert(0) += 1;
            }
            None => undated_rows += 1,
        }
    }

    if undated_rows > 0 {
        warnings.push(format!(
            "{undated_rows} row(s) excluded from the trend (missing entry date)"
        ));
    }
    if buckets.is_empty() {
        warnings.push("No dated rows; trend is empty".to_string());
    }

    let dated_rows = loans.records.len() as u64 - undated_rows;
    let months: Vec<MonthlyVolume> = buckets
        .into_iter()
        .map(|((year, month), loan_count)| MonthlyVolume {
            month: NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default(),
            loan_count,
        })
        .collect();

    let result = MonthlyTrend {
        months,
        dated_rows,
        undated_rows,
    };

    with_metadata(
        "Row count grouped by calendar month of the entry date, ascending",
        &serde_json::json!({
            "missing_dates": "excluded from the grouping",
        }),
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    )
}
