use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Charge-off rates expressed in percentage points as reported (4.2 = 4.2%).
pub type Rate = Decimal;

/// One row of the "Data" sheet. An `entry_date` that failed to parse is
/// loaded as `None`, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_number: String,
    pub entry_date: Option<NaiveDate>,
    pub amount_approved: Option<Money>,
    pub credit_score: Option<Decimal>,
    pub clinic_name: Option<String>,
}

/// One row of the "Charge-Offs" sheet. `month` is truncated to the first
/// of the month at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeOffRecord {
    pub month: Option<NaiveDate>,
    pub unsecured_pct: Option<Rate>,
    pub secured_pct: Option<Rate>,
    pub unsecured_amount: Option<Money>,
    pub secured_amount: Option<Money>,
}

/// The loan table, immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanBook {
    pub records: Vec<LoanRecord>,
}

/// The charge-off table, immutable after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeOffTable {
    pub records: Vec<ChargeOffRecord>,
}

/// Both tables plus the loader's advisories (coerced dates, empty sheets).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedWorkbook {
    pub loans: LoanBook,
    pub charge_offs: ChargeOffTable,
    pub warnings: Vec<String>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
