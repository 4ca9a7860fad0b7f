use std::sync::Mutex;

use napi::Result as NapiResult;
use napi_derive::napi;
use once_cell::sync::Lazy;

use loanboard_core::analytics::{charge_offs, dealers, kpi, trend};
use loanboard_core::cache::WorkbookCache;
use loanboard_core::types::{ChargeOffTable, LoanBook};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Workbook cache owned by the host process, so a web-view refresh does not
/// re-parse an unchanged file. Keyed by path and modification time.
static WORKBOOK_CACHE: Lazy<Mutex<WorkbookCache>> =
    Lazy::new(|| Mutex::new(WorkbookCache::new()));

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[napi]
pub fn load_dashboard(workbook_path: String) -> NapiResult<String> {
    let loaded = {
        let mut cache = WORKBOOK_CACHE
            .lock()
            .map_err(|_| napi::Error::from_reason("workbook cache lock poisoned"))?;
        cache.load(&workbook_path).map_err(to_napi_error)?.clone()
    };

    let document = serde_json::json!({
        "workbook": workbook_path,
        "advisories": loaded.warnings,
        "kpis": kpi::compute_kpis(&loaded.loans),
        "monthly_trend": trend::compute_monthly_trend(&loaded.loans),
        "dealer_performance": dealers::compute_dealer_performance(&loaded.loans),
        "charge_offs": {
            "summary": charge_offs::compute_charge_off_summary(&loaded.charge_offs),
            "series": loaded.charge_offs.records,
        },
    });
    serde_json::to_string(&document).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan book
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_kpis(loans_json: String) -> NapiResult<String> {
    let loans: LoanBook = serde_json::from_str(&loans_json).map_err(to_napi_error)?;
    serde_json::to_string(&kpi::compute_kpis(&loans)).map_err(to_napi_error)
}

#[napi]
pub fn monthly_trend(loans_json: String) -> NapiResult<String> {
    let loans: LoanBook = serde_json::from_str(&loans_json).map_err(to_napi_error)?;
    serde_json::to_string(&trend::compute_monthly_trend(&loans)).map_err(to_napi_error)
}

#[napi]
pub fn dealer_performance(loans_json: String) -> NapiResult<String> {
    let loans: LoanBook = serde_json::from_str(&loans_json).map_err(to_napi_error)?;
    serde_json::to_string(&dealers::compute_dealer_performance(&loans)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Charge-offs
// ---------------------------------------------------------------------------

#[napi]
pub fn charge_off_summary(charge_offs_json: String) -> NapiResult<String> {
    let table: ChargeOffTable = serde_json::from_str(&charge_offs_json).map_err(to_napi_error)?;
    serde_json::to_string(&charge_offs::compute_charge_off_summary(&table)).map_err(to_napi_error)
}
