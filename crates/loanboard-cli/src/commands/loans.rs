use clap::Args;
use serde_json::Value;

use loanboard_core::analytics::{dealers, kpi, trend};
use loanboard_core::workbook;

use crate::input;

/// Arguments for the KPI report
#[derive(Args)]
pub struct KpiArgs {
    /// Path to the loan workbook (.xlsx)
    #[arg(long)]
    pub workbook: String,
}

/// Arguments for the monthly volume trend
#[derive(Args)]
pub struct TrendArgs {
    /// Path to the loan workbook (.xlsx)
    #[arg(long)]
    pub workbook: String,
}

/// Arguments for the dealer ranking
#[derive(Args)]
pub struct DealersArgs {
    /// Path to the loan workbook (.xlsx)
    #[arg(long)]
    pub workbook: String,

    /// Number of leading dealers to keep (0 keeps the full ranking)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

pub fn run_kpis(args: KpiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = input::resolve_workbook(&args.workbook)?;
    let loaded = workbook::load_workbook(&path)?;

    let mut report = kpi::compute_kpis(&loaded.loans);
    super::merge_warnings(&mut report, loaded.warnings);

    Ok(serde_json::to_value(report)?)
}

pub fn run_trend(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = input::resolve_workbook(&args.workbook)?;
    let loaded = workbook::load_workbook(&path)?;

    let mut report = trend::compute_monthly_trend(&loaded.loans);
    super::merge_warnings(&mut report, loaded.warnings);

    Ok(serde_json::to_value(report)?)
}

pub fn run_dealers(args: DealersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = input::resolve_workbook(&args.workbook)?;
    let loaded = workbook::load_workbook(&path)?;

    let mut report = dealers::compute_dealer_performance(&loaded.loans);
    super::merge_warnings(&mut report, loaded.warnings);

    // The engine hands back the full ranking; the cut happens here.
    if args.top > 0 {
        report.result.dealers.truncate(args.top);
    }

    Ok(serde_json::to_value(report)?)
}
