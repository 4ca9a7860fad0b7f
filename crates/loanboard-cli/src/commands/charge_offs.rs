use clap::Args;
use serde_json::Value;

use loanboard_core::analytics::charge_offs;
use loanboard_core::workbook;

use crate::input;

/// Arguments for the charge-off report
#[derive(Args)]
pub struct ChargeOffArgs {
    /// Path to the loan workbook (.xlsx)
    #[arg(long)]
    pub workbook: String,

    /// Include the full monthly rate series in the output
    #[arg(long)]
    pub series: bool,
}

pub fn run_charge_offs(args: ChargeOffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = input::resolve_workbook(&args.workbook)?;
    let loaded = workbook::load_workbook(&path)?;

    let mut report = charge_offs::compute_charge_off_summary(&loaded.charge_offs);
    super::merge_warnings(&mut report, loaded.warnings);

    let mut value = serde_json::to_value(report)?;
    if args.series {
        value["series"] = serde_json::to_value(&loaded.charge_offs.records)?;
    }

    Ok(value)
}
