use clap::Args;
use serde::Serialize;
use serde_json::Value;

use loanboard_core::analytics::charge_offs::{self, ChargeOffSummary};
use loanboard_core::analytics::dealers::{self, DealerPerformance};
use loanboard_core::analytics::kpi::{self, KpiSummary};
use loanboard_core::analytics::trend::{self, MonthlyTrend};
use loanboard_core::cache::WorkbookCache;
use loanboard_core::types::ChargeOffRecord;
use loanboard_core::ComputationOutput;

use crate::{charts, input};

/// Arguments for the full dashboard render
#[derive(Args)]
pub struct DashboardArgs {
    /// Path to the loan workbook (.xlsx)
    #[arg(long)]
    pub workbook: String,

    /// Directory for rendered SVG charts (charts are skipped when absent)
    #[arg(long)]
    pub charts_dir: Option<String>,

    /// Number of leading dealers to show (0 shows the full ranking)
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Serialize)]
struct DashboardDocument {
    workbook: String,
    advisories: Vec<String>,
    kpis: ComputationOutput<KpiSummary>,
    monthly_trend: ComputationOutput<MonthlyTrend>,
    dealer_performance: DealerSection,
    charge_offs: ChargeOffSection,
    charts: Vec<String>,
}

#[derive(Serialize)]
struct DealerSection {
    shown: usize,
    ranked: usize,
    report: ComputationOutput<DealerPerformance>,
}

#[derive(Serialize)]
struct ChargeOffSection {
    summary: ComputationOutput<ChargeOffSummary>,
    series: Vec<ChargeOffRecord>,
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let path = input::resolve_workbook(&args.workbook)?;

    // The cache is owned by this invocation and injected into the pipeline,
    // not held as process-wide state.
    let mut cache = WorkbookCache::new();
    let loaded = cache.load(&path)?.clone();

    let kpis = kpi::compute_kpis(&loaded.loans);
    let monthly_trend = trend::compute_monthly_trend(&loaded.loans);
    let mut dealer_report = dealers::compute_dealer_performance(&loaded.loans);
    let summary = charge_offs::compute_charge_off_summary(&loaded.charge_offs);

    let ranked = dealer_report.result.dealers.len();
    if args.top > 0 {
        dealer_report.result.dealers.truncate(args.top);
    }
    let shown = dealer_report.result.dealers.len();

    let mut chart_files = Vec::new();
    if let Some(dir) = &args.charts_dir {
        chart_files = charts::render_all(dir, &monthly_trend.result, &loaded.charge_offs)?;
    }

    let document = DashboardDocument {
        workbook: path.display().to_string(),
        advisories: loaded.warnings,
        kpis,
        monthly_trend,
        dealer_performance: DealerSection {
            shown,
            ranked,
            report: dealer_report,
        },
        charge_offs: ChargeOffSection {
            summary,
            series: loaded.charge_offs.records,
        },
        charts: chart_files,
    };

    Ok(serde_json::to_value(document)?)
}
