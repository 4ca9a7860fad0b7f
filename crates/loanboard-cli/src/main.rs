mod charts;
mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::charge_offs::ChargeOffArgs;
use commands::dashboard::DashboardArgs;
use commands::loans::{DealersArgs, KpiArgs, TrendArgs};

/// Loan portfolio and charge-off reporting
#[derive(Parser)]
#[command(
    name = "loanboard",
    version,
    about = "Loan portfolio and charge-off reporting",
    long_about = "Loads a loan workbook and renders portfolio reports with decimal \
                  precision. Supports headline KPIs, monthly volume trends, dealer \
                  rankings, charge-off summaries, and a full dashboard render with \
                  SVG charts."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full dashboard (KPIs, trend, dealers, charge-offs)
    Dashboard(DashboardArgs),
    /// Headline loan KPIs (count, approved total, average credit score)
    Kpis(KpiArgs),
    /// Loan volume by calendar month
    Trend(TrendArgs),
    /// Dealer ranking by loan volume
    Dealers(DealersArgs),
    /// Charge-off dollar totals and monthly rate series
    ChargeOffs(ChargeOffArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Dashboard(args) => commands::dashboard::run_dashboard(args),
        Commands::Kpis(args) => commands::loans::run_kpis(args),
        Commands::Trend(args) => commands::loans::run_trend(args),
        Commands::Dealers(args) => commands::loans::run_dealers(args),
        Commands::ChargeOffs(args) => commands::charge_offs::run_charge_offs(args),
        Commands::Version => {
            println!("loanboard {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
