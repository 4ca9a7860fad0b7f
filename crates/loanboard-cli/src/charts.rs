use std::fs;
use std::path::Path;

use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;

use loanboard_core::analytics::trend::MonthlyTrend;
use loanboard_core::types::ChargeOffTable;

const CHART_SIZE: (u32, u32) = (1000, 500);

/// Render both dashboard charts into `dir`, returning the written paths.
pub fn render_all(
    dir: &str,
    trend: &MonthlyTrend,
    charge_offs: &ChargeOffTable,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let volume_path = Path::new(dir).join("loan_volume.svg");
    render_loan_volume(&volume_path, trend)?;
    written.push(volume_path.display().to_string());

    let rates_path = Path::new(dir).join("charge_off_rates.svg");
    render_charge_off_rates(&rates_path, charge_offs)?;
    written.push(rates_path.display().to_string());

    Ok(written)
}

/// Line chart of loan volume per month (x = month, y = count).
fn render_loan_volume(path: &Path, trend: &MonthlyTrend) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = trend
        .months
        .iter()
        .map(|m| m.month.format("%Y-%m").to_string())
        .collect();
    let max_count = trend.months.iter().map(|m| m.loan_count).max().unwrap_or(0);

    let mut chart = ChartBuilder::on(&root)
        .caption("Loan Volume Over Time", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..trend.months.len().max(1), 0u64..max_count + 1)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Number of Loans")
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .draw()?;

    chart.draw_series(LineSeries::new(
        trend
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.loan_count)),
        &BLUE,
    ))?;
    chart.draw_series(
        trend
            .months
            .iter()
            .enumerate()
            .map(|(i, m)| Circle::new((i, m.loan_count), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Two overlaid line series of monthly charge-off rates, unsecured in red
/// and secured in blue.
fn render_charge_off_rates(
    path: &Path,
    charge_offs: &ChargeOffTable,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<(String, f64, f64)> = charge_offs
        .records
        .iter()
        .filter_map(|record| {
            let month = record.month?;
            Some((
                month.format("%Y-%m").to_string(),
                record
                    .unsecured_pct
                    .and_then(|rate| rate.to_f64())
                    .unwrap_or(0.0),
                record
                    .secured_pct
                    .and_then(|rate| rate.to_f64())
                    .unwrap_or(0.0),
            ))
        })
        .collect();

    let max_rate = rows
        .iter()
        .flat_map(|(_, unsecured, secured)| [*unsecured, *secured])
        .fold(0.0_f64, f64::max);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Charge-Off Rate Trends", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..rows.len().max(1), 0.0..max_rate.max(1.0) * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Charge-Off Rate (%)")
        .x_label_formatter(&|idx| {
            rows.get(*idx)
                .map(|(label, _, _)| label.clone())
                .unwrap_or_default()
        })
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            rows.iter()
                .enumerate()
                .map(|(i, (_, unsecured, _))| (i, *unsecured)),
            &RED,
        ))?
        .label("Unsecured")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .draw_series(LineSeries::new(
            rows.iter()
                .enumerate()
                .map(|(i, (_, _, secured))| (i, *secured)),
            &BLUE,
        ))?
        .label("Secured")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart.configure_series_labels().border_style(&BLACK).draw()?;

    root.present()?;
    Ok(())
}
