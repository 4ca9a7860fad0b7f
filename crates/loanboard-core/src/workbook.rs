use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::types::*;
use crate::ReportResult;

pub const LOAN_SHEET: &str = "Data";
pub const CHARGE_OFF_SHEET: &str = "Charge-Offs";

// Normalized header names for the "Data" sheet.
const COL_LOAN_NUMBER: &str = "LoanNumber";
const COL_ENTRY_DATE: &str = "EntryDate";
const COL_AMOUNT_APPROVED: &str = "AmountApproved";
const COL_CREDIT_SCORE: &str = "CreditScore";
const COL_CLINIC_NAME: &str = "ClinicName";

// Normalized header names for the "Charge-Offs" sheet. The source workbook
// embeds line breaks in some of these; `normalize_header` collapses them.
const COL_MONTH: &str = "Month";
const COL_UNSECURED_PCT: &str = "Unsecured Gross Charge-Offs (%)";
const COL_SECURED_PCT: &str = "Secured Gross Charge-Offs (%)";
const COL_UNSECURED_AMOUNT: &str = "Unsecured Gross Charge-Offs ($)";
const COL_SECURED_AMOUNT: &str = "Secured Gross Charge-Offs ($)";

/// Read the loan and charge-off tables from an xlsx workbook.
///
/// Fatal failures are limited to the file itself (missing, unreadable) and
/// the workbook shape (absent sheet, absent required column). Bad cell
/// values never abort the load: unparseable dates become `None` and are
/// counted into `LoadedWorkbook::warnings`.
pub fn load_workbook<P: AsRef<Path>>(path: P) -> ReportResult<LoadedWorkbook> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|e| ReportError::Workbook {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let loan_range = workbook
        .worksheet_range(LOAN_SHEET)
        .map_err(|_| ReportError::SheetNotFound(LOAN_SHEET.to_string()))?;
    let charge_off_range = workbook
        .worksheet_range(CHARGE_OFF_SHEET)
        .map_err(|_| ReportError::SheetNotFound(CHARGE_OFF_SHEET.to_string()))?;

    let mut warnings = Vec::new();
    let loans = read_loan_sheet(&loan_range, &mut warnings)?;
    let charge_offs = read_charge_off_sheet(&charge_off_range, &mut warnings)?;

    Ok(LoadedWorkbook {
        loans,
        charge_offs,
        warnings,
    })
}

/// Collapse whitespace runs (including embedded line breaks) to a single
/// space and trim, so headers match by stable identifier downstream.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Coerce a cell to a date. Accepts native Excel date/datetime cells
/// (including serial numbers) and the common string formats; anything else
/// is `None`.
pub fn parse_date(cell: &Data) -> Option<NaiveDate> {
    if let Some(dt) = cell.as_datetime() {
        return Some(dt.date());
    }
    if let Some(s) = cell.get_string() {
        let s = s.trim();
        for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y", "%d-%b-%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return Some(date);
            }
        }
    }
    None
}

/// Coerce a cell to a decimal. Numeric strings may carry currency noise
/// ("$1,250.50").
pub fn parse_decimal(cell: &Data) -> Option<Decimal> {
    match cell {
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::Float(f) => Decimal::try_from(*f).ok(),
        Data::String(s) => {
            let cleaned = s.trim().replace(['$', ','], "");
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<Decimal>().ok()
            }
        }
        _ => None,
    }
}

/// Coerce a cell to a trimmed, non-empty string. Numeric identifiers
/// (loan numbers stored as numbers) render without a trailing ".0".
pub fn parse_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Truncate a date to the first of its month.
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn column_map(header_row: &[Data]) -> HashMap<String, usize> {
    header_row
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| cell.get_string().map(|s| (normalize_header(s), idx)))
        .collect()
}

fn require_column(
    columns: &HashMap<String, usize>,
    sheet: &str,
    column: &str,
) -> ReportResult<usize> {
    columns
        .get(column)
        .copied()
        .ok_or_else(|| ReportError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.to_string(),
        })
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|cell| matches!(cell, Data::Empty))
}

fn read_loan_sheet(range: &Range<Data>, warnings: &mut Vec<String>) -> ReportResult<LoanBook> {
    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => column_map(header),
        None => HashMap::new(),
    };

    let loan_number = require_column(&columns, LOAN_SHEET, COL_LOAN_NUMBER)?;
    let entry_date = require_column(&columns, LOAN_SHEET, COL_ENTRY_DATE)?;
    let amount_approved = require_column(&columns, LOAN_SHEET, COL_AMOUNT_APPROVED)?;
    let credit_score = require_column(&columns, LOAN_SHEET, COL_CREDIT_SCORE)?;
    let clinic_name = require_column(&columns, LOAN_SHEET, COL_CLINIC_NAME)?;

    let mut records = Vec::new();
    let mut coerced_dates = 0u64;
    for row in rows {
        if is_blank_row(row) {
            continue;
        }

        let date_cell = row.get(entry_date);
        let date = date_cell.and_then(parse_date);
        if date.is_none() && date_cell.is_some_and(|cell| !matches!(cell, Data::Empty)) {
            coerced_dates += 1;
        }

        records.push(LoanRecord {
            loan_number: row.get(loan_number).and_then(parse_string).unwrap_or_default(),
            entry_date: date,
            amount_approved: row.get(amount_approved).and_then(parse_decimal),
            credit_score: row.get(credit_score).and_then(parse_decimal),
            clinic_name: row.get(clinic_name).and_then(parse_string),
        });
    }

    if coerced_dates > 0 {
        warnings.push(format!(
            "{LOAN_SHEET}: {coerced_dates} EntryDate value(s) could not be parsed and were loaded as missing"
        ));
    }
    if records.is_empty() {
        warnings.push(format!("{LOAN_SHEET}: sheet has no data rows"));
    }

    Ok(LoanBook { records })
}

fn read_charge_off_sheet(
    range: &Range<Data>,
    warnings: &mut Vec<String>,
) -> ReportResult<ChargeOffTable> {
    let mut rows = range.rows();
    let columns = match rows.next() {
        Some(header) => column_map(header),
        None => HashMap::new(),
    };

    let month = require_column(&columns, CHARGE_OFF_SHEET, COL_MONTH)?;
    let unsecured_pct = require_column(&columns, CHARGE_OFF_SHEET, COL_UNSECURED_PCT)?;
    let secured_pct = require_column(&columns, CHARGE_OFF_SHEET, COL_SECURED_PCT)?;
    let unsecured_amount = require_column(&columns, CHARGE_OFF_SHEET, COL_UNSECURED_AMOUNT)?;
    let secured_amount = require_column(&columns, CHARGE_OFF_SHEET, COL_SECURED_AMOUNT)?;

    let mut records = Vec::new();
    let mut coerced_months = 0u64;
    for row in rows {
        if is_blank_row(row) {
            continue;
        }

        let month_cell = row.get(month);
        let month_value = month_cell.and_then(parse_date).map(month_floor);
        if month_value.is_none() && month_cell.is_some_and(|cell| !matches!(cell, Data::Empty)) {
            coerced_months += 1;
        }

        records.push(ChargeOffRecord {
            month: month_value,
            unsecured_pct: row.get(unsecured_pct).and_then(parse_decimal),
            secured_pct: row.get(secured_pct).and_then(parse_decimal),
            unsecured_amount: row.get(unsecured_amount).and_then(parse_decimal),
            secured_amount: row.get(secured_amount).and_then(parse_decimal),
        });
    }

    if coerced_months > 0 {
        warnings.push(format!(
            "{CHARGE_OFF_SHEET}: {coerced_months} Month value(s) could not be parsed and were loaded as missing"
        ));
    }
    if records.is_empty() {
        warnings.push(format!("{CHARGE_OFF_SHEET}: sheet has no data rows"));
    }

    Ok(ChargeOffTable { records })
}
