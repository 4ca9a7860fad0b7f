use calamine::Data;
use chrono::NaiveDate;
use loanboard_core::cache::WorkbookCache;
use loanboard_core::types::{ChargeOffTable, LoanBook, LoadedWorkbook};
use loanboard_core::workbook::{month_floor, normalize_header, parse_date, parse_decimal, parse_string};
use loanboard_core::ReportError;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Header normalization
// ===========================================================================

#[test]
fn test_normalize_header_collapses_embedded_line_breaks() {
    assert_eq!(
        normalize_header("Secured Gross \nCharge-Offs ($)"),
        "Secured Gross Charge-Offs ($)"
    );
}

#[test]
fn test_normalize_header_trims_and_collapses_runs() {
    assert_eq!(normalize_header("  Month "), "Month");
    assert_eq!(normalize_header("Amount\t\tApproved"), "Amount Approved");
    assert_eq!(normalize_header("Unsecured  Gross   Charge-Offs (%)"),
        "Unsecured Gross Charge-Offs (%)");
}

// ===========================================================================
// Cell coercion
// ===========================================================================

#[test]
fn test_parse_date_from_strings() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
    assert_eq!(parse_date(&Data::String("2024-01-15".to_string())), expected);
    assert_eq!(parse_date(&Data::String("1/15/2024".to_string())), expected);
    assert_eq!(parse_date(&Data::String(" 2024-01-15 ".to_string())), expected);
}

#[test]
fn test_parse_date_from_excel_serial() {
    // Excel serial 45292 is 2024-01-01
    assert_eq!(
        parse_date(&Data::Float(45292.0)),
        NaiveDate::from_ymd_opt(2024, 1, 1)
    );
}

#[test]
fn test_parse_date_garbage_is_none() {
    assert_eq!(parse_date(&Data::String("not a date".to_string())), None);
    assert_eq!(parse_date(&Data::String("2024-13-40".to_string())), None);
    assert_eq!(parse_date(&Data::Empty), None);
    assert_eq!(parse_date(&Data::Bool(true)), None);
}

#[test]
fn test_parse_decimal_variants() {
    assert_eq!(parse_decimal(&Data::Float(1250.5)), Some(dec!(1250.5)));
    assert_eq!(parse_decimal(&Data::Int(42)), Some(dec!(42)));
    assert_eq!(
        parse_decimal(&Data::String("$1,250.50".to_string())),
        Some(dec!(1250.50))
    );
    assert_eq!(parse_decimal(&Data::String("  ".to_string())), None);
    assert_eq!(parse_decimal(&Data::Empty), None);
    assert_eq!(parse_decimal(&Data::Bool(false)), None);
}

#[test]
fn test_parse_string_numeric_loan_numbers() {
    assert_eq!(parse_string(&Data::Float(100234.0)), Some("100234".to_string()));
    assert_eq!(parse_string(&Data::Int(7)), Some("7".to_string()));
    assert_eq!(parse_string(&Data::String("  L-88  ".to_string())), Some("L-88".to_string()));
    assert_eq!(parse_string(&Data::String("".to_string())), None);
    assert_eq!(parse_string(&Data::Empty), None);
}

#[test]
fn test_month_floor() {
    assert_eq!(
        month_floor(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap()),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    );
}

// ===========================================================================
// Workbook cache
// ===========================================================================

fn empty_workbook() -> LoadedWorkbook {
    LoadedWorkbook {
        loans: LoanBook::default(),
        charge_offs: ChargeOffTable::default(),
        warnings: Vec::new(),
    }
}

#[test]
fn test_cache_hits_on_unchanged_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, b"v1").unwrap();

    let mut cache = WorkbookCache::new();
    let mut loads = 0u32;

    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();
    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();

    assert_eq!(loads, 1);
}

#[test]
fn test_cache_reloads_when_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, b"v1").unwrap();

    let mut cache = WorkbookCache::new();
    let mut loads = 0u32;

    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();

    // Nanosecond mtime resolution on the test filesystem; the sleep keeps
    // the two writes from landing on the same timestamp.
    std::thread::sleep(std::time::Duration::from_millis(50));
    std::fs::write(&path, b"v2").unwrap();

    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();

    assert_eq!(loads, 2);
}

#[test]
fn test_cache_reloads_on_different_path() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.xlsx");
    let second = dir.path().join("b.xlsx");
    std::fs::write(&first, b"a").unwrap();
    std::fs::write(&second, b"b").unwrap();

    let mut cache = WorkbookCache::new();
    let mut loads = 0u32;

    for path in [&first, &second, &first] {
        cache
            .load_with(path, |_| {
                loads += 1;
                Ok(empty_workbook())
            })
            .unwrap();
    }

    // Single-entry cache: switching back to the first path reloads
    assert_eq!(loads, 3);
}

#[test]
fn test_cache_clear_forces_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    std::fs::write(&path, b"v1").unwrap();

    let mut cache = WorkbookCache::new();
    let mut loads = 0u32;

    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();
    cache.clear();
    cache
        .load_with(&path, |_| {
            loads += 1;
            Ok(empty_workbook())
        })
        .unwrap();

    assert_eq!(loads, 2);
}

#[test]
fn test_cache_missing_file_is_workbook_error() {
    let mut cache = WorkbookCache::new();
    let err = cache.load("/nonexistent/loanbook.xlsx").unwrap_err();
    assert!(matches!(err, ReportError::Workbook { .. }));
}

#[test]
fn test_load_workbook_missing_file_is_workbook_error() {
    let err = loanboard_core::workbook::load_workbook("/nonexistent/loanbook.xlsx").unwrap_err();
    assert!(matches!(err, ReportError::Workbook { .. }));
}
