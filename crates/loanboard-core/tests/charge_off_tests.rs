use chrono::NaiveDate;
use loanboard_core::analytics::charge_offs::compute_charge_off_summary;
use loanboard_core::types::{ChargeOffRecord, ChargeOffTable};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Charge-off summary tests
// ===========================================================================

fn month_row(
    year: i32,
    month: u32,
    unsecured: Option<Decimal>,
    secured: Option<Decimal>,
) -> ChargeOffRecord {
    ChargeOffRecord {
        month: NaiveDate::from_ymd_opt(year, month, 1),
        unsecured_pct: Some(dec!(4.2)),
        secured_pct: Some(dec!(1.1)),
        unsecured_amount: unsecured,
        secured_amount: secured,
    }
}

#[test]
fn test_charge_off_totals() {
    let table = ChargeOffTable {
        records: vec![
            month_row(2024, 1, Some(dec!(10_000)), Some(dec!(2_500))),
            month_row(2024, 2, Some(dec!(12_500)), Some(dec!(3_000))),
            month_row(2024, 3, Some(dec!(9_000)), Some(dec!(1_750))),
        ],
    };
    let output = compute_charge_off_summary(&table);
    let summary = &output.result;

    assert_eq!(summary.unsecured_total, dec!(31_500));
    assert_eq!(summary.secured_total, dec!(7_250));
    assert_eq!(summary.months_reported, 3);
}

#[test]
fn test_charge_off_missing_amounts_sum_as_zero() {
    let table = ChargeOffTable {
        records: vec![
            month_row(2024, 1, Some(dec!(5_000)), None),
            month_row(2024, 2, None, Some(dec!(1_200))),
            month_row(2024, 3, None, None),
        ],
    };
    let output = compute_charge_off_summary(&table);

    assert_eq!(output.result.unsecured_total, dec!(5_000));
    assert_eq!(output.result.secured_total, dec!(1_200));
    assert_eq!(output.result.months_reported, 3);
}

#[test]
fn test_charge_off_empty_table() {
    let output = compute_charge_off_summary(&ChargeOffTable::default());
    let summary = &output.result;

    assert_eq!(summary.unsecured_total, Decimal::ZERO);
    assert_eq!(summary.secured_total, Decimal::ZERO);
    assert_eq!(summary.months_reported, 0);
    assert!(output.warnings.iter().any(|w| w.contains("empty")));
}

#[test]
fn test_charge_off_deterministic() {
    let table = ChargeOffTable {
        records: vec![
            month_row(2024, 1, Some(dec!(100.10)), Some(dec!(20.02))),
            month_row(2024, 2, Some(dec!(200.20)), Some(dec!(40.04))),
        ],
    };
    let first = compute_charge_off_summary(&table);
    let second = compute_charge_off_summary(&table);

    assert_eq!(first.result, second.result);
    assert_eq!(first.warnings, second.warnings);
}
