use chrono::NaiveDate;
use loanboard_core::analytics::dealers::{compute_dealer_performance, UNKNOWN_DEALER};
use loanboard_core::types::{LoanBook, LoanRecord};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Dealer performance tests
// ===========================================================================

fn loan_for(clinic: Option<&str>, amount: Option<Decimal>) -> LoanRecord {
    LoanRecord {
        loan_number: "L-3001".to_string(),
        entry_date: NaiveDate::from_ymd_opt(2024, 2, 1),
        amount_approved: amount,
        credit_score: Some(dec!(701)),
        clinic_name: clinic.map(str::to_string),
    }
}

#[test]
fn test_dealers_counts_and_totals() {
    let loans = LoanBook {
        records: vec![
            loan_for(Some("Harbor Smiles"), Some(dec!(500))),
            loan_for(Some("Lakeside Dental"), Some(dec!(1_200))),
            loan_for(Some("Harbor Smiles"), Some(dec!(300))),
            loan_for(Some("Harbor Smiles"), None),
        ],
    };
    let output = compute_dealer_performance(&loans);
    let dealers = &output.result.dealers;

    assert_eq!(dealers.len(), 2);
    assert_eq!(dealers[0].clinic_name, "Harbor Smiles");
    assert_eq!(dealers[0].loan_count, 3);
    assert_eq!(dealers[0].total_approved, dec!(800));
    assert_eq!(dealers[1].clinic_name, "Lakeside Dental");
    assert_eq!(dealers[1].loan_count, 1);
    assert_eq!(dealers[1].total_approved, dec!(1_200));
}

#[test]
fn test_dealers_sorted_descending_by_count() {
    let loans = LoanBook {
        records: vec![
            loan_for(Some("A"), Some(dec!(10))),
            loan_for(Some("B"), Some(dec!(10))),
            loan_for(Some("B"), Some(dec!(10))),
            loan_for(Some("C"), Some(dec!(10))),
            loan_for(Some("C"), Some(dec!(10))),
            loan_for(Some("C"), Some(dec!(10))),
        ],
    };
    let output = compute_dealer_performance(&loans);

    for pair in output.result.dealers.windows(2) {
        assert!(pair[0].loan_count >= pair[1].loan_count);
    }
    assert_eq!(output.result.dealers[0].clinic_name, "C");
}

#[test]
fn test_dealers_ties_keep_first_appearance_order() {
    let loans = LoanBook {
        records: vec![
            loan_for(Some("Second Street Dental"), Some(dec!(100))),
            loan_for(Some("Alpine Orthodontics"), Some(dec!(100))),
        ],
    };
    let output = compute_dealer_performance(&loans);
    let dealers = &output.result.dealers;

    // Both count 1; first-seen wins regardless of name ordering
    assert_eq!(dealers[0].clinic_name, "Second Street Dental");
    assert_eq!(dealers[1].clinic_name, "Alpine Orthodontics");
}

#[test]
fn test_dealers_missing_clinic_grouped_as_unknown() {
    let loans = LoanBook {
        records: vec![
            loan_for(Some("Harbor Smiles"), Some(dec!(400))),
            loan_for(None, Some(dec!(250))),
            loan_for(Some("   "), Some(dec!(150))),
        ],
    };
    let output = compute_dealer_performance(&loans);
    let dealers = &output.result.dealers;

    let unknown = dealers
        .iter()
        .find(|d| d.clinic_name == UNKNOWN_DEALER)
        .expect("unknown bucket present");
    assert_eq!(unknown.loan_count, 2);
    assert_eq!(unknown.total_approved, dec!(400));

    // No rows dropped: group counts still sum to the table size
    let total: u64 = dealers.iter().map(|d| d.loan_count).sum();
    assert_eq!(total, 3);
    assert!(output.warnings.iter().any(|w| w.contains(UNKNOWN_DEALER)));
}

#[test]
fn test_dealers_full_ranking_not_truncated() {
    let records: Vec<LoanRecord> = (0..25)
        .map(|i| {
            let name = format!("Clinic {i}");
            loan_for(Some(name.as_str()), Some(dec!(100)))
        })
        .collect();
    let output = compute_dealer_performance(&LoanBook { records });

    // The engine returns every group; top-10 is the caller's cut
    assert_eq!(output.result.dealers.len(), 25);
}

#[test]
fn test_dealers_empty_book() {
    let output = compute_dealer_performance(&LoanBook::default());

    assert!(output.result.dealers.is_empty());
    assert!(output.warnings.iter().any(|w| w.contains("empty")));
}
