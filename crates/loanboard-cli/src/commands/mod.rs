pub mod charge_offs;
pub mod dashboard;
pub mod loans;

use loanboard_core::ComputationOutput;
use serde::Serialize;

/// Prepend the loader's advisories to a report's warnings so a single
/// warning list reaches the presentation layer.
pub(crate) fn merge_warnings<T: Serialize>(
    report: &mut ComputationOutput<T>,
    loader_warnings: Vec<String>,
) {
    let mut merged = loader_warnings;
    merged.append(&mut report.warnings);
    report.warnings = merged;
}
