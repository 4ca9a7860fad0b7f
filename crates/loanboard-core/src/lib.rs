pub mod analytics;
pub mod cache;
pub mod error;
pub mod types;
pub mod workbook;

pub use error::ReportError;
pub use types::*;

/// Standard result type for all fallible loanboard operations.
pub type ReportResult<T> = Result<T, ReportError>;
