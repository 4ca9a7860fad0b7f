use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Workbook error: {path} — {reason}")]
    Workbook { path: String, reason: String },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Missing column '{column}' in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::SerializationError(e.to_string())
    }
}
