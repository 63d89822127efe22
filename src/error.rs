use std::io;

use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised before a calendar is generated, plus config file failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("calendar requires at least one batch")]
    EmptyBatches,

    #[error("batch #{index} has a blank name")]
    BlankBatch { index: usize },

    #[error("duplicate batch '{0}'")]
    DuplicateBatch(String),

    #[error("semester {semester} must have at least one lecture week")]
    ZeroLectureWeeks { semester: u8 },

    #[error("first semester start {0} leaves no room for a 52-week calendar")]
    StartDateOutOfRange(NaiveDate),

    #[error("config io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the binary encoding or writing step of an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("export io error: {0}")]
    Io(#[from] io::Error),
}
