//! # Domain Entities
//!
//! The "Nouns" of the application: the typed cell values a query produces,
//! the result set handed to the exporter, and the per-job report handed back
//! to the console.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// A single typed field value within one result row.
///
/// Rows are transient: read once from the cursor, converted to text, and
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL; renders as an empty field.
    Null,
    Bool(bool),
    Int(i64),
    /// Floating-point column; renders with at most two fractional digits.
    Float(f64),
    /// Fixed-point numeric column; renders with its full precision.
    Decimal(Decimal),
    Date(NaiveDate),
    /// Only the calendar date survives formatting.
    Timestamp(NaiveDateTime),
    Text(String),
    /// Binary column; renders as standard Base64.
    Bytes(Vec<u8>),
}

/// The complete result of one export query: ordered column names plus rows.
///
/// Every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// The "Report Card" for one finished job, used for the final summary.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub job: String,
    /// Data rows written, header excluded.
    pub rows: u64,
    /// Size of the uploaded file in bytes.
    pub bytes: u64,
    /// Wall-clock seconds for export plus upload.
    pub duration: f64,
}
