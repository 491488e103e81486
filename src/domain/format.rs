//! Canonical text form for typed cell values.

use crate::domain::entities::CellValue;
use crate::domain::sanitize::{clean_field, FieldDiagnostics};
use base64::{engine::general_purpose, Engine as _};

/// Calendar format used for every date and timestamp column. Time-of-day is
/// discarded: the remote consumer works on whole days.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats one cell into the text that lands in the exported file.
///
/// Dates and floats get fixed, locale-invariant forms; free-form text is run
/// through [`clean_field`]; NULL renders as the empty string.
pub fn format_cell(cell: &CellValue, diag: &dyn FieldDiagnostics) -> String {
    match cell {
        CellValue::Null => String::new(),
        CellValue::Bool(v) => v.to_string(),
        CellValue::Int(v) => v.to_string(),
        CellValue::Float(v) => format_float(*v),
        CellValue::Decimal(v) => v.to_string(),
        CellValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        CellValue::Timestamp(ts) => ts.date().format(DATE_FORMAT).to_string(),
        CellValue::Text(s) => clean_field(s, diag).into_owned(),
        CellValue::Bytes(b) => general_purpose::STANDARD.encode(b),
    }
}

/// Renders a float with at most two fractional digits, trailing zeros
/// trimmed, always using `.` as the decimal point.
pub fn format_float(value: f64) -> String {
    let mut text = format!("{:.2}", value);
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    struct Silent;

    impl FieldDiagnostics for Silent {
        fn tabs_replaced(&self, _value: &str) {}
        fn line_breaks_replaced(&self, _value: &str) {}
    }

    #[test]
    fn test_format_float_trims_to_two_digits() {
        assert_eq!(format_float(3.14159), "3.14");
        assert_eq!(format_float(5.0), "5");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(100.0), "100");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(-0.25), "-0.25");
        assert_eq!(format_float(1.999), "2");
    }

    #[test]
    fn test_format_date_has_no_time_component() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_cell(&CellValue::Date(date), &Silent), "2024-03-07");

        let ts = date.and_hms_opt(13, 45, 12).unwrap();
        assert_eq!(format_cell(&CellValue::Timestamp(ts), &Silent), "2024-03-07");
    }

    #[test]
    fn test_format_null_is_empty() {
        assert_eq!(format_cell(&CellValue::Null, &Silent), "");
    }

    #[test]
    fn test_format_scalars() {
        assert_eq!(format_cell(&CellValue::Bool(true), &Silent), "true");
        assert_eq!(format_cell(&CellValue::Int(-42), &Silent), "-42");
        assert_eq!(
            format_cell(
                &CellValue::Decimal(Decimal::from_str("1234.5600").unwrap()),
                &Silent
            ),
            "1234.5600"
        );
    }

    #[test]
    fn test_format_text_is_cleaned() {
        assert_eq!(
            format_cell(&CellValue::Text("a\tb\nc".into()), &Silent),
            "a b c"
        );
    }

    #[test]
    fn test_format_bytes_as_base64() {
        assert_eq!(
            format_cell(&CellValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]), &Silent),
            "3q2+7w=="
        );
    }
}
