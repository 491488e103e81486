//! Serialization of one result set into tab-separated text.

use crate::domain::entities::ResultSet;
use crate::domain::errors::Result;
use crate::domain::format::format_cell;
use crate::domain::sanitize::{clean_field, FieldDiagnostics};
use std::io::Write;

/// Writes `set` as tab-separated lines into `out` and returns the number of
/// data rows written.
///
/// The header line (cleaned column names) is written exactly once, before
/// the first data line, and only when at least one row exists: a zero-row
/// result produces no output at all. Fields are joined without a trailing
/// tab; lines end with `\n`.
pub fn write_tsv<W: Write>(
    set: &ResultSet,
    out: &mut W,
    diag: &dyn FieldDiagnostics,
) -> Result<u64> {
    let mut count: u64 = 0;

    for row in &set.rows {
        debug_assert_eq!(row.len(), set.columns.len());

        if count == 0 {
            let header: Vec<String> = set
                .columns
                .iter()
                .map(|name| clean_field(name, diag).into_owned())
                .collect();
            writeln!(out, "{}", header.join("\t"))?;
        }

        let fields: Vec<String> = row.iter().map(|cell| format_cell(cell, diag)).collect();
        writeln!(out, "{}", fields.join("\t"))?;
        count += 1;
    }

    Ok(count)
}
