use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use sieve_core::errors::{SieveError, Stage};

///
/// CSV reader over in-memory text. Fields are trimmed; the first row is the header.
///
/// # Arguments
/// - text: full content of the file
/// - flexible: allow rows whose field count differs from the header
///
pub(crate) fn csv_reader(text: &str, flexible: bool) -> Reader<&[u8]> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(flexible)
        .from_reader(text.as_bytes())
}

/// 1-based line of a record in its file (the header is line 1).
pub(crate) fn line_of(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

pub(crate) fn csv_error(err: csv::Error, stage: Stage) -> SieveError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    SieveError::MalformedRecord {
        stage,
        line,
        reason: err.to_string(),
    }
}

pub(crate) fn invalid_field(stage: Stage, line: usize, column: &str, value: &str) -> SieveError {
    SieveError::InvalidField {
        stage,
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}
