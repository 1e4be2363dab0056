// src/sheet/mod.rs
pub mod resolve;

use csv::ReaderBuilder;

use crate::ingest::IngestError;

/// One parsed export: the header row exactly as written, plus every data
/// row in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    /// Column headers as present in the text, trailing spaces and all.
    /// Position 0 may be an empty string; some exports leave the leading
    /// column unlabeled.
    pub headers: Vec<String>,
    /// Each data row as one cell vector, in source order.
    pub rows: Vec<Vec<String>>,
}

/// Parse one delimited export into headers + rows.
///
/// The first record is the header row. Header text is not trimmed here:
/// alias resolution needs to see the real spelling, stray spaces included.
/// Blank lines are skipped by the reader; a mismatched column count or a
/// structurally broken record is a parse failure, never a silent
/// truncation.
pub fn parse(text: &str) -> Result<SheetTable, IngestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first?.iter().map(str::to_string).collect(),
        None => return Err(IngestError::Empty),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(SheetTable { headers, rows })
}
