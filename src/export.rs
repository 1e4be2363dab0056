// src/export.rs
use anyhow::{Context, Result};
use serde::Serialize;

/// Serialize a record set back to delimited text for download-style
/// export: one header row derived from the record shape, then one line
/// per record. Pure serialization; no filtering or reordering.
pub fn to_csv<R: Serialize>(records: &[R]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record).context("serializing record")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing export buffer: {e}"))?;
    String::from_utf8(bytes).context("export is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{InquiryRecord, InquiryStatus};

    #[test]
    fn header_row_plus_one_line_per_record() {
        let records = vec![
            InquiryRecord {
                sl: 1,
                vessel: "MV OCEAN PRIDE".to_string(),
                qtn_value: 4000.0,
                status: InquiryStatus::Won,
                ..Default::default()
            },
            InquiryRecord {
                sl: 2,
                vessel: "MV KESTREL".to_string(),
                status: InquiryStatus::Pending,
                ..Default::default()
            },
        ];

        let text = to_csv(&records).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("sl,"));
        assert!(lines[1].contains("MV OCEAN PRIDE"));
        assert!(lines[1].contains("WON"));
    }

    #[test]
    fn empty_record_set_exports_to_empty_text() {
        let records: Vec<InquiryRecord> = Vec::new();
        assert_eq!(to_csv(&records).unwrap(), "");
    }
}
