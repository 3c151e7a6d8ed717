//! CSV and plain number-list rendering.

use crate::domain::Record;
use anyhow::{Context, Result};

pub const CSV_HEADER: [&str; 2] = ["ASN", "Entity"];

/// Render the `ASN,Entity` CSV. Fields are quoted only when needed and rows
/// end in CRLF. The header row is always present.
pub fn render_csv(records: &[Record]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::with_capacity(records.len() * 32));
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([record.asn.to_string().as_str(), record.entity.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Failed flushing CSV buffer")?;
    Ok(String::from_utf8(bytes)?)
}

/// One ASN per line, always newline-terminated.
pub fn render_numbers(records: &[Record]) -> String {
    let mut out =
        records.iter().map(|r| r.asn.to_string()).collect::<Vec<_>>().join("\n");
    out.push('\n');
    out
}
