//! `ASN,Entity` CSV loading

use crate::domain::{Asn, Record, Registry};
use crate::error::LoadError;
use csv::StringRecord;
use std::fs::File;
use std::path::Path;

const ASN_COLUMN: &str = "ASN";
const ENTITY_COLUMN: &str = "Entity";

/// Load every row of `path` into `registry`, skipping ASNs it already holds.
///
/// Columns are looked up by header name. A row whose ASN is not an integer
/// aborts the whole load. Returns how many records were newly inserted.
pub fn load_csv(path: &Path, registry: &mut Registry) -> Result<usize, LoadError> {
    let file =
        File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv { path: path.to_path_buf(), line: 1, source })?
        .clone();
    // A zero-byte file has no header row and no data.
    if headers.is_empty() {
        return Ok(0);
    }
    let asn_idx = column_index(&headers, ASN_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn { path: path.to_path_buf(), column: ASN_COLUMN })?;
    let entity_idx = column_index(&headers, ENTITY_COLUMN).ok_or_else(|| {
        LoadError::MissingColumn { path: path.to_path_buf(), column: ENTITY_COLUMN }
    })?;

    let mut inserted = 0;
    for row in reader.records() {
        let row = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let raw_asn = row.get(asn_idx).unwrap_or("");
        let asn: Asn = raw_asn.parse().map_err(|_| LoadError::InvalidAsn {
            path: path.to_path_buf(),
            line,
            value: raw_asn.to_string(),
        })?;
        let entity = row.get(entity_idx).unwrap_or("");

        if registry.insert(Record::new(asn, entity)) {
            inserted += 1;
        } else {
            tracing::debug!("{}:{line}: duplicate ASN {asn} ignored", path.display());
        }
    }

    Ok(inserted)
}

/// Like [`load_csv`], but a missing file is treated as empty.
pub fn load_csv_if_exists(path: &Path, registry: &mut Registry) -> Result<usize, LoadError> {
    if !path.exists() {
        tracing::debug!("{} not found, nothing to merge", path.display());
        return Ok(0);
    }
    load_csv(path, registry)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim_start_matches('\u{feff}') == name)
}
