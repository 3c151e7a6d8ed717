//! Typed errors for loading and lookups.

use crate::domain::Asn;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems reading an `ASN,Entity` CSV file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {} at line {line}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing the '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("invalid ASN '{value}' in {} at line {line}", .path.display())]
    InvalidAsn { path: PathBuf, line: u64, value: String },
}

/// Why a lookup produced no name. Never escapes the resolver as an `Err`.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for ASN {asn} failed: {source}")]
    Transport {
        asn: Asn,
        #[source]
        source: reqwest::Error,
    },

    #[error("lookup for ASN {asn} returned HTTP {status}")]
    Status { asn: Asn, status: u16 },

    #[error("lookup for ASN {asn} returned a body that is not UTF-8: {source}")]
    Decode {
        asn: Asn,
        #[source]
        source: std::string::FromUtf8Error,
    },
}
