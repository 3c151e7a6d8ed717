//! Output rendering (JSON, CSV, number list)

pub mod json;
pub mod tabular;

pub use json::render_json;
pub use tabular::{render_csv, render_numbers};

use crate::domain::Record;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Destinations for the three published artifacts.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub numbers: PathBuf,
}

/// Write JSON, then CSV, then the number list. The first failure aborts the
/// remaining writes.
pub fn write_outputs(paths: &OutputPaths, records: &[Record]) -> Result<()> {
    write_file(&paths.json, &render_json(records)?)?;
    write_file(&paths.csv, &render_csv(records)?)?;
    write_file(&paths.numbers, &render_numbers(records))?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed writing {}", path.display()))?;
    tracing::debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}
