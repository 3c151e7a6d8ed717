//! Update command implementation

use anyhow::Result;

use crate::config::Config;
use crate::enrich::HttpResolver;
use crate::pipeline::run_update;

pub fn run(config: &Config) -> Result<()> {
    let resolver = HttpResolver::new(config.lookup.url.clone(), config.lookup.timeout())?;
    let summary = run_update(config, &resolver)?;
    tracing::debug!(?summary, "update finished");
    Ok(())
}
