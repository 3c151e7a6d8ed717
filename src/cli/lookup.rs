//! Lookup command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::thread;

use crate::config::Config;
use crate::domain::Asn;
use crate::enrich::{AsnResolver, HttpResolver};

#[derive(Args)]
pub struct LookupArgs {
    /// ASNs to resolve (plain numbers, e.g. 13335)
    #[arg(value_name = "ASN", required = true)]
    pub asns: Vec<String>,
}

pub fn run(config: &Config, args: LookupArgs) -> Result<()> {
    let asns = args
        .asns
        .iter()
        .map(|raw| raw.parse::<Asn>().with_context(|| format!("Invalid ASN number: {raw}")))
        .collect::<Result<Vec<_>>>()?;

    let resolver = HttpResolver::new(config.lookup.url.clone(), config.lookup.timeout())?;
    let delay = config.lookup.delay();

    for (idx, asn) in asns.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        let resolution = resolver.resolve(*asn);
        println!("{},{}", asn, resolution.entity(*asn));
    }

    Ok(())
}
