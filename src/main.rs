//! bad-asn-registry: merge, enrich and publish the bad-ASN list

use anyhow::Result;

fn main() -> Result<()> {
    bad_asn_registry::cli::run()
}
