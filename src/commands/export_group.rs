use crate::api::QualysClient;
use crate::export::save_assets_csv;
use crate::parser::parse_assets;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Export the DNS names, domains and IPs of one asset group to CSV.
///
/// Returns the number of rows written; zero means the group was empty and
/// no file was created.
pub fn run(client: &QualysClient, group_id: &str, output: &Path, print_xml: bool) -> Result<usize> {
    let xml = client
        .asset_group_details(group_id)
        .with_context(|| format!("Failed to retrieve asset group {} details", group_id))?;
    info!(group_id, bytes = xml.len(), "Asset group XML retrieved");

    if print_xml {
        println!("{}", xml);
    } else {
        debug!(%xml, "Asset group response");
    }

    let assets = parse_assets(&xml).context("Failed to parse asset group XML")?;
    if assets.is_empty() {
        println!("No assets found in asset group {}.", group_id);
        return Ok(0);
    }

    let rows = save_assets_csv(&assets, output)
        .with_context(|| format!("Failed to save assets to {}", output.display()))?;
    info!(
        dns = assets.dns.len(),
        domains = assets.domains.len(),
        ips = assets.ips.len(),
        "Assets exported"
    );
    println!("{} assets saved to {}", rows, output.display());

    Ok(rows)
}
