use super::ExportError;
use crate::parser::AssetSet;
use std::io::Write;
use std::path::Path;

/// Write `Type,Value` rows: DNS names, then domains, then IPs.
///
/// Returns the number of data rows written.
pub fn write_assets_csv<W: Write>(assets: &AssetSet, writer: W) -> Result<usize, ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["Type", "Value"])?;

    let rows = assets
        .dns
        .iter()
        .map(|v| ("DNS", v))
        .chain(assets.domains.iter().map(|v| ("Domain", v)))
        .chain(assets.ips.iter().map(|v| ("IP", v)));

    let mut count = 0;
    for (kind, value) in rows {
        out.write_record([kind, value.as_str()])?;
        count += 1;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(count)
}

/// Write the asset CSV to `path`, replacing any existing file
pub fn save_assets_csv(assets: &AssetSet, path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_assets_csv(assets, file)
}
