use super::{element_text, parse_document, XmlError};

/// Hosts defined on one or more asset groups, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    pub dns: Vec<String>,
    pub domains: Vec<String>,
    /// Single IPs and IP ranges
    pub ips: Vec<String>,
}

impl AssetSet {
    pub fn is_empty(&self) -> bool {
        self.dns.is_empty() && self.domains.is_empty() && self.ips.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dns.len() + self.domains.len() + self.ips.len()
    }
}

/// Collect DNS, DOMAIN, IP and IP_RANGE values from every ASSET_GROUP.
///
/// Per group, single IPs come before ranges.
pub fn parse_assets(xml: &str) -> Result<AssetSet, XmlError> {
    let doc = parse_document(xml)?;
    let mut assets = AssetSet::default();

    for group in doc.descendants().filter(|n| n.has_tag_name("ASSET_GROUP")) {
        let texts = |tag: &'static str| {
            group
                .descendants()
                .filter(move |n| n.has_tag_name(tag))
                .filter_map(element_text)
        };

        assets.dns.extend(texts("DNS"));
        assets.domains.extend(texts("DOMAIN"));
        assets.ips.extend(texts("IP"));
        assets.ips.extend(texts("IP_RANGE"));
    }

    Ok(assets)
}
