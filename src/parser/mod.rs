mod assets;
mod error;
mod profiles;


pub use assets::{parse_assets, AssetSet};
pub use error::XmlError;
pub use profiles::{parse_option_profiles, OptionProfile, ProfileScan, SkipReason, SkippedProfile};

use roxmltree::{Document, Node, ParsingOptions};

/// Parse a response body. API responses start with a DOCTYPE pointing at
/// the DTD, so DTDs must be allowed.
pub(crate) fn parse_document(xml: &str) -> Result<Document<'_>, XmlError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// Trimmed text content of an element, `None` when absent or blank
pub(crate) fn element_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// First direct child element with the given tag
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Text of the first `TITLE` element anywhere in an asset group listing
pub fn parse_asset_group_title(xml: &str) -> Result<Option<String>, XmlError> {
    let doc = parse_document(xml)?;
    Ok(doc
        .descendants()
        .find(|n| n.has_tag_name("TITLE"))
        .and_then(element_text))
}
