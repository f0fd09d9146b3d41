use super::{child, element_text, parse_document, XmlError};

/// One exported option (scan) profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionProfile {
    pub id: String,
    pub name: String,
    /// The OPTION_PROFILE element exactly as it appeared in the export
    pub xml: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingBasicInfo,
    MissingIdOrName,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingBasicInfo => write!(f, "missing BASIC_INFO"),
            SkipReason::MissingIdOrName => write!(f, "missing ID or GROUP_NAME"),
        }
    }
}

/// A profile left out of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProfile {
    pub reason: SkipReason,
    pub xml: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileScan {
    pub profiles: Vec<OptionProfile>,
    pub skipped: Vec<SkippedProfile>,
}

/// Split an option profile export into individual profiles.
///
/// Each OPTION_PROFILE needs a BASIC_INFO child holding ID and GROUP_NAME;
/// profiles without them are reported in [`ProfileScan::skipped`].
pub fn parse_option_profiles(xml: &str) -> Result<ProfileScan, XmlError> {
    let doc = parse_document(xml)?;
    let mut scan = ProfileScan::default();

    for profile in doc.descendants().filter(|n| n.has_tag_name("OPTION_PROFILE")) {
        let raw = xml[profile.range()].to_string();

        let Some(basic_info) = child(profile, "BASIC_INFO") else {
            scan.skipped.push(SkippedProfile {
                reason: SkipReason::MissingBasicInfo,
                xml: raw,
            });
            continue;
        };

        let id = child(basic_info, "ID").and_then(element_text);
        let name = child(basic_info, "GROUP_NAME").and_then(element_text);

        match (id, name) {
            (Some(id), Some(name)) => scan.profiles.push(OptionProfile { id, name, xml: raw }),
            _ => scan.skipped.push(SkippedProfile {
                reason: SkipReason::MissingIdOrName,
                xml: raw,
            }),
        }
    }

    Ok(scan)
}
