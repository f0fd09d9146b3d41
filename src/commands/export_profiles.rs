use crate::api::QualysClient;
use crate::export::ProfileWriter;
use crate::parser::{parse_option_profiles, ProfileScan};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

/// Default directory for exported profiles
pub const DEFAULT_OUTPUT_DIR: &str = "scan_profiles";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProfileExportSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Export every option profile to its own XML file under the writer's
/// directory.
pub fn run(client: &QualysClient, writer: &ProfileWriter) -> Result<ProfileExportSummary> {
    writer.ensure_dir()?;

    let xml = client
        .export_option_profiles()
        .context("Failed to get scan profiles")?;
    let scan = parse_option_profiles(&xml).context("Failed to parse scan profile export")?;

    let summary = write_profiles(&scan, writer);
    println!(
        "Exported {} profiles to {} ({} skipped, {} failed)",
        summary.saved,
        writer.output_dir().display(),
        summary.skipped,
        summary.failed
    );

    Ok(summary)
}

/// Save each parsed profile. A profile that cannot be written is logged and
/// does not stop the others.
pub fn write_profiles(scan: &ProfileScan, writer: &ProfileWriter) -> ProfileExportSummary {
    let mut summary = ProfileExportSummary {
        skipped: scan.skipped.len(),
        ..Default::default()
    };

    for skipped in &scan.skipped {
        warn!(reason = %skipped.reason, xml = %skipped.xml, "Skipping profile");
        println!("Skipping profile ({}): {}", skipped.reason, skipped.xml);
    }

    for profile in &scan.profiles {
        match writer.save(profile) {
            Ok(path) => {
                info!(id = %profile.id, name = %profile.name, path = %path.display(), "Saved profile");
                println!("Saved profile {} to {}", profile.name, path.display());
                summary.saved += 1;
            }
            Err(e) => {
                error!(id = %profile.id, name = %profile.name, error = %e, "Failed to save profile");
                eprintln!("Failed to save profile {}: {}", profile.name, e);
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXPORT: &str = r#"<OPTION_PROFILES>
        <OPTION_PROFILE><BASIC_INFO><ID>1</ID><GROUP_NAME>Initial Options</GROUP_NAME></BASIC_INFO></OPTION_PROFILE>
        <OPTION_PROFILE><BASIC_INFO><ID>2</ID><GROUP_NAME>Auth|Deep</GROUP_NAME></BASIC_INFO></OPTION_PROFILE>
        <OPTION_PROFILE><SCAN/></OPTION_PROFILE>
    </OPTION_PROFILES>"#;

    #[test]
    fn test_write_profiles() {
        let dir = TempDir::new().unwrap();
        let writer = ProfileWriter::new(dir.path());
        let scan = parse_option_profiles(EXPORT).unwrap();

        let summary = write_profiles(&scan, &writer);

        assert_eq!(
            summary,
            ProfileExportSummary {
                saved: 2,
                skipped: 1,
                failed: 0
            }
        );
        assert!(dir.path().join("profile_1_Initial Options.xml").is_file());
        assert!(dir.path().join("profile_2_Auth_Deep.xml").is_file());
    }

    #[test]
    fn test_write_failure_does_not_stop_export() {
        let dir = TempDir::new().unwrap();
        // Directory never created, so every save fails
        let writer = ProfileWriter::new(dir.path().join("absent"));
        let scan = parse_option_profiles(EXPORT).unwrap();

        let summary = write_profiles(&scan, &writer);

        assert_eq!(summary.saved, 0);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
    }
}
