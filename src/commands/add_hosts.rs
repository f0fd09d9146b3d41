use crate::api::QualysClient;
use crate::input::read_hostnames;
use crate::uploader::{BatchUploader, RunOutcome, Sleeper, UploadReport};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AddHostsOptions {
    pub group_id: String,
    pub hostnames_file: PathBuf,
    /// Skip the title confirmation
    pub assume_yes: bool,
    /// Where to write the JSON run report, if anywhere
    pub report_path: Option<PathBuf>,
}

/// Bulk-add the hostnames in `options.hostnames_file` to an asset group.
///
/// The hostname list is read before anything is sent. `confirm` is called
/// with the asset group title unless `assume_yes` is set; returning `false`
/// ends the command with `Ok(None)`.
pub fn run<S, F>(
    client: &mut QualysClient,
    uploader: &mut BatchUploader<S>,
    options: &AddHostsOptions,
    confirm: F,
) -> Result<Option<UploadReport>>
where
    S: Sleeper,
    F: FnOnce(&str) -> io::Result<bool>,
{
    let hostnames = read_hostnames(&options.hostnames_file)?;
    info!(
        file = %options.hostnames_file.display(),
        count = hostnames.len(),
        "Loaded hostnames"
    );

    let title = client
        .asset_group_title(&options.group_id)
        .with_context(|| format!("Failed to look up asset group {}", options.group_id))?;
    info!(group_id = %options.group_id, %title, "Resolved asset group");

    if !options.assume_yes && !confirm(&title).context("Failed to read confirmation")? {
        println!("Exiting without changes.");
        return Ok(None);
    }

    let report = match uploader.upload(&options.group_id, &hostnames, client) {
        Ok(report) => report,
        Err(err) => {
            // Earlier batches are already applied on the server
            if let Some(partial) = err.partial_report() {
                publish(partial, options)?;
            }
            return Err(err).context("Upload aborted");
        }
    };

    publish(&report, options)?;
    Ok(Some(report))
}

/// Print the summary and write the report file when one was requested
fn publish(report: &UploadReport, options: &AddHostsOptions) -> Result<()> {
    print_summary(report);

    if let Some(path) = &options.report_path {
        write_report(report, path)?;
        println!("Run report written to {}", path.display());
    }
    Ok(())
}

pub fn print_summary(report: &UploadReport) {
    for record in &report.batches {
        match record.halt_reason() {
            None => println!(
                "Batch {}/{}: added {} hostnames ({} attempt{})",
                record.number(),
                report.total_batches,
                record.items,
                record.attempts,
                if record.attempts == 1 { "" } else { "s" }
            ),
            Some(reason) => println!(
                "Batch {}/{}: failed after {} attempt{}: {}",
                record.number(),
                report.total_batches,
                record.attempts,
                if record.attempts == 1 { "" } else { "s" },
                reason
            ),
        }
    }

    match &report.outcome {
        RunOutcome::Completed => println!(
            "All {} hostnames added to asset group {} in {} batches.",
            report.total_items, report.target_id, report.total_batches
        ),
        RunOutcome::Halted { batch, .. } => println!(
            "Stopped at batch {} of {}; {} of {} hostnames were added. Later batches were not sent.",
            batch + 1,
            report.total_batches,
            report.submitted_items(),
            report.total_items
        ),
        RunOutcome::Aborted { batch, error, .. } => println!(
            "Lost contact with the server at batch {} of {} ({}); {} of {} hostnames were confirmed added. Batch {} may or may not have been applied.",
            batch + 1,
            report.total_batches,
            error,
            report.submitted_items(),
            report.total_items,
            batch + 1
        ),
    }
}

/// Write the run report as pretty JSON
pub fn write_report(report: &UploadReport, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .context("Failed to serialize run report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::ASSET_GROUP_PATH;
    use crate::config::Credentials;
    use crate::input::InputError;
    use crate::uploader::{BatchSubmitter, SubmitStatus, UploadError};
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn unreachable_client() -> QualysClient {
        // Nothing listens on the discard port; any request would fail
        QualysClient::new("http://127.0.0.1:9", Credentials::new("u", "p")).unwrap()
    }

    #[test]
    fn test_missing_hostnames_file_fails_before_network() {
        let dir = TempDir::new().unwrap();
        let options = AddHostsOptions {
            group_id: "12345".to_string(),
            hostnames_file: dir.path().join("hostnames.txt"),
            assume_yes: true,
            report_path: None,
        };

        let mut client = unreachable_client();
        let mut uploader: BatchUploader = BatchUploader::default();
        let err = run(&mut client, &mut uploader, &options, |_| Ok(true)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_empty_hostnames_file_fails_before_network() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("hostnames.txt");
        std::fs::write(&file, "\n\n").unwrap();
        let options = AddHostsOptions {
            group_id: "12345".to_string(),
            hostnames_file: file,
            assume_yes: false,
            report_path: None,
        };

        let mut client = unreachable_client();
        let mut uploader: BatchUploader = BatchUploader::default();
        let err = run(&mut client, &mut uploader, &options, |_| {
            panic!("confirmation must not be requested")
        })
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::Empty(_))
        ));
    }

    #[test]
    fn test_write_report_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let mut uploader = BatchUploader::new(2, 5, Duration::from_secs(1)).unwrap();
        let mut submitter = |_: &str, _: &[String]| -> Result<SubmitStatus, crate::api::ApiError> {
            Ok(SubmitStatus::Success)
        };
        let items: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let report = uploader.upload("777", &items, &mut submitter).unwrap();

        write_report(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["target_id"], "777");
        assert_eq!(json["total_batches"], 2);
        assert_eq!(json["outcome"]["outcome"], "completed");
    }

    #[test]
    fn test_client_is_a_submitter() {
        fn assert_submitter<T: BatchSubmitter>() {}
        assert_submitter::<QualysClient>();
    }

    #[test]
    fn test_lost_connection_still_reports_accepted_batches() {
        let api = MockApi::start();
        api.mount(
            Mock::given(method("POST"))
                .and(path(ASSET_GROUP_PATH))
                .and(body_string_contains("action=list"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string("<LIST><TITLE>Finance Web</TITLE></LIST>"),
                ),
        );
        api.mount(
            Mock::given(method("POST"))
                .and(body_string_contains("action=edit"))
                .respond_with(ResponseTemplate::new(200))
                .up_to_n_times(2),
        );
        // Third batch never answers within the client timeout
        api.mount(
            Mock::given(method("POST"))
                .and(body_string_contains("action=edit"))
                .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5))),
        );

        let dir = TempDir::new().unwrap();
        let file = dir.path().join("hostnames.txt");
        std::fs::write(&file, "a.example.com\nb.example.com\nc.example.com\nd.example.com\ne.example.com\n")
            .unwrap();
        let report_path = dir.path().join("report.json");
        let options = AddHostsOptions {
            group_id: "42".to_string(),
            hostnames_file: file,
            assume_yes: true,
            report_path: Some(report_path.clone()),
        };

        let mut client = api.client_with_timeout(Duration::from_millis(500));
        let mut uploader = BatchUploader::new(2, 5, Duration::from_secs(1)).unwrap();
        let err = run(&mut client, &mut uploader, &options, |_| Ok(true)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UploadError>(),
            Some(UploadError::Transport { batch: 3, .. })
        ));

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(json["outcome"]["outcome"], "aborted");
        assert_eq!(json["outcome"]["batch"], 2);
        assert_eq!(json["batches"].as_array().unwrap().len(), 2);
        assert_eq!(json["batches"][0]["status"]["state"], "succeeded");
        assert_eq!(json["batches"][1]["status"]["state"], "succeeded");
    }
}
