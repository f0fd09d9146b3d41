use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use qualys_bulk::api::DEFAULT_BASE_URL;
use qualys_bulk::commands::add_hosts::{self, AddHostsOptions};
use qualys_bulk::commands::{export_group, export_profiles};
use qualys_bulk::input::DEFAULT_HOSTNAMES_FILE;
use qualys_bulk::uploader::{DEFAULT_BACKOFF_SECS, DEFAULT_BATCH_SIZE, DEFAULT_RETRY_CEILING};
use qualys_bulk::{logging, prompt};
use qualys_bulk::{
    ApiConfig, BatchUploader, EnvCredentials, ProfileWriter, QualysClient, StaticCredentials,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;

#[derive(Parser)]
#[command(name = "qualys-bulk", version, about = "Bulk asset group and scan profile operations for the Qualys API")]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append log lines to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ApiArgs {
    /// API base URL for your platform
    #[arg(long, env = "QUALYS_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[arg(long, env = "QUALYS_USERNAME", global = true)]
    username: Option<String>,

    #[arg(long, env = "QUALYS_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Add hostnames from a file to an asset group in batches
    AddHosts {
        /// Asset group ID; prompted for when omitted
        #[arg(long)]
        group_id: Option<String>,

        /// One hostname per line
        #[arg(long, default_value = DEFAULT_HOSTNAMES_FILE)]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Attempts per batch while rate limited
        #[arg(long, default_value_t = DEFAULT_RETRY_CEILING)]
        max_attempts: u32,

        /// Seconds to wait on a 429 without a wait header
        #[arg(long, default_value_t = DEFAULT_BACKOFF_SECS)]
        default_backoff: u64,

        /// Do not ask to confirm the asset group title
        #[arg(short, long)]
        yes: bool,

        /// Write a JSON report of every batch to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Export an asset group's DNS names, domains and IPs to CSV
    ExportGroup {
        /// Asset group ID; prompted for when omitted
        #[arg(long)]
        group_id: Option<String>,

        /// CSV file to write; prompted for when omitted
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the raw XML response
        #[arg(long)]
        print_xml: bool,
    },

    /// Export all option profiles, one XML file each
    ExportProfiles {
        #[arg(long, default_value = export_profiles::DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    // A missing .env is fine; credentials may come from flags or the shell
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let message = format!("{:#}", e);
            error!(error = %message, "Command failed");
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but did not fully succeed
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::AddHosts {
            group_id,
            file,
            batch_size,
            max_attempts,
            default_backoff,
            yes,
            report,
        } => {
            let config = build_config(&cli.api)
                .batch_size(batch_size)
                .retry_ceiling(max_attempts)
                .default_backoff_seconds(default_backoff)
                .build()?;
            let mut client = QualysClient::from_config(&config)?;
            let mut uploader = BatchUploader::from_config(&config)?;

            let options = AddHostsOptions {
                group_id: group_id_or_prompt(group_id)?,
                hostnames_file: file,
                assume_yes: yes,
                report_path: report,
            };

            let report = add_hosts::run(
                &mut client,
                &mut uploader,
                &options,
                prompt::confirm_title_stdin,
            )?;

            Ok(report.map_or(true, |r| r.is_success()))
        }
        Command::ExportGroup {
            group_id,
            output,
            print_xml,
        } => {
            let config = build_config(&cli.api).build()?;
            let client = QualysClient::from_config(&config)?;

            let group_id = group_id_or_prompt(group_id)?;
            let output = match output {
                Some(path) => path,
                None => {
                    let answer = prompt::ask_stdin(
                        "Enter the filename to save the results (with .csv extension): ",
                    )?;
                    if answer.is_empty() {
                        bail!("No output filename given");
                    }
                    PathBuf::from(answer)
                }
            };

            export_group::run(&client, &group_id, &output, print_xml)?;
            Ok(true)
        }
        Command::ExportProfiles { output_dir } => {
            let config = build_config(&cli.api).build()?;
            let client = QualysClient::from_config(&config)?;
            let writer = ProfileWriter::new(output_dir);

            let summary = export_profiles::run(&client, &writer)?;
            Ok(summary.failed == 0)
        }
    }
}

fn build_config(api: &ApiArgs) -> qualys_bulk::ApiConfigBuilder {
    let builder = ApiConfig::builder()
        .endpoint_url(&api.base_url)
        .timeout(api.timeout.map(Duration::from_secs));

    match (&api.username, &api.password) {
        (Some(username), Some(password)) => {
            builder.credentials(StaticCredentials::new(username, password))
        }
        // Let the environment provider name the missing variable
        _ => builder.credentials(EnvCredentials::default()),
    }
}

fn group_id_or_prompt(group_id: Option<String>) -> Result<String> {
    let group_id = match group_id {
        Some(id) => id.trim().to_string(),
        None => prompt::ask_stdin("Enter the Asset Group ID: ")
            .context("Failed to read the asset group ID")?,
    };

    if group_id.is_empty() {
        bail!("No asset group ID given");
    }
    Ok(group_id)
}
