//! # bwl-util CLI Interface (Module)
//!
//! This module implements the CLI for bwl-util — command parsing, argument
//! validation and the per-command orchestration glue.
//!
//! All core business logic (the catalog client, metadata extraction, the
//! batch pipeline and the archive policy) lives in the `bwl-util-core`
//! crate. This module wires config, tokens, the progress bar and the CSV
//! reporter around it.
//!
//! ## How To Use
//! - For command-line users: use the installed `bwl-util` binary with
//!   `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed
//!   [`Cli`].
//!
//! When adding subcommands, update [`Commands`] below and keep all
//! non-trivial business logic inside `bwl-util-core`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use bwl_util_core::batch::{archive_stale, summarise, BatchReport};
use bwl_util_core::client::{acquire_token, BwlClient};
use bwl_util_core::config::RunSettings;
use bwl_util_core::contract::{CatalogApi, SystemClock};
use bwl_util_core::policy::ArchivePolicy;

use crate::load_config::{load_config, CliConfig};
use crate::progress::BarProgress;
use crate::report::{write_error_csv, write_summary_csv};

/// A handful of parallel reads for the extract; the archive sweep stays
/// strictly serial unless the config says otherwise.
const DEFAULT_SUMMARY_CONCURRENCY: usize = 5;
const DEFAULT_ARCHIVE_CONCURRENCY: usize = 1;

/// CLI for bwl-util: bulk metadata harvesting and archiving of Blueworks
/// Live blueprints.
#[derive(Parser)]
#[clap(
    name = "bwl-util",
    version,
    about = "Harvest blueprint metadata and archive stale blueprints in Blueworks Live"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a CSV summary of every blueprint visible to the service account
    Summary {
        /// Path to the YAML config file
        #[clap(short, long, default_value = "config.yaml")]
        config: PathBuf,
        /// Where to write the summary report
        #[clap(long, default_value = "data_file.csv")]
        output: PathBuf,
        /// Where to write the identifiers that failed to process
        #[clap(long, default_value = "error_file.csv")]
        errors: PathBuf,
    },
    /// Archive every active blueprint older than the configured age threshold
    Archive {
        /// Path to the YAML config file
        #[clap(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary {
            config,
            output,
            errors,
        } => run_summary(&config, &output, &errors).await,
        Commands::Archive { config } => run_archive(&config).await,
    }
}

async fn run_summary(config_path: &Path, output: &Path, errors: &Path) -> Result<()> {
    let started = Instant::now();
    announce("Starting BWL Summary Extract");

    let config = load_config(config_path)?;
    let settings = run_settings(&config, DEFAULT_SUMMARY_CONCURRENCY);
    settings.trace_loaded();

    let http = reqwest::Client::new();
    let reporting = acquire_token(&http, &settings.root_url, &config.reporting)
        .await
        .context("Failed to acquire reporting access token")?;
    let client = BwlClient::new(settings.root_url.as_str(), reporting)
        .with_listing_trim(settings.listing_trim);

    let ids = client
        .list_blueprint_ids(settings.source_space_id.as_deref())
        .await
        .context("Failed to list blueprints")?;
    announce(&format!("Found {} blueprints", ids.len()));

    let progress = BarProgress::new(ids.len());
    let report = summarise(&client, &SystemClock, &ids, settings.concurrency, &progress).await;
    progress.finish(report.successes.len(), report.failures.len());

    write_summary_csv(output, &report.successes)?;
    write_error_csv(errors, &report.failures)?;

    finish(started, &report);
    Ok(())
}

async fn run_archive(config_path: &Path) -> Result<()> {
    let started = Instant::now();
    announce("Starting BWL Bulk Archive");

    let config = load_config(config_path)?;
    let threshold = config
        .archive_age_threshold
        .context("blueprint-archive-age-threshold missing from config")?;
    let authoring_credentials = config.authoring.as_ref().context(
        "Authoring credentials missing: set artefact-authoring-client-id/-secret in the config \
         or the BWL_AUTHORING_* environment variables",
    )?;
    let settings = run_settings(&config, DEFAULT_ARCHIVE_CONCURRENCY);
    settings.trace_loaded();

    let http = reqwest::Client::new();
    let reporting = acquire_token(&http, &settings.root_url, &config.reporting)
        .await
        .context("Failed to acquire reporting access token")?;
    let authoring = acquire_token(&http, &settings.root_url, authoring_credentials)
        .await
        .context("Failed to acquire authoring access token")?;
    let client = BwlClient::new(settings.root_url.as_str(), reporting)
        .with_authoring_token(authoring)
        .with_listing_trim(settings.listing_trim);

    let ids = client
        .list_blueprint_ids(settings.source_space_id.as_deref())
        .await
        .context("Failed to list blueprints")?;
    announce(&format!("Found {} blueprints", ids.len()));

    let progress = BarProgress::new(ids.len());
    let report = archive_stale(
        &client,
        &SystemClock,
        &ArchivePolicy::new(threshold),
        &ids,
        settings.concurrency,
        &progress,
    )
    .await;
    progress.finish(report.successes.len(), report.failures.len());

    finish(started, &report);
    Ok(())
}

fn run_settings(config: &CliConfig, default_concurrency: usize) -> RunSettings {
    RunSettings {
        root_url: config.root_url.clone(),
        concurrency: config
            .request_concurrency
            .unwrap_or_else(|| NonZeroUsize::new(default_concurrency).unwrap_or(NonZeroUsize::MIN)),
        source_space_id: config.source_space_id.clone(),
        listing_trim: config.listing_trim,
    }
}

/// Banner lines go to stdout for the operator and to the log.
fn announce(message: &str) {
    println!("{message}");
    info!("{message}");
}

fn finish(started: Instant, report: &BatchReport) {
    println!("--- {:.2} seconds ---", started.elapsed().as_secs_f64());
    info!(
        successes = report.successes.len(),
        failures = report.failures.len(),
        elapsed_seconds = started.elapsed().as_secs_f64(),
        "Finished"
    );
}
