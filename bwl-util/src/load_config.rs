//! `load_config` module: loads the static YAML config — including
//! environment secret injection — into the typed CLI config.
//!
//! This is the only place where untrusted YAML is parsed and mapped to rich,
//! strongly-typed internal structs. Keys are kebab-case (`root-url`,
//! `artefact-reporting-client-id`, ...). Client secrets
//! may be kept out of the file entirely and injected from the environment
//! (`BWL_REPORTING_CLIENT_ID`/`-SECRET`, `BWL_AUTHORING_CLIENT_ID`/
//! `-SECRET`); a value present in the file wins over the environment.
//!
//! All errors here use `anyhow::Error` for context-rich diagnostics,
//! surfaced at the CLI boundary.

use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{error, info};

use bwl_util_core::client::{ClientCredentials, ListingTrim};

const REPORTING_ID_VAR: &str = "BWL_REPORTING_CLIENT_ID";
const REPORTING_SECRET_VAR: &str = "BWL_REPORTING_CLIENT_SECRET";
const AUTHORING_ID_VAR: &str = "BWL_AUTHORING_CLIENT_ID";
const AUTHORING_SECRET_VAR: &str = "BWL_AUTHORING_CLIENT_SECRET";

#[derive(Debug)]
pub struct CliConfig {
    pub root_url: String,
    pub reporting: ClientCredentials,
    /// Required for the archive command only.
    pub authoring: Option<ClientCredentials>,
    pub source_space_id: Option<String>,
    pub archive_age_threshold: Option<i64>,
    /// Overrides the per-command default when set.
    pub request_concurrency: Option<NonZeroUsize>,
    pub listing_trim: ListingTrim,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct RawConfig {
        root_url: String,
        artefact_reporting_client_id: Option<String>,
        artefact_reporting_client_secret: Option<String>,
        artefact_authoring_client_id: Option<String>,
        artefact_authoring_client_secret: Option<String>,
        source_space_id: Option<String>,
        blueprint_archive_age_threshold: Option<i64>,
        request_concurrency: Option<usize>,
        listing_trim: Option<ListingTrim>,
    }

    let raw: RawConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    let reporting = credentials(
        raw.artefact_reporting_client_id,
        raw.artefact_reporting_client_secret,
        REPORTING_ID_VAR,
        REPORTING_SECRET_VAR,
    )
    .ok_or_else(|| {
        anyhow::anyhow!(
            "Reporting credentials missing: set artefact-reporting-client-id/-secret in the \
             config or {REPORTING_ID_VAR}/{REPORTING_SECRET_VAR} in the environment"
        )
    })?;
    let authoring = credentials(
        raw.artefact_authoring_client_id,
        raw.artefact_authoring_client_secret,
        AUTHORING_ID_VAR,
        AUTHORING_SECRET_VAR,
    );

    let request_concurrency = match raw.request_concurrency {
        None => None,
        Some(n) => Some(
            NonZeroUsize::new(n)
                .ok_or_else(|| anyhow::anyhow!("request-concurrency must be positive"))?,
        ),
    };

    Ok(CliConfig {
        root_url: raw.root_url,
        reporting,
        authoring,
        source_space_id: raw.source_space_id,
        archive_age_threshold: raw.blueprint_archive_age_threshold,
        request_concurrency,
        listing_trim: raw.listing_trim.unwrap_or_default(),
    })
}

/// A credential pair is complete when both halves are available, whether
/// from the file or the environment.
fn credentials(
    id: Option<String>,
    secret: Option<String>,
    id_var: &str,
    secret_var: &str,
) -> Option<ClientCredentials> {
    let client_id = id.or_else(|| env::var(id_var).ok())?;
    let client_secret = secret.or_else(|| env::var(secret_var).ok())?;
    Some(ClientCredentials {
        client_id,
        client_secret,
    })
}
