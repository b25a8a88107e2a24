//! # contract: traits and shared types at the seams of the batch pipeline
//!
//! This module defines the interfaces the orchestrator depends on, plus the
//! records and error taxonomy shared across the crate:
//!
//! - [`CatalogApi`]: the remote catalog — single-blueprint reads, the archive
//!   action and the identifier listing. Implemented by the real HTTP client
//!   ([`crate::client::BwlClient`]) and by test mocks.
//! - [`ProgressObserver`]: notified exactly once per identifier as the batch
//!   progresses, regardless of outcome.
//! - [`Clock`]: injectable time source. The metadata derivations mix naive
//!   local-date arithmetic (`age_in_days`) with timezone-aware arithmetic
//!   (`days_since_published`); both are kept as distinct operations, so the
//!   clock exposes both views.
//!
//! ## Mocking & Testing
//! The traits are annotated for `mockall` so consumers can generate
//! deterministic mocks for unit/integration tests (enabled in tests and via
//! the `test-export-mocks` feature).

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::fmt;
use thiserror::Error;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::blueprint::Blueprint;

/// Opaque token identifying one blueprint in the catalog. Unique within a
/// batch; carries no other structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlueprintId(String);

impl BlueprintId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlueprintId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One successfully processed blueprint, as it appears in the report.
/// Created once at task completion and immutable thereafter.
#[derive(Debug, Clone)]
pub struct SummaryRecord {
    pub id: BlueprintId,
    pub name: String,
    pub space: String,
    /// Last-modified timestamp, verbatim as returned by the API.
    pub last_modified: String,
    pub age_days: i64,
}

/// One blueprint that failed to process. The cause has already been logged
/// by the task that produced it; the record only carries the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub id: BlueprintId,
}

/// Failure of the token endpoint. Fatal to the whole run: no per-item work
/// is possible without a credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("access token could not be retrieved, please check your input")]
    MissingToken,
    #[error("token endpoint returned status {0}")]
    BadStatus(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Failure of a single-blueprint read. Isolated to that identifier and
/// recorded as a [`FailureRecord`]; never aborts the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("response code from BWL: {0}")]
    BadStatus(u16),
    #[error("unexpected error processing blueprint: {0}")]
    Unexpected(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Unexpected(Box::new(e))
    }
}

impl From<crate::blueprint::ExtractError> for FetchError {
    fn from(e: crate::blueprint::ExtractError) -> Self {
        FetchError::Unexpected(Box::new(e))
    }
}

/// Failure of an archive call. Logged by the task, never propagated: archive
/// failures are fire-and-forget from the batch's perspective.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("archive returned status {0}")]
    BadStatus(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Failure of the catalog listing. Fatal: without identifiers there is no
/// batch to run.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("listing returned status {0}")]
    BadStatus(u16),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// The remote catalog, seen from the pipeline: one read, one state-mutating
/// action, one listing call.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch the full record for one blueprint. Non-200 statuses surface as
    /// [`FetchError::BadStatus`]; transport and decode failures as
    /// [`FetchError::Unexpected`].
    async fn fetch_blueprint(&self, id: &BlueprintId) -> Result<Blueprint, FetchError>;

    /// Apply the archive action to one blueprint. 200 is the only success.
    async fn archive_blueprint(&self, id: &BlueprintId) -> Result<(), ActionError>;

    /// List the identifiers of all blueprints visible to the credential,
    /// optionally restricted to one space. Returned identifiers are already
    /// normalised (listing wrapper characters stripped).
    async fn list_blueprint_ids<'a>(
        &self,
        space_id: Option<&'a str>,
    ) -> Result<Vec<BlueprintId>, ListError>;
}

/// Observer notified once per identifier when its task completes, whatever
/// the outcome. Total notifications per run equal the batch size.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait ProgressObserver: Send + Sync {
    fn on_item_complete(&self);
}

/// No-op observer for library callers and tests that do not track progress.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_item_complete(&self) {}
}

/// Injectable time source. `local_today` feeds the naive local-date age
/// computation; `utc_now` feeds the timezone-aware published-days
/// computation.
pub trait Clock: Send + Sync {
    fn local_today(&self) -> NaiveDate;
    fn utc_now(&self) -> DateTime<Utc>;
}

/// The process clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
