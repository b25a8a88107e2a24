//! Bounded-concurrency batch pipeline: fan a list of blueprint identifiers
//! out over the catalog API, collect per-item successes and failures, and
//! report progress.
//!
//! # Design
//! - At most `concurrency` requests are in flight at once, enforced by a
//!   semaphore whose permit is held for the full fetch → extract → (act)
//!   sequence of one item and released unconditionally.
//! - Every identifier is processed by exactly one task and yields exactly
//!   one outcome. A failing task produces a [`FailureRecord`] for its own
//!   identifier only; sibling tasks are never cancelled.
//! - The progress observer is notified once per identifier, success or not.
//! - Outcomes are collected from the joined task results, so the two result
//!   collections are owned by the orchestrator and never shared mutably.
//! - Single attempt per identifier: no retries, no backoff, no
//!   orchestrator-level deadline. `run_batch` returns only once every
//!   identifier has an outcome; completion order is not input order.
//!
//! # Workflows
//! - [`summarise`]: fetch and derive report metadata per blueprint.
//! - [`archive_stale`]: fetch, evaluate the [`ArchivePolicy`], and archive
//!   qualifying blueprints. The archive call's own outcome is logged but
//!   deliberately invisible to the batch accounting — the success list
//!   records "evaluated", not "archived".

use futures::future::join_all;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::blueprint::Blueprint;
use crate::contract::{
    BlueprintId, CatalogApi, Clock, FailureRecord, FetchError, ProgressObserver, SummaryRecord,
};
use crate::policy::ArchivePolicy;

/// Aggregated outcome of one batch run. Exactly one entry across the two
/// collections per input identifier.
#[derive(Debug)]
pub struct BatchReport {
    pub successes: Vec<SummaryRecord>,
    pub failures: Vec<FailureRecord>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

/// Drive `per_item` over every identifier with at most `concurrency` items
/// in flight, and partition the outcomes.
pub async fn run_batch<F, Fut>(
    ids: &[BlueprintId],
    concurrency: NonZeroUsize,
    progress: &dyn ProgressObserver,
    per_item: F,
) -> BatchReport
where
    F: Fn(BlueprintId) -> Fut,
    Fut: Future<Output = Result<SummaryRecord, FailureRecord>>,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.get()));
    let per_item = &per_item;

    let tasks = ids.iter().map(|id| {
        let semaphore = Arc::clone(&semaphore);
        let id = id.clone();
        async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("batch semaphore is never closed");
            let outcome = per_item(id).await;
            progress.on_item_complete();
            outcome
        }
    });

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for outcome in join_all(tasks).await {
        match outcome {
            Ok(record) => successes.push(record),
            Err(failure) => failures.push(failure),
        }
    }
    BatchReport { successes, failures }
}

/// Fetch every blueprint and derive its report record.
pub async fn summarise<A>(
    api: &A,
    clock: &dyn Clock,
    ids: &[BlueprintId],
    concurrency: NonZeroUsize,
    progress: &dyn ProgressObserver,
) -> BatchReport
where
    A: CatalogApi + ?Sized,
{
    info!(
        count = ids.len(),
        concurrency = concurrency.get(),
        "Starting summary batch"
    );
    run_batch(ids, concurrency, progress, |id| async move {
        match evaluate_one(api, clock, &id).await {
            Ok((_, record)) => {
                debug!(
                    blueprint_id = %id,
                    space = %record.space,
                    name = %record.name,
                    "Finished processing blueprint"
                );
                Ok(record)
            }
            Err(error) => {
                log_item_failure(&id, &error);
                Err(FailureRecord { id })
            }
        }
    })
    .await
}

/// Fetch every blueprint, evaluate the archive policy, and archive the ones
/// that qualify. Success entries mean "evaluated"; a failed archive call is
/// logged and does not reclassify the item.
pub async fn archive_stale<A>(
    api: &A,
    clock: &dyn Clock,
    policy: &ArchivePolicy,
    ids: &[BlueprintId],
    concurrency: NonZeroUsize,
    progress: &dyn ProgressObserver,
) -> BatchReport
where
    A: CatalogApi + ?Sized,
{
    info!(
        count = ids.len(),
        concurrency = concurrency.get(),
        threshold_days = policy.threshold_days,
        "Starting archive batch"
    );
    run_batch(ids, concurrency, progress, |id| async move {
        let (blueprint, record) = match evaluate_one(api, clock, &id).await {
            Ok(pair) => pair,
            Err(error) => {
                log_item_failure(&id, &error);
                return Err(FailureRecord { id });
            }
        };
        if policy.qualifies(&blueprint, record.age_days) {
            debug!(
                blueprint_id = %id,
                space = %record.space,
                name = %record.name,
                age_days = record.age_days,
                "Archiving blueprint"
            );
            match api.archive_blueprint(&id).await {
                Ok(()) => debug!(blueprint_id = %id, "Archived blueprint"),
                Err(error) => {
                    warn!(blueprint_id = %id, error = %error, "Error archiving blueprint")
                }
            }
        } else {
            debug!(
                blueprint_id = %id,
                space = %record.space,
                name = %record.name,
                age_days = record.age_days,
                "Skipping blueprint"
            );
        }
        Ok(record)
    })
    .await
}

/// The ordered per-item sequence shared by both workflows: fetch, then
/// derive the report fields. Any step failing fails the whole item.
async fn evaluate_one<A>(
    api: &A,
    clock: &dyn Clock,
    id: &BlueprintId,
) -> Result<(Blueprint, SummaryRecord), FetchError>
where
    A: CatalogApi + ?Sized,
{
    let blueprint = api.fetch_blueprint(id).await?;
    let record = SummaryRecord {
        id: id.clone(),
        name: blueprint.name().to_owned(),
        space: blueprint.space_name()?.to_owned(),
        last_modified: blueprint.last_modified().to_owned(),
        age_days: blueprint.age_in_days(clock)?,
    };
    Ok((blueprint, record))
}

fn log_item_failure(id: &BlueprintId, error: &FetchError) {
    match error {
        FetchError::BadStatus(status) => {
            warn!(blueprint_id = %id, status, "Error processing blueprint")
        }
        FetchError::Unexpected(cause) => {
            error!(blueprint_id = %id, error = %cause, "Unexpected error processing blueprint")
        }
    }
}
