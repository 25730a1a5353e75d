use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, error, warn};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    error::{CollectionError, FetchError},
    normalizer::decode_listings,
    query::{FetchOptions, build_target},
    schema::NormalizedListing,
    source::ListingSource,
};

/// What the merge point does when one collection fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first failed collection.
    #[default]
    FailFast,

    /// Record the failure and keep merging the other collections.
    KeepGoing,
}

/// Finalized result of one run.
///
/// `listings` is in completion order: whichever collection task
/// reported first contributes first. Within one collection the
/// source order is preserved.
#[derive(Debug, Default)]
pub struct AggregateReport {
    pub listings: Vec<NormalizedListing>,

    /// Collections that matched nothing under the current filters.
    pub empty_collections: Vec<String>,

    /// Collections that contributed at least one listing.
    pub with_listings: usize,

    /// Only populated under `FailurePolicy::KeepGoing`.
    pub failures: Vec<CollectionError>,

    /// Number of tasks whose outcome reached the merge point.
    pub reported: usize,
}

impl AggregateReport {
    /// One-line run summary for the final log record.
    pub fn summary(&self) -> String {
        format!(
            "reported={} with_listings={} empty={} failed={} listings={}",
            self.reported,
            self.with_listings,
            self.empty_collections.len(),
            self.failures.len(),
            self.listings.len(),
        )
    }
}

/// Terminal outcome of one collection task.
struct TaskReport {
    index: usize,
    outcome: Result<Vec<NormalizedListing>, FetchError>,
}

/// Runs one fetch + normalize pipeline per collection and merges
/// the results.
///
/// DESIGN:
/// - One spawned task per collection, no concurrency cap
/// - Each task owns its options clone and sends exactly one report
/// - The loop below is the only place results are combined
///
/// GUARANTEES:
/// - Finalizes only once every task has either reported or dropped
///   its sender, so a panicking task can never hang the merge loop
/// - A task that vanished without reporting is surfaced as
///   `FetchError::TaskAborted`, never silently skipped
///
/// Under `FailFast` the first failure is returned immediately; tasks
/// still in flight are left running and their results discarded.
pub async fn run_collections(
    source: Arc<dyn ListingSource>,
    base: &FetchOptions,
    collections: &[String],
    policy: FailurePolicy,
) -> Result<AggregateReport, CollectionError> {
    let mut report = AggregateReport::default();
    if collections.is_empty() {
        return Ok(report);
    }

    let (tx, mut rx) = mpsc::channel::<TaskReport>(collections.len());
    let mut pending: BTreeMap<usize, &str> = BTreeMap::new();

    for (index, collection) in collections.iter().enumerate() {
        pending.insert(index, collection.as_str());

        let source = source.clone();
        let opts = base.with_collection(collection);
        let tx = tx.clone();

        tokio::spawn(async move {
            debug!("[{}] fetching {}", source.name(), opts.collection);
            let outcome = fetch_collection(source.as_ref(), &opts).await;

            // Receiver is gone only after a fail-fast abort.
            let _ = tx.send(TaskReport { index, outcome }).await;
        });
    }

    // Only task clones remain, so the channel closes once all tasks end.
    drop(tx);

    while let Some(TaskReport { index, outcome }) = rx.recv().await {
        let Some(collection) = pending.remove(&index) else {
            continue;
        };
        report.reported += 1;

        match outcome {
            Ok(listings) if listings.is_empty() => {
                warn!(
                    "There are no matching listings for the collection \"{collection}\" \
                     with the current filters. This collection will be skipped."
                );
                report.empty_collections.push(collection.to_string());
            }

            Ok(listings) => {
                debug!("{collection}: {} listings", listings.len());
                report.with_listings += 1;
                report.listings.extend(listings);
            }

            Err(err) => {
                let failure = CollectionError::new(collection, err);
                error!("{failure}: {}", failure.source);
                if policy == FailurePolicy::FailFast {
                    return Err(failure);
                }
                report.failures.push(failure);
            }
        }
    }

    for (_, collection) in pending {
        let failure = CollectionError::new(collection, FetchError::TaskAborted);
        error!("{failure}: {}", failure.source);
        if policy == FailurePolicy::FailFast {
            return Err(failure);
        }
        report.failures.push(failure);
    }

    Ok(report)
}

/// Query builder → listing source → normalizer for one collection.
async fn fetch_collection(
    source: &dyn ListingSource,
    opts: &FetchOptions,
) -> Result<Vec<NormalizedListing>, FetchError> {
    let target = build_target(source.api_base(), opts)?;
    let raw = source.fetch(&target).await?;
    decode_listings(&raw)
}
