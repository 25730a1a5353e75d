/// Collector module
///
/// This module groups all logic responsible for:
/// - Starting one fetch task per requested collection
/// - Collecting task outcomes at a single merge point
/// - Applying the failure policy across collections
///
/// The collector layer acts as the orchestration layer between:
/// - The listing source (network I/O)
/// - The output sink (file export in `main`)
///
/// Design notes:
/// - Marketplace-specific logic MUST NOT live here
/// - Tasks never share mutable state; only the merge loop appends
pub mod runner;

pub use runner::{FailurePolicy, run_collections};
