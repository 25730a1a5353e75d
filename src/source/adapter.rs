use crate::error::FetchError;

/// ListingSource is the abstraction layer between:
/// - The generic collector runtime
/// - The remote catalog holding the listings
///
/// An implementation performs exactly one attempt per call. There is
/// no retry or backoff at this level; a failure is handed straight
/// back to the per-collection task.
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - One instance is shared by every collection task
///
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// API root that request targets are built from.
    ///
    /// Query building happens in the collector task, so the source
    /// only receives complete targets in `fetch`.
    fn api_base(&self) -> &str;

    /// Fetches the raw body behind `target`.
    ///
    /// RETURNS:
    /// - The body bytes when the response status is 200 OK
    /// - `FetchError::Upstream` for any other status
    /// - `FetchError::Timeout` when the request budget elapses
    /// - `FetchError::Transport` for connection-level failures
    ///
    async fn fetch(&self, target: &str) -> Result<Vec<u8>, FetchError>;
}
