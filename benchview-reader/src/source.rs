//! Upstream session source trait.
//!
//! This is the seam between the caches and the network: the REST client
//! implements it for production, tests substitute in-memory mocks.

use async_trait::async_trait;
use benchview_core::{BenchviewResult, RunnerRecord, SessionPage, SessionRecord};

/// Paged access to the remote session service.
///
/// Implementations must be thread-safe (`Send + Sync`). The caches treat
/// every failure the same way and never retry; timeout and cancellation
/// policy belongs to the implementation.
///
/// # Ordering precondition
///
/// The caches identify records by their offset in the upstream ordering.
/// Implementations must preserve a stable ordering for a given collection
/// between calls (most recent first); the caches assume but do not verify
/// this.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Fetch a page of the unscoped session collection.
    async fn fetch_sessions(&self, skip: usize, count: usize) -> BenchviewResult<SessionPage>;

    /// Fetch a page of one runner's sessions.
    ///
    /// Runner identifiers are numeric on the wire; implementations reject
    /// non-numeric ids with [`benchview_core::Error::InvalidId`].
    async fn fetch_runner_sessions(
        &self,
        runner_id: &str,
        skip: usize,
        count: usize,
    ) -> BenchviewResult<SessionPage>;

    /// Fetch a single session with its results expanded.
    async fn fetch_session_detail(&self, id: &str) -> BenchviewResult<SessionRecord>;

    /// Fetch a page of runner records.
    async fn fetch_runners(&self, skip: usize, count: usize) -> BenchviewResult<Vec<RunnerRecord>>;
}
