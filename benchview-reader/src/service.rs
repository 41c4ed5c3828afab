//! Report service facade.
//!
//! Composes the window cache, the detail cache and the runner mapper into
//! the query surface the frontend consumes.

use std::sync::Arc;

use benchview_core::{BenchviewResult, DetailRecord, RunnerInfo, SummaryRecord};
use tracing::error;

use crate::detail::DetailCache;
use crate::runner_info::runner_info;
use crate::source::SessionSource;
use crate::window::{PartitionKey, SparseWindowCache};

/// How detail and runner lookups surface upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Failures propagate as `Err`.
    #[default]
    Strict,
    /// Failures degrade to empty values (`Ok(None)` / `Ok(vec![])`) and are
    /// only logged. Callers cannot tell "missing" from "failed"; this
    /// exists as a compatibility surface and must be opted into.
    Lenient,
}

/// Facade configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub failure_policy: FailurePolicy,
    /// Page size used by [`ReportService::list_runners`].
    pub runner_page_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Strict,
            runner_page_size: 100,
        }
    }
}

/// Query surface over the session service.
///
/// Window fill failures never surface here: a failed page fetch leaves a
/// gap in the returned slice, nothing more. Only detail and runner lookups
/// report errors, governed by the configured [`FailurePolicy`].
pub struct ReportService<S: SessionSource> {
    source: Arc<S>,
    summaries: SparseWindowCache<S>,
    details: DetailCache<S>,
    config: ReaderConfig,
}

impl<S: SessionSource> ReportService<S> {
    pub fn new(source: Arc<S>, config: ReaderConfig) -> Self {
        Self {
            summaries: SparseWindowCache::new(Arc::clone(&source)),
            details: DetailCache::new(Arc::clone(&source)),
            source,
            config,
        }
    }

    /// List the first `count` summaries of the unscoped collection.
    pub async fn list_summaries(&self, count: usize) -> (Vec<SummaryRecord>, usize) {
        self.list_summaries_in(&PartitionKey::All, 0, count).await
    }

    /// List the populated summaries with positions in `[skip, skip + count)`
    /// of one partition, ascending, plus the partition's last known total.
    pub async fn list_summaries_in(
        &self,
        key: &PartitionKey,
        skip: usize,
        count: usize,
    ) -> (Vec<SummaryRecord>, usize) {
        let (entries, total) = self.summaries.ensure_window(key, skip, count).await;

        // ensure_window already returns exactly this range; re-filter by
        // position anyway so a cache bug cannot leak rows outside the
        // requested window.
        let end = skip.saturating_add(count);
        let records = entries
            .into_iter()
            .filter(|(position, _)| (skip..end).contains(position))
            .map(|(_, record)| record)
            .collect();
        (records, total)
    }

    /// Get the full report for a session id.
    ///
    /// Under [`FailurePolicy::Strict`] an upstream failure is an `Err` and
    /// `Ok(None)` does not occur; under [`FailurePolicy::Lenient`] failures
    /// collapse into `Ok(None)`.
    pub async fn get_report(&self, id: &str) -> BenchviewResult<Option<DetailRecord>> {
        match self.details.get(id).await {
            Ok(detail) => Ok(Some(detail)),
            Err(err) => match self.config.failure_policy {
                FailurePolicy::Strict => Err(err),
                FailurePolicy::Lenient => {
                    error!(id, error = %err, "report lookup failed, returning empty");
                    Ok(None)
                }
            },
        }
    }

    /// List the known runners, each mapped into its descriptor groups.
    ///
    /// Fetches a single bounded page (`runner_page_size`); not cached.
    pub async fn list_runners(&self) -> BenchviewResult<Vec<RunnerInfo>> {
        match self.source.fetch_runners(0, self.config.runner_page_size).await {
            Ok(runners) => Ok(runners.iter().map(runner_info).collect()),
            Err(err) => match self.config.failure_policy {
                FailurePolicy::Strict => Err(err),
                FailurePolicy::Lenient => {
                    error!(error = %err, "runner listing failed, returning empty");
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Clear all cached summaries, totals and details.
    ///
    /// Safe to call at any time, including concurrently with in-flight
    /// fills; those discard their results instead of repopulating.
    pub fn flush_cache(&self) {
        self.summaries.flush();
        self.details.flush();
    }
}
