//! Sparse per-partition window cache over the paged session API.
//!
//! Each partition (one runner, or the unscoped collection) owns a sparse
//! position-ordered map of summaries plus the last total reported by the
//! upstream. A requested window is served by fetching each maximal
//! contiguous gap inside it with a single upstream page request, so the
//! number of round trips is bounded by the number of disjoint missing
//! regions rather than the number of missing positions.
//!
//! Failed or short fetches leave permanent gaps: the scan always advances
//! past a probed run, so repeated calls for the same window never amplify
//! upstream load.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use benchview_core::{BenchviewResult, Position, SessionPage, SummaryRecord};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::source::SessionSource;

/// Identifies one independently paginated collection.
///
/// Distinct partitions have independent position spaces and independent
/// totals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartitionKey {
    /// The unscoped "all sessions" collection.
    All,
    /// Sessions submitted by one runner.
    Runner(String),
}

impl PartitionKey {
    /// Normalize an optional runner id the way callers pass it: `None` or a
    /// blank string selects the unscoped collection.
    pub fn from_runner_id(runner_id: Option<&str>) -> Self {
        match runner_id {
            Some(id) if !id.trim().is_empty() => Self::Runner(id.to_string()),
            _ => Self::All,
        }
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Runner(id) => write!(f, "runner:{}", id),
        }
    }
}

/// Cached state of one partition: populated positions plus the last known
/// total. Positions, once populated, are never overwritten or removed
/// except by a full flush.
#[derive(Debug, Default)]
struct PartitionState {
    records: BTreeMap<Position, SummaryRecord>,
    total: usize,
}

#[derive(Default)]
struct Partition {
    // Held across the whole scan-and-fill sequence, so concurrent window
    // requests against one partition cannot probe the same gap twice.
    state: Mutex<PartitionState>,
}

/// Maximal contiguous unpopulated runs within `[offset, end)`, as
/// `(start, len)` pairs in ascending order.
///
/// Pure over the populated key set; the fill loop issues exactly one
/// upstream fetch per returned run.
fn missing_runs<V>(
    populated: &BTreeMap<Position, V>,
    offset: Position,
    end: Position,
) -> Vec<(Position, usize)> {
    let mut runs = Vec::new();
    let mut cursor = offset;
    while cursor < end {
        if populated.contains_key(&cursor) {
            cursor += 1;
            continue;
        }
        let mut len = 1;
        while cursor + len < end && !populated.contains_key(&(cursor + len)) {
            len += 1;
        }
        runs.push((cursor, len));
        cursor += len;
    }
    runs
}

/// Sparse window cache over a [`SessionSource`].
///
/// Serves arbitrary `[offset, offset + length)` windows per partition,
/// fetching only the gaps. Upstream failures are contained: the affected
/// run stays unpopulated and the rest of the window is still served.
pub struct SparseWindowCache<S: SessionSource> {
    source: Arc<S>,
    partitions: DashMap<PartitionKey, Arc<Partition>>,
    // Bumped by flush; fills that started under an older generation discard
    // their merges instead of resurrecting pre-flush data.
    generation: AtomicU64,
}

impl<S: SessionSource> SparseWindowCache<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            partitions: DashMap::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Ensure every fetchable position in `[offset, offset + length)` is
    /// populated, then return the populated subset as `(position, record)`
    /// pairs in ascending position order, together with the partition's
    /// last known total.
    ///
    /// The result may be shorter than `length`: positions whose fetch
    /// failed, and positions past the end of the upstream collection, are
    /// simply absent. The total is `0` until a fetch for this partition
    /// first succeeds.
    pub async fn ensure_window(
        &self,
        key: &PartitionKey,
        offset: Position,
        length: usize,
    ) -> (Vec<(Position, SummaryRecord)>, usize) {
        let generation = self.generation.load(Ordering::Acquire);
        let partition = self.partition(key);
        let mut state = partition.state.lock().await;

        let end = offset.saturating_add(length);
        for (start, len) in missing_runs(&state.records, offset, end) {
            let page = match self.fetch_page(key, start, len).await {
                Ok(page) => page,
                Err(err) => {
                    warn!(partition = %key, start, len, error = %err, "window fill failed, leaving gap");
                    continue;
                }
            };

            if self.generation.load(Ordering::Acquire) != generation {
                debug!(partition = %key, "cache flushed during fill, discarding fetched page");
                break;
            }

            // A short page fills only the positions it covers; the rest of
            // the run stays a gap until some later window asks again.
            for (i, session) in page.data.iter().take(len).enumerate() {
                state.records.insert(start + i, SummaryRecord::from(session));
            }
            state.total = page.total;
        }

        let records = state
            .records
            .range(offset..end)
            .map(|(position, record)| (*position, record.clone()))
            .collect();
        (records, state.total)
    }

    /// Drop every partition and reset all totals.
    ///
    /// Safe to call concurrently with in-flight fills: the generation bump
    /// makes them discard fetched pages, and their partition states are
    /// already unlinked from the registry.
    pub fn flush(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.partitions.clear();
    }

    fn partition(&self, key: &PartitionKey) -> Arc<Partition> {
        self.partitions
            .entry(key.clone())
            .or_default()
            .value()
            .clone()
    }

    async fn fetch_page(
        &self,
        key: &PartitionKey,
        skip: usize,
        count: usize,
    ) -> BenchviewResult<SessionPage> {
        match key {
            PartitionKey::All => self.source.fetch_sessions(skip, count).await,
            PartitionKey::Runner(id) => self.source.fetch_runner_sessions(id, skip, count).await,
        }
    }
}
