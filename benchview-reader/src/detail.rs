//! Identifier-keyed memo for fully expanded report details.

use std::sync::Arc;

use benchview_core::{BenchResult, BenchviewResult, DetailRecord, SessionRecord};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::runner_info::describe_runner;
use crate::source::SessionSource;

/// Memoizing cache of [`DetailRecord`]s.
///
/// The first request for an id fetches the session from the source and maps
/// it; every later request returns the stored record without a fetch.
/// Failures propagate to the caller and are NOT memoized, so a later
/// request may retry. Concurrent requests for one unfetched id are
/// coalesced into a single upstream call by a per-id mutex.
pub struct DetailCache<S: SessionSource> {
    source: Arc<S>,
    entries: DashMap<String, Arc<Mutex<Option<DetailRecord>>>>,
}

impl<S: SessionSource> DetailCache<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            entries: DashMap::new(),
        }
    }

    /// Get the detail record for a session id, fetching it on first use.
    pub async fn get(&self, id: &str) -> BenchviewResult<DetailRecord> {
        let cell = self.entries.entry(id.to_string()).or_default().clone();
        let mut slot = cell.lock().await;

        if let Some(detail) = slot.as_ref() {
            return Ok(detail.clone());
        }

        let session = self.source.fetch_session_detail(id).await?;
        let detail = expand_session(&session);
        *slot = Some(detail.clone());
        Ok(detail)
    }

    /// Drop every memoized entry.
    pub fn flush(&self) {
        self.entries.clear();
    }
}

/// Map a wire session with expanded results into a [`DetailRecord`].
fn expand_session(session: &SessionRecord) -> DetailRecord {
    let descriptors = describe_runner(&session.runner);
    DetailRecord {
        id: session.id,
        date: session.created_at,
        user: session.runner.name.clone(),
        cpu: descriptors.cpu,
        system: descriptors.system,
        os: descriptors.os,
        container: descriptors.container,
        results: session.results.iter().map(BenchResult::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use benchview_core::{Error, ResultRecord, RunnerRecord, SessionPage, UpstreamError};
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::{Notify, Semaphore};

    fn detail_session(id: i64) -> SessionRecord {
        SessionRecord {
            id,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            runner: RunnerRecord {
                id: 4,
                name: Some("mike-barber".to_string()),
                cpu_brand: Some("Apple M1".to_string()),
                ..RunnerRecord::default()
            },
            results_count: 1,
            results: vec![ResultRecord {
                algorithm: "base".to_string(),
                implementation: "rust".to_string(),
                label: "solution_1".to_string(),
                solution: "1".to_string(),
                duration: 5.0,
                passes: 12000,
                threads: 1,
                bits: Some("1".to_string()),
                faithful: Some(true),
            }],
        }
    }

    #[derive(Default)]
    struct MockDetailSource {
        fetches: AtomicUsize,
        fail: AtomicBool,
        started: Option<Notify>,
        gate: Option<Semaphore>,
    }

    #[async_trait]
    impl SessionSource for MockDetailSource {
        async fn fetch_sessions(&self, _: usize, _: usize) -> BenchviewResult<SessionPage> {
            unimplemented!("not used by detail tests")
        }

        async fn fetch_runner_sessions(
            &self,
            _: &str,
            _: usize,
            _: usize,
        ) -> BenchviewResult<SessionPage> {
            unimplemented!("not used by detail tests")
        }

        async fn fetch_session_detail(&self, id: &str) -> BenchviewResult<SessionRecord> {
            if let Some(started) = &self.started {
                started.notify_one();
            }
            if let Some(gate) = &self.gate {
                gate.acquire().await.expect("gate closed").forget();
            }
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(Error::Upstream(UpstreamError::Status {
                    status: 502,
                    message: "bad gateway".to_string(),
                }));
            }
            Ok(detail_session(id.parse().expect("numeric id in tests")))
        }

        async fn fetch_runners(&self, _: usize, _: usize) -> BenchviewResult<Vec<RunnerRecord>> {
            unimplemented!("not used by detail tests")
        }
    }

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let source = Arc::new(MockDetailSource::default());
        let cache = DetailCache::new(Arc::clone(&source));

        let first = cache.get("42").await.unwrap();
        let second = cache.get("42").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.id, 42);
        assert_eq!(first.results.len(), 1);
        assert_eq!(first.results[0].bits, Some(1));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_is_not_memoized() {
        let source = Arc::new(MockDetailSource::default());
        let cache = DetailCache::new(Arc::clone(&source));

        source.fail.store(true, Ordering::SeqCst);
        assert!(cache.get("7").await.is_err());

        // The id was not poisoned by the failure.
        source.fail.store(false, Ordering::SeqCst);
        let detail = cache.get("7").await.unwrap();
        assert_eq!(detail.id, 7);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_coalesce_into_one_fetch() {
        let source = Arc::new(MockDetailSource {
            started: Some(Notify::new()),
            gate: Some(Semaphore::new(0)),
            ..MockDetailSource::default()
        });
        let cache = Arc::new(DetailCache::new(Arc::clone(&source)));

        let a = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("5").await })
        };
        let b = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get("5").await })
        };

        // Only the first caller reaches the source; release it once.
        source.started.as_ref().unwrap().notified().await;
        source.gate.as_ref().unwrap().add_permits(1);

        let (a, b) = (a.await.unwrap().unwrap(), b.await.unwrap().unwrap());
        assert_eq!(a, b);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_flush_forces_refetch() {
        let source = Arc::new(MockDetailSource::default());
        let cache = DetailCache::new(Arc::clone(&source));

        cache.get("3").await.unwrap();
        cache.flush();
        cache.get("3").await.unwrap();

        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
