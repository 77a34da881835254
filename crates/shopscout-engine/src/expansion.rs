//! The expansion wave: a bounded task set that keeps broadening the
//! search until the tiered yield is met or the set is exhausted.
//!
//! The task set is the cartesian product of {scope hostnames, widening by
//! priority} × {pagination offsets} × {the first few expander queries} —
//! finite by construction, so the loop is bounded by work, never by wall
//! clock. Tasks return their own hydrated batches; a single serial
//! reducer merges each one, recomputes bands and slices, and raises the
//! stop flag once the yield threshold is reached. Tasks that have not
//! started yet observe the flag and no-op; in-flight tasks run out and
//! their results are still accepted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::{self, StreamExt};

use shopscout_extract::HydrationBatch;
use shopscout_search::MAX_PAGE_SIZE;

use crate::dedup::TargetDedup;
use crate::discovery::{DiscoveryEngine, RunState};

/// 1-based pagination offsets each query is re-issued at.
pub(crate) const EXPANSION_OFFSETS: [u32; 3] = [1, 11, 21];

/// Only the first this-many expander queries join the cartesian product.
pub(crate) const EXPANSION_QUERY_CAP: usize = 8;

/// One search × hydrate unit of the expansion wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExpansionJob {
    pub host: String,
    pub offset: u32,
    pub query: String,
}

/// Builds the full cartesian task set: hosts in priority order, then
/// offsets, then queries (capped).
pub(crate) fn build_jobs(scope: &[String], queries: &[String]) -> Vec<ExpansionJob> {
    let mut jobs = Vec::new();
    for host in scope {
        for offset in EXPANSION_OFFSETS {
            for query in queries.iter().take(EXPANSION_QUERY_CAP) {
                jobs.push(ExpansionJob {
                    host: host.clone(),
                    offset,
                    query: query.clone(),
                });
            }
        }
    }
    jobs
}

impl DiscoveryEngine {
    /// Runs the expansion wave over `jobs` with bounded concurrency,
    /// reducing each completed task into `state`.
    pub(crate) async fn run_expansion(
        &self,
        jobs: Vec<ExpansionJob>,
        image_mode: bool,
        state: &mut RunState,
    ) {
        let stop = Arc::new(AtomicBool::new(false));
        let target_dedup = Arc::clone(&state.target_dedup);

        let mut batches = stream::iter(jobs.into_iter().map(|job| {
            let stop = Arc::clone(&stop);
            let target_dedup = Arc::clone(&target_dedup);
            async move {
                self.run_job(job, image_mode, &stop, &target_dedup).await
            }
        }))
        .buffer_unordered(self.dispatch_concurrency);

        while let Some(batch) = batches.next().await {
            state.absorb(batch.products);
            if state.slices.len() >= self.min_yield && !stop.load(Ordering::Relaxed) {
                tracing::debug!(
                    tier_yield = state.slices.len(),
                    "yield threshold reached — suppressing further dispatch"
                );
                stop.store(true, Ordering::Relaxed);
            }
        }
    }

    /// One expansion task: search a single host at one offset, dedup the
    /// targets against the request-wide seen-set, hydrate what is new.
    /// Upstream failures drop the task from the yield, nothing more.
    async fn run_job(
        &self,
        job: ExpansionJob,
        image_mode: bool,
        stop: &AtomicBool,
        target_dedup: &Mutex<TargetDedup>,
    ) -> HydrationBatch {
        if stop.load(Ordering::Relaxed) {
            return HydrationBatch::default();
        }

        let scope = std::slice::from_ref(&job.host);
        let targets = match self
            .search
            .search(&job.query, MAX_PAGE_SIZE, scope, image_mode, job.offset)
            .await
        {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!(
                    host = %job.host,
                    offset = job.offset,
                    query = %job.query,
                    error = %e,
                    "expansion query failed"
                );
                return HydrationBatch::default();
            }
        };

        let fresh = target_dedup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain_new(targets);
        if fresh.is_empty() {
            return HydrationBatch::default();
        }

        self.hydrator.hydrate_batch(&fresh).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn job_set_is_the_full_cartesian_product() {
        let scope = strings(&["www.ikea.com", "www.wayfair.com"]);
        let queries = strings(&["a", "b", "c"]);
        let jobs = build_jobs(&scope, &queries);
        assert_eq!(jobs.len(), 2 * 3 * 3);
    }

    #[test]
    fn job_set_caps_queries_at_eight() {
        let scope = strings(&["www.ikea.com"]);
        let queries: Vec<String> = (0..12).map(|i| format!("query {i}")).collect();
        let jobs = build_jobs(&scope, &queries);
        assert_eq!(jobs.len(), 3 * EXPANSION_QUERY_CAP);
        assert!(jobs.iter().all(|j| j.query != "query 8"));
    }

    #[test]
    fn jobs_widen_host_first_then_offset() {
        let scope = strings(&["www.ikea.com", "www.wayfair.com"]);
        let queries = strings(&["a"]);
        let jobs = build_jobs(&scope, &queries);
        assert_eq!(jobs[0].host, "www.ikea.com");
        assert_eq!(jobs[0].offset, 1);
        assert_eq!(jobs[1].offset, 11);
        assert_eq!(jobs[2].offset, 21);
        assert_eq!(jobs[3].host, "www.wayfair.com");
    }
}
