//! Process-wide counters shown on the status endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
struct Processed {
    count: u64,
    last_at: Option<DateTime<Utc>>,
}

/// Shared between the coordinator (writer), the gateway `ready` handler and
/// the status server (readers).
#[derive(Debug)]
pub struct PipelineStats {
    started: Instant,
    ready: AtomicBool,
    processed: Mutex<Processed>,
}

/// Point-in-time view, serialized as the body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub bot_ready: bool,
    pub uptime_seconds: u64,
    pub meetings_processed: u64,
    pub last_processed_at: Option<DateTime<Utc>>,
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            ready: AtomicBool::new(false),
            processed: Mutex::new(Processed::default()),
        }
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Records one completed run. Count and timestamp change together.
    pub fn record_success(&self, at: DateTime<Utc>) {
        let mut processed = self
            .processed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        processed.count += 1;
        processed.last_at = Some(at);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let processed = *self
            .processed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        StatsSnapshot {
            bot_ready: self.ready.load(Ordering::Acquire),
            uptime_seconds: self.started.elapsed().as_secs(),
            meetings_processed: processed.count,
            last_processed_at: processed.last_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn fresh_stats_are_empty_and_not_ready() {
        let snapshot = PipelineStats::new().snapshot();
        assert!(!snapshot.bot_ready);
        assert_eq!(snapshot.meetings_processed, 0);
        assert!(snapshot.last_processed_at.is_none());
    }

    #[test]
    fn record_success_updates_count_and_timestamp() {
        let stats = PipelineStats::new();
        let first = Utc.with_ymd_and_hms(2026, 2, 13, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 2, 13, 10, 30, 0).unwrap();

        stats.record_success(first);
        stats.record_success(second);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.meetings_processed, 2);
        assert_eq!(snapshot.last_processed_at, Some(second));
    }

    #[test]
    fn mark_ready_is_visible_in_snapshot() {
        let stats = PipelineStats::new();
        stats.mark_ready();
        assert!(stats.snapshot().bot_ready);
    }

    #[test]
    fn concurrent_successes_are_all_counted() {
        let stats = std::sync::Arc::new(PipelineStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        stats.record_success(Utc::now());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.snapshot().meetings_processed, 200);
    }
}
