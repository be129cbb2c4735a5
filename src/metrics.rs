// Performance metrics module
//
// Lightweight counters for monitoring session activity

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Session activity metrics.
///
/// Uses atomic operations for thread-safe tracking without locks. Counters are
/// collected over the session lifetime and logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Analyses that ran to completion and were applied
    pub analyses_completed: AtomicU64,

    /// Analyses that failed at the gateway
    pub analyses_failed: AtomicU64,

    /// Scans loaded into the session
    pub images_selected: AtomicU64,

    /// Explicit session resets
    pub sessions_cleared: AtomicU64,

    /// State mutations performed through the session
    pub state_updates: AtomicU64,

    /// Change events broadcast to subscribers
    pub event_broadcasts: AtomicU64,

    /// Broadcasts with no live subscriber
    pub broadcast_errors: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            analyses_completed: AtomicU64::new(0),
            analyses_failed: AtomicU64::new(0),
            images_selected: AtomicU64::new(0),
            sessions_cleared: AtomicU64::new(0),
            state_updates: AtomicU64::new(0),
            event_broadcasts: AtomicU64::new(0),
            broadcast_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_analysis_completed(&self) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_analysis_failed(&self) {
        self.analyses_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_image_selected(&self) {
        self.images_selected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_session_cleared(&self) {
        self.sessions_cleared.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_broadcast(&self) {
        self.event_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast_error(&self) {
        self.broadcast_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log a metrics summary, typically on shutdown.
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Analyses: {} completed, {} failed",
            self.analyses_completed.load(Ordering::Relaxed),
            self.analyses_failed.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Intents: {} images selected, {} clears",
            self.images_selected.load(Ordering::Relaxed),
            self.sessions_cleared.load(Ordering::Relaxed)
        );
        tracing::info!(
            "State updates: {}, broadcasts: {}, broadcast errors: {}",
            self.state_updates.load(Ordering::Relaxed),
            self.event_broadcasts.load(Ordering::Relaxed),
            self.broadcast_errors.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = Metrics::new();
        assert_eq!(metrics.analyses_completed.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.state_updates.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_increments() {
        let metrics = Metrics::new();
        metrics.record_analysis_completed();
        metrics.record_analysis_completed();
        metrics.record_analysis_failed();
        metrics.record_image_selected();

        assert_eq!(metrics.analyses_completed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.analyses_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.images_selected.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_uptime_advances() {
        let metrics = Metrics::new();
        std::thread::sleep(Duration::from_millis(5));
        assert!(metrics.uptime() >= Duration::from_millis(5));
    }
}
