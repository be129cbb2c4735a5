// Session module
//
// This module provides the ScanSession controller which wraps SessionState
// with thread-safe access using Arc<RwLock<T>>, emits change events for
// render layers, and orchestrates the analysis gateway.

use crate::metrics::Metrics;
use crate::models::{AnalysisReport, AnalysisStatus, ImageHandle, SessionState};
use crate::notify::{Notification, NotificationSink};
use crate::services::gateway::{AnalysisGateway, GatewayError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;

/// Errors surfaced by the session intents.
///
/// None of these is fatal: every error path leaves the session in an
/// interactive, consistent state.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no scan image loaded")]
    NoImage,

    #[error("an analysis is already in progress")]
    AnalysisInProgress,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// What `select_image` does while an analysis is in flight.
///
/// The page this replaces left the combination unguarded; the policy makes the
/// choice explicit and configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReselectPolicy {
    /// Reject the new selection with an error notification
    Reject,

    /// Accept the new image; the in-flight result is discarded when it lands
    #[default]
    Replace,
}

/// Change events emitted when session state is modified.
///
/// Render layers subscribe to these instead of polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// A new scan was selected; any previous run's artifacts are gone
    ImageSelected { image: ImageHandle },

    /// The session entered `Analyzing`
    AnalysisStarted,

    /// The session entered `Complete` with a populated result set
    AnalysisCompleted { result_count: usize },

    /// The gateway failed; the session is back in `Idle`
    AnalysisFailed { reason: String },

    /// Everything was reset
    SessionCleared,
}

/// The upload/analyze/display controller.
///
/// Owns the three pieces of session state (original image, processed image,
/// result set) plus the [`AnalysisStatus`], and exposes the three intents:
/// [`select_image`](Self::select_image), [`analyze`](Self::analyze) and
/// [`clear`](Self::clear). All collaborators are injected:
///
/// - the [`AnalysisGateway`] performing the actual analysis
/// - the [`NotificationSink`] receiving user-facing notifications
///
/// # Sequencing
///
/// Intents are expected to run on one logical thread; `analyze` is the only
/// suspending operation and suspension happens at the gateway call. The lock
/// is never held across an await. A second `analyze` while one is in flight is
/// rejected with [`SessionError::AnalysisInProgress`]; `select_image` during
/// an analysis follows the configured [`ReselectPolicy`]. Stale completions
/// are detected through the state epoch and discarded, so `clear` and
/// `select_image` win against an in-flight analysis.
pub struct ScanSession {
    /// The session state protected by RwLock for thread-safe access
    state: Arc<RwLock<SessionState>>,

    /// Broadcast channel for emitting change events
    event_tx: broadcast::Sender<SessionEvent>,

    gateway: Arc<dyn AnalysisGateway>,
    notifier: Arc<dyn NotificationSink>,
    policy: ReselectPolicy,
    metrics: Arc<Metrics>,
}

impl ScanSession {
    /// Create a session with the default reselect policy.
    pub fn new(gateway: Arc<dyn AnalysisGateway>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self::with_policy(gateway, notifier, ReselectPolicy::default())
    }

    pub fn with_policy(
        gateway: Arc<dyn AnalysisGateway>,
        notifier: Arc<dyn NotificationSink>,
        policy: ReselectPolicy,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            event_tx,
            gateway,
            notifier,
            policy,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Get a read-only snapshot of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Subscribe to change events. Multiple subscribers can listen
    /// simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Load a new scan into the session.
    ///
    /// Sets the original image, clears the processed image and results from
    /// any previous run and returns the status to `Idle`. While an analysis is
    /// in flight the configured [`ReselectPolicy`] decides between rejecting
    /// the selection and replacing the image (discarding the in-flight result
    /// when it lands).
    pub fn select_image(&self, handle: ImageHandle) -> Result<(), SessionError> {
        let analyzing = self.read(|s| s.status == AnalysisStatus::Analyzing);
        if analyzing && self.policy == ReselectPolicy::Reject {
            tracing::warn!(image = %handle, "image selection rejected while analyzing");
            self.notifier.notify(Notification::analysis_in_progress());
            return Err(SessionError::AnalysisInProgress);
        }

        tracing::info!(image = %handle, "scan selected");
        self.metrics.record_image_selected();
        self.update(|s| s.select_image(handle));
        Ok(())
    }

    /// Run one analysis of the currently loaded scan.
    ///
    /// Preconditions: an image is loaded (`SessionError::NoImage` otherwise,
    /// surfaced as an error notification with no state change) and no other
    /// analysis is in flight (`SessionError::AnalysisInProgress`). On success
    /// the processed image and results are populated and the status becomes
    /// `Complete`; on gateway failure the status returns to `Idle` with no
    /// results and an error notification, never a stuck `Analyzing` state.
    pub async fn analyze(&self) -> Result<(), SessionError> {
        let (image, status, epoch) =
            self.read(|s| (s.original_image.clone(), s.status, s.epoch));

        let Some(image) = image else {
            tracing::warn!("analyze requested with no scan loaded");
            self.notifier.notify(Notification::no_scan_loaded());
            return Err(SessionError::NoImage);
        };

        if status == AnalysisStatus::Analyzing {
            tracing::warn!("analyze requested while already analyzing");
            self.notifier.notify(Notification::analysis_in_progress());
            return Err(SessionError::AnalysisInProgress);
        }

        self.update(|s| s.begin_analysis());
        tracing::info!(image = %image, "analysis started");

        match self.gateway.analyze(&image).await {
            Ok(report) => {
                // A selection or clear that happened while we were suspended
                // bumped the epoch; this result belongs to the old image.
                let events = self.update(|s| {
                    if s.epoch == epoch {
                        s.complete_analysis(report);
                    }
                });

                let applied = events
                    .iter()
                    .any(|e| matches!(e, SessionEvent::AnalysisCompleted { .. }));

                if applied {
                    self.metrics.record_analysis_completed();
                    self.notifier.notify(Notification::analysis_complete());
                    tracing::info!("analysis complete");
                } else {
                    tracing::debug!("stale analysis result discarded");
                }
                Ok(())
            }
            Err(e) => {
                self.update(|s| {
                    if s.epoch == epoch {
                        s.fail_analysis();
                    }
                });
                self.metrics.record_analysis_failed();

                let reason = e.to_string();
                self.notifier.notify(Notification::analysis_failed(&reason));
                self.emit(SessionEvent::AnalysisFailed { reason });
                tracing::error!(error = %e, "analysis failed");
                Err(e.into())
            }
        }
    }

    /// Reset the session, unconditionally. Idempotent; also discards the
    /// effect of any analysis still in flight.
    pub fn clear(&self) {
        tracing::info!("session cleared");
        self.metrics.record_session_cleared();
        self.update(|s| s.clear());
        self.emit(SessionEvent::SessionCleared);
        self.notifier.notify(Notification::all_cleared());
    }

    /// Update the state and emit change events.
    ///
    /// Captures the old state, applies the update function, diffs the two and
    /// broadcasts the resulting events.
    fn update<F>(&self, update_fn: F) -> Vec<SessionEvent>
    where
        F: FnOnce(&mut SessionState),
    {
        let events = {
            let mut state = self.state.write().unwrap();
            let old_state = state.clone();
            update_fn(&mut state);
            debug_assert!(state.is_consistent());
            Self::detect_changes(&old_state, &state)
        };

        self.metrics.record_state_update();
        for event in &events {
            self.emit(event.clone());
        }
        events
    }

    fn emit(&self, event: SessionEvent) {
        // Ignore send errors - it's OK if no one is listening
        self.metrics.record_event_broadcast();
        if self.event_tx.send(event).is_err() {
            self.metrics.record_broadcast_error();
        }
    }

    /// Detect what changed between two states and generate events.
    fn detect_changes(old: &SessionState, new: &SessionState) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if old.original_image != new.original_image {
            if let Some(image) = &new.original_image {
                events.push(SessionEvent::ImageSelected {
                    image: image.clone(),
                });
            }
        }

        if old.status != new.status {
            match new.status {
                AnalysisStatus::Analyzing => events.push(SessionEvent::AnalysisStarted),
                AnalysisStatus::Complete => events.push(SessionEvent::AnalysisCompleted {
                    result_count: new.results.as_ref().map_or(0, AnalysisReport::len),
                }),
                // Failure and reset transitions emit their own events
                AnalysisStatus::Idle => {}
            }
        }

        events
    }
}

// Make ScanSession cloneable for sharing across tasks
impl Clone for ScanSession {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            event_tx: self.event_tx.clone(),
            gateway: Arc::clone(&self.gateway),
            notifier: Arc::clone(&self.notifier),
            policy: self.policy,
            metrics: Arc::clone(&self.metrics),
        }
    }
}
