//! Notification sink abstraction.
//!
//! The session reports user-facing events (upload accepted, analysis
//! complete, errors) through a single injected [`NotificationSink`] rather
//! than a process-wide toast registry, so the controller is testable without
//! any UI runtime. The shipped [`TracingNotifier`] routes everything to the
//! log; a GUI frontend would substitute its own sink.

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A single user-facing notification event.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Raised by the intake collaborator when a non-image file is offered.
    pub fn invalid_file() -> Self {
        Self::new(
            "Invalid file type",
            "Please upload an image file (CT scan)",
            Severity::Error,
        )
    }

    /// Raised by the intake collaborator after a file passes validation.
    pub fn scan_uploaded() -> Self {
        Self::new(
            "CT Scan uploaded",
            "Your scan has been successfully uploaded and is ready for analysis.",
            Severity::Success,
        )
    }

    /// Raised when `analyze` is invoked with no image loaded.
    pub fn no_scan_loaded() -> Self {
        Self::new(
            "No scan uploaded",
            "Please upload a CT scan image first.",
            Severity::Error,
        )
    }

    /// Raised when an intent is rejected because an analysis is in flight.
    pub fn analysis_in_progress() -> Self {
        Self::new(
            "Analysis in progress",
            "Please wait for the current analysis to finish.",
            Severity::Error,
        )
    }

    pub fn analysis_complete() -> Self {
        Self::new(
            "Analysis complete",
            "Scan analysis has been completed successfully.",
            Severity::Success,
        )
    }

    pub fn analysis_failed(reason: &str) -> Self {
        Self::new(
            "Analysis failed",
            format!("The scan could not be analyzed: {reason}"),
            Severity::Error,
        )
    }

    pub fn all_cleared() -> Self {
        Self::new(
            "All cleared",
            "Scan data and analysis results have been cleared.",
            Severity::Info,
        )
    }
}

/// Receiver for session notifications. Implementations must be cheap and
/// non-blocking; the session calls this inline on every surfaced event.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink that writes notifications to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error => tracing::error!(
                title = %notification.title,
                "{}",
                notification.description
            ),
            Severity::Success | Severity::Info => tracing::info!(
                title = %notification.title,
                "{}",
                notification.description
            ),
        }
    }
}
