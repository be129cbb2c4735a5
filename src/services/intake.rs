use crate::models::ImageHandle;
use crate::notify::{Notification, NotificationSink};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("unsupported file type: {0}")]
    InvalidFile(String),
}

/// File-selection collaborator that stands between the picker widget and the
/// session.
///
/// Non-image inputs are rejected here, before the session ever sees them -
/// [`ScanSession`](crate::session::ScanSession) performs no file-type
/// validation itself. Both outcomes surface a notification, mirroring the
/// upload toasts of the page.
pub struct ImageIntake {
    notifier: Arc<dyn NotificationSink>,
}

impl ImageIntake {
    pub fn new(notifier: Arc<dyn NotificationSink>) -> Self {
        Self { notifier }
    }

    /// Validate a user-selected file and mint an [`ImageHandle`] for it.
    ///
    /// # Arguments
    /// * `locator` - where the bytes live (blob URL, path); stored opaquely
    /// * `mime_type` - the browser/file-dialog reported type, e.g. "image/png"
    pub fn accept(&self, locator: &str, mime_type: &str) -> Result<ImageHandle, IntakeError> {
        if !mime_type.starts_with("image/") {
            tracing::warn!(mime_type, "rejected non-image upload");
            self.notifier.notify(Notification::invalid_file());
            return Err(IntakeError::InvalidFile(mime_type.to_string()));
        }

        tracing::info!(locator, "scan accepted for analysis");
        self.notifier.notify(Notification::scan_uploaded());
        Ok(ImageHandle::new(locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    #[test]
    fn test_accepts_image_mime_types() {
        let sink = Arc::new(RecordingSink::default());
        let intake = ImageIntake::new(sink.clone());

        let handle = intake.accept("blob:scan-1", "image/png").unwrap();
        assert_eq!(handle.as_str(), "blob:scan-1");

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Success);
    }

    #[test]
    fn test_rejects_non_image() {
        let sink = Arc::new(RecordingSink::default());
        let intake = ImageIntake::new(sink.clone());

        let err = intake.accept("blob:doc-1", "application/pdf").unwrap_err();
        assert!(matches!(err, IntakeError::InvalidFile(_)));

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].severity, Severity::Error);
        assert_eq!(seen[0].title, "Invalid file type");
    }
}
