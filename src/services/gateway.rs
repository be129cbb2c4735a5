use crate::models::{AnalysisReport, CancerType, DetectionSummary, ImageHandle};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

/// Errors that can occur while talking to an analysis backend.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("analysis backend failure: {0}")]
    Backend(String),

    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),
}

/// Boundary to the scan analysis backend.
///
/// The session only ever sees this trait, so a real model-serving integration
/// can replace the stub without touching [`ScanSession`](crate::session::ScanSession).
/// Implementations must treat every failure mode as a returned error; the
/// session maps any error to the same recovery path (back to `Idle`, error
/// notification).
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    async fn analyze(&self, image: &ImageHandle) -> Result<AnalysisReport, GatewayError>;
}

/// The reference result set: five independent probabilities and a fixed
/// positive verdict. Values are what the demo model reports for any input.
pub fn reference_report() -> AnalysisReport {
    let summary = DetectionSummary {
        detection: Some("Positive".to_string()),
        detection_type: Some("Adenocarcinoma".to_string()),
        detection_details: Some(
            "The model detected signs of lung cancer, indicating a mucus-producing glandular cells."
                .to_string(),
        ),
        confidence_score: Some(91.7),
        model_name: Some("Enhanced Hybrid CNN with Attention (Fine)".to_string()),
    };

    AnalysisReport::new(Some(summary))
        .with(CancerType::new("benign", "Benign Nodule", 0.179, "color-benign"))
        .with(CancerType::new(
            "squamous",
            "Squamous Cell Carcinoma",
            0.288,
            "color-squamous",
        ))
        .with(CancerType::new(
            "large",
            "Large Cell Carcinoma",
            0.164,
            "color-large-cell",
        ))
        .with(CancerType::new("adeno", "Adenocarcinoma", 0.317, "color-adeno"))
        .with(CancerType::new("normal", "Normal", 0.053, "color-normal"))
}

/// Stub gateway: a pure timer, not a function of the image.
///
/// Resolves after a fixed delay with [`reference_report`] regardless of input.
/// Used by the demo binary and the integration tests; a deployment would
/// register a gateway that actually calls an inference service.
pub struct FixedDelayGateway {
    delay: Duration,
}

impl FixedDelayGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelayGateway {
    /// The reference behavior simulates a two second analysis.
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl AnalysisGateway for FixedDelayGateway {
    async fn analyze(&self, image: &ImageHandle) -> Result<AnalysisReport, GatewayError> {
        tracing::debug!(image = %image, delay = ?self.delay, "stub analysis started");
        tokio::time::sleep(self.delay).await;
        Ok(reference_report())
    }
}

/// Decorator that bounds any gateway call with a deadline.
///
/// Expiry is mapped to [`GatewayError::Timeout`], which the session handles
/// exactly like any other gateway failure, so a hung backend can never leave
/// the UI stuck in `Analyzing`.
pub struct TimeoutGateway {
    inner: Arc<dyn AnalysisGateway>,
    limit: Duration,
}

impl TimeoutGateway {
    pub fn new(inner: Arc<dyn AnalysisGateway>, limit: Duration) -> Self {
        Self { inner, limit }
    }
}

#[async_trait]
impl AnalysisGateway for TimeoutGateway {
    async fn analyze(&self, image: &ImageHandle) -> Result<AnalysisReport, GatewayError> {
        timeout(self.limit, self.inner.analyze(image))
            .await
            .map_err(|_| {
                tracing::warn!(limit = ?self.limit, "gateway call timed out");
                GatewayError::Timeout(self.limit)
            })?
    }
}
