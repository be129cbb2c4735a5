use crate::models::results::AnalysisReport;

/// Opaque reference to displayable image bytes (a blob URL, file path, or
/// similar locator). The session never inspects the contents; file-type
/// validation happens in the intake collaborator before a handle is minted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the session is in the upload/analyze/display cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Complete,
}

/// Single source of truth for all session state.
///
/// # Thread Safety
///
/// `SessionState` is wrapped in `Arc<RwLock<SessionState>>` by
/// [`crate::session::ScanSession`]. Never mutate it directly from outside the
/// session - all transitions go through the session intents so the three state
/// fields are always sequenced together and change events are emitted.
///
/// # Invariants
///
/// - `status == Analyzing` implies `results.is_none()`
/// - `processed_image` is only ever set while `original_image` is set
/// - `results` and `processed_image` are cleared together on a new image
///   selection and on an explicit clear
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// The uploaded scan, exclusively owned by the session
    pub original_image: Option<ImageHandle>,

    /// Derived from `original_image` through a successful analysis
    pub processed_image: Option<ImageHandle>,

    pub status: AnalysisStatus,

    /// Populated only on analysis completion
    pub results: Option<AnalysisReport>,

    /// Bumped whenever the image context changes (selection or clear).
    /// An in-flight analysis captures the epoch at start and its completion is
    /// discarded if the epoch has moved on.
    pub epoch: u64,
}

impl SessionState {
    /// Replace the uploaded scan. Clears any processed image and results from
    /// a previous run and returns the session to `Idle`.
    pub fn select_image(&mut self, handle: ImageHandle) {
        self.original_image = Some(handle);
        self.processed_image = None;
        self.results = None;
        self.status = AnalysisStatus::Idle;
        self.epoch += 1;
    }

    /// Enter the `Analyzing` state. Results from a previous run are dropped so
    /// the loading view never coexists with stale data.
    pub fn begin_analysis(&mut self) {
        self.status = AnalysisStatus::Analyzing;
        self.results = None;
    }

    /// Record a successful analysis. The processed image is currently the
    /// original handle - a real pipeline would substitute an annotated image
    /// here.
    pub fn complete_analysis(&mut self, report: AnalysisReport) {
        self.processed_image = self.original_image.clone();
        self.results = Some(report);
        self.status = AnalysisStatus::Complete;
    }

    /// Recover from a gateway failure: back to an interactive `Idle` state
    /// with no results, never stuck in `Analyzing`.
    pub fn fail_analysis(&mut self) {
        self.status = AnalysisStatus::Idle;
        self.results = None;
    }

    /// Reset everything, unconditionally.
    pub fn clear(&mut self) {
        self.original_image = None;
        self.processed_image = None;
        self.results = None;
        self.status = AnalysisStatus::Idle;
        self.epoch += 1;
    }

    /// Check the structural invariants. Exercised by the property tests over
    /// arbitrary intent sequences.
    pub fn is_consistent(&self) -> bool {
        let analyzing_without_results =
            self.status != AnalysisStatus::Analyzing || self.results.is_none();
        let processed_needs_original =
            self.processed_image.is_none() || self.original_image.is_some();
        analyzing_without_results && processed_needs_original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::results::CancerType;

    fn report() -> AnalysisReport {
        AnalysisReport::new(None).with(CancerType::new("a", "A", 0.5, "color-a"))
    }

    #[test]
    fn test_default_state() {
        let state = SessionState::default();
        assert_eq!(state.status, AnalysisStatus::Idle);
        assert!(state.original_image.is_none());
        assert!(state.processed_image.is_none());
        assert!(state.results.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_select_image_clears_previous_run() {
        let mut state = SessionState::default();
        state.select_image(ImageHandle::new("blob:1"));
        state.begin_analysis();
        state.complete_analysis(report());

        state.select_image(ImageHandle::new("blob:2"));

        assert_eq!(state.original_image, Some(ImageHandle::new("blob:2")));
        assert!(state.processed_image.is_none());
        assert!(state.results.is_none());
        assert_eq!(state.status, AnalysisStatus::Idle);
    }

    #[test]
    fn test_select_image_bumps_epoch() {
        let mut state = SessionState::default();
        let before = state.epoch;
        state.select_image(ImageHandle::new("blob:1"));
        state.select_image(ImageHandle::new("blob:2"));
        assert_eq!(state.epoch, before + 2);
    }

    #[test]
    fn test_begin_analysis_drops_stale_results() {
        let mut state = SessionState::default();
        state.select_image(ImageHandle::new("blob:1"));
        state.begin_analysis();
        state.complete_analysis(report());

        state.begin_analysis();
        assert_eq!(state.status, AnalysisStatus::Analyzing);
        assert!(state.results.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_complete_analysis_derives_processed_image() {
        let mut state = SessionState::default();
        state.select_image(ImageHandle::new("blob:1"));
        state.begin_analysis();
        state.complete_analysis(report());

        assert_eq!(state.status, AnalysisStatus::Complete);
        assert_eq!(state.processed_image, state.original_image);
        assert!(state.results.is_some());
    }

    #[test]
    fn test_fail_analysis_returns_to_idle() {
        let mut state = SessionState::default();
        state.select_image(ImageHandle::new("blob:1"));
        state.begin_analysis();

        state.fail_analysis();

        assert_eq!(state.status, AnalysisStatus::Idle);
        assert!(state.results.is_none());
        // The uploaded image survives a failure so the user can retry
        assert!(state.original_image.is_some());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut state = SessionState::default();
        state.select_image(ImageHandle::new("blob:1"));
        state.begin_analysis();
        state.complete_analysis(report());

        state.clear();
        let after_first = SessionState {
            epoch: state.epoch,
            ..SessionState::default()
        };
        assert_eq!(state, after_first);

        let epoch = state.epoch;
        state.clear();
        assert_eq!(state.status, AnalysisStatus::Idle);
        assert!(state.original_image.is_none());
        assert_eq!(state.epoch, epoch + 1);
    }
}
