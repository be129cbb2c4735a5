//! Render-state derivation for the results panel.
//!
//! Nothing here owns state: [`ResultPresentation::derive`] is a pure function
//! from `(status, results)` to exactly one of three mutually exclusive
//! presentations, so the render layer can be unit-tested without driving the
//! async gateway. [`ResultView`] adds the one piece of memory the skeleton
//! needs (the size of the most recent result set).

use crate::models::{AnalysisReport, AnalysisStatus, DetectionSummary, SessionState};

/// Placeholder rows shown while analyzing, before any result set exists.
pub const DEFAULT_SKELETON_ROWS: usize = 5;

/// One rendered probability row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub id: String,
    pub name: String,

    /// `probability * 100`, unrounded, for the proportional indicator
    pub percent: f64,

    /// Display label, one decimal place (e.g. "28.8%")
    pub percent_label: String,

    /// Styling token, passed through untouched
    pub color: String,
}

/// Exactly one of the three mutually exclusive presentations.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPresentation {
    /// Skeleton while analyzing; `rows` placeholder rows
    Loading { rows: usize },

    /// Prompt to upload a scan and run an analysis
    Empty,

    /// Completed run: optional verdict metadata plus one row per entry, in
    /// insertion order of the result set (never sorted by probability)
    Populated {
        summary: Option<DetectionSummary>,
        rows: Vec<ResultRow>,
    },
}

/// Format a [0, 1] probability as a one-decimal percentage.
///
/// Uses the `{:.1}` formatting rule (round to nearest, ties to even), applied
/// consistently everywhere a probability is displayed.
pub fn percent_label(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

impl ResultPresentation {
    /// Derive the presentation for a status/results pair.
    ///
    /// `skeleton_rows` is the row count to use while loading - callers that
    /// track the most recent result set pass its size, otherwise
    /// [`DEFAULT_SKELETON_ROWS`].
    pub fn derive(
        status: AnalysisStatus,
        results: Option<&AnalysisReport>,
        skeleton_rows: usize,
    ) -> Self {
        match (status, results) {
            (AnalysisStatus::Analyzing, _) => Self::Loading {
                rows: skeleton_rows,
            },
            (AnalysisStatus::Complete, Some(report)) if !report.is_empty() => Self::Populated {
                summary: report.summary.clone(),
                rows: report
                    .types()
                    .map(|t| ResultRow {
                        id: t.id.clone(),
                        name: t.name.clone(),
                        percent: t.probability * 100.0,
                        percent_label: percent_label(t.probability),
                        color: t.color.clone(),
                    })
                    .collect(),
            },
            _ => Self::Empty,
        }
    }
}

/// Stateful wrapper remembering the most recent result set size so the
/// loading skeleton matches what the user last saw.
#[derive(Debug, Clone)]
pub struct ResultView {
    last_result_len: Option<usize>,
    default_rows: usize,
}

impl ResultView {
    pub fn new() -> Self {
        Self::with_default_rows(DEFAULT_SKELETON_ROWS)
    }

    pub fn with_default_rows(default_rows: usize) -> Self {
        Self {
            last_result_len: None,
            default_rows,
        }
    }

    /// Derive the presentation for a state snapshot, updating the remembered
    /// result set size as a side effect.
    pub fn present(&mut self, state: &SessionState) -> ResultPresentation {
        if let Some(report) = &state.results {
            self.last_result_len = Some(report.len());
        }
        let skeleton_rows = self.last_result_len.unwrap_or(self.default_rows);
        ResultPresentation::derive(state.status, state.results.as_ref(), skeleton_rows)
    }
}

impl Default for ResultView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CancerType;

    fn report(n: usize) -> AnalysisReport {
        let mut report = AnalysisReport::new(None);
        for i in 0..n {
            report.push(CancerType::new(
                format!("t{i}"),
                format!("Type {i}"),
                0.1,
                "color-x",
            ));
        }
        report
    }

    #[test]
    fn test_analyzing_always_loads() {
        let p = ResultPresentation::derive(AnalysisStatus::Analyzing, None, 5);
        assert_eq!(p, ResultPresentation::Loading { rows: 5 });
    }

    #[test]
    fn test_idle_without_results_is_empty() {
        let p = ResultPresentation::derive(AnalysisStatus::Idle, None, 5);
        assert_eq!(p, ResultPresentation::Empty);
    }

    #[test]
    fn test_complete_without_results_is_empty() {
        let p = ResultPresentation::derive(AnalysisStatus::Complete, None, 5);
        assert_eq!(p, ResultPresentation::Empty);
    }

    #[test]
    fn test_complete_with_empty_result_set_is_empty() {
        let empty = report(0);
        let p = ResultPresentation::derive(AnalysisStatus::Complete, Some(&empty), 5);
        assert_eq!(p, ResultPresentation::Empty);
    }

    #[test]
    fn test_populated_preserves_insertion_order() {
        let report = AnalysisReport::new(None)
            .with(CancerType::new("z", "Z", 0.9, "c"))
            .with(CancerType::new("a", "A", 0.1, "c"));

        let p = ResultPresentation::derive(AnalysisStatus::Complete, Some(&report), 5);
        let ResultPresentation::Populated { rows, .. } = p else {
            panic!("expected populated presentation");
        };

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a"], "rows stay in insertion order");
    }

    #[test]
    fn test_rounding_law() {
        assert_eq!(percent_label(0.288), "28.8%");
        assert_eq!(percent_label(0.179), "17.9%");
        assert_eq!(percent_label(0.164), "16.4%");
        assert_eq!(percent_label(0.317), "31.7%");
        assert_eq!(percent_label(0.053), "5.3%");
        assert_eq!(percent_label(0.0), "0.0%");
        assert_eq!(percent_label(1.0), "100.0%");
    }

    #[test]
    fn test_view_remembers_last_result_len() {
        let mut view = ResultView::new();
        let mut state = SessionState::default();

        // No result set yet: fixed default
        state.status = AnalysisStatus::Analyzing;
        assert_eq!(
            view.present(&state),
            ResultPresentation::Loading { rows: 5 }
        );

        // A three-entry run completes
        state.status = AnalysisStatus::Complete;
        state.results = Some(report(3));
        assert!(matches!(
            view.present(&state),
            ResultPresentation::Populated { .. }
        ));

        // Re-analysis: skeleton matches the set the user last saw
        state.status = AnalysisStatus::Analyzing;
        state.results = None;
        assert_eq!(
            view.present(&state),
            ResultPresentation::Loading { rows: 3 }
        );
    }

    #[test]
    fn test_configured_default_rows() {
        let mut view = ResultView::with_default_rows(7);
        let mut state = SessionState::default();
        state.status = AnalysisStatus::Analyzing;
        assert_eq!(
            view.present(&state),
            ResultPresentation::Loading { rows: 7 }
        );
    }
}
