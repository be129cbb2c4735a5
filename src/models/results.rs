use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single entry in the probability distribution produced by an analysis run.
///
/// Probabilities are treated independently per entry. A result set is NOT a
/// normalized distribution and must never be rescaled to sum to 1 - the raw
/// model outputs are what the user sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancerType {
    /// Stable identifier, unique within one result set
    pub id: String,

    /// Human-readable label (e.g. "Squamous Cell Carcinoma")
    pub name: String,

    /// Probability in [0, 1]
    pub probability: f64,

    /// Styling token, opaque to the core logic
    pub color: String,
}

impl CancerType {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        probability: f64,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            probability,
            color: color.into(),
        }
    }
}

/// Verdict and confidence metadata accompanying a result set.
///
/// All fields are optional; `detection_type` is only meaningful when
/// `detection` is present. `confidence_score` is on a percentage scale
/// ([0, 100]), unlike the per-type probabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub detection: Option<String>,
    pub detection_type: Option<String>,
    pub detection_details: Option<String>,
    pub confidence_score: Option<f64>,
    pub model_name: Option<String>,
}

/// Ordered collection of [`CancerType`] entries plus the optional
/// [`DetectionSummary`] for one analysis run.
///
/// Entries iterate in insertion order (never sorted by probability), which is
/// why the backing store is an `IndexMap` keyed by entry id. Pushing an entry
/// whose id already exists replaces the earlier entry in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    types: IndexMap<String, CancerType>,
    pub summary: Option<DetectionSummary>,
}

impl AnalysisReport {
    pub fn new(summary: Option<DetectionSummary>) -> Self {
        Self {
            types: IndexMap::new(),
            summary,
        }
    }

    /// Add a probability entry, keyed by its id.
    pub fn push(&mut self, entry: CancerType) {
        self.types.insert(entry.id.clone(), entry);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, entry: CancerType) -> Self {
        self.push(entry);
        self
    }

    /// Iterate entries in insertion order.
    pub fn types(&self) -> impl Iterator<Item = &CancerType> {
        self.types.values()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CancerType> {
        self.types.get(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let report = AnalysisReport::new(None)
            .with(CancerType::new("b", "B", 0.9, "color-b"))
            .with(CancerType::new("a", "A", 0.1, "color-a"))
            .with(CancerType::new("c", "C", 0.5, "color-c"));

        let ids: Vec<&str> = report.types().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let report = AnalysisReport::new(None)
            .with(CancerType::new("a", "First", 0.1, "color-a"))
            .with(CancerType::new("b", "B", 0.2, "color-b"))
            .with(CancerType::new("a", "Second", 0.3, "color-a"));

        assert_eq!(report.len(), 2);
        assert_eq!(report.get("a").unwrap().name, "Second");

        // Position of the replaced entry does not move
        let ids: Vec<&str> = report.types().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_probabilities_not_normalized() {
        let report = AnalysisReport::new(None)
            .with(CancerType::new("x", "X", 0.9, "c"))
            .with(CancerType::new("y", "Y", 0.9, "c"));

        let sum: f64 = report.types().map(|t| t.probability).sum();
        assert!(sum > 1.0, "entries are independent, sum may exceed 1");
        assert_eq!(report.get("x").unwrap().probability, 0.9);
        assert_eq!(report.get("y").unwrap().probability, 0.9);
    }

    #[test]
    fn test_summary_round_trip_yaml() {
        let summary = DetectionSummary {
            detection: Some("Positive".to_string()),
            detection_type: Some("Adenocarcinoma".to_string()),
            detection_details: None,
            confidence_score: Some(91.7),
            model_name: Some("Test Model".to_string()),
        };
        let report = AnalysisReport::new(Some(summary.clone()))
            .with(CancerType::new("a", "A", 0.5, "color-a"));

        let yaml = serde_yaml_ng::to_string(&report).unwrap();
        let parsed: AnalysisReport = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.summary, Some(summary));
        assert_eq!(parsed.len(), 1);
    }
}
