//! Admission filters between the classifier and the stabilization logic.
//!
//! Raw detections never reach a window or an aggregation counter directly;
//! one of these filters always runs first.

use crate::classify::detection::{Detection, FrameObservation};
use std::collections::HashSet;

/// Reduces a frame's detection list to at most one admitted label.
///
/// Selection is the detection with maximum confidence (ties broken by first
/// occurrence in input order); it is admitted only if its confidence meets
/// the threshold. Pure and deterministic.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceFilter {
    threshold: f64,
}

impl ConfidenceFilter {
    /// Creates a filter with the given confidence threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Admits the frame's best detection, or `None`.
    pub fn admit(&self, detections: &[Detection]) -> FrameObservation {
        let mut best: Option<&Detection> = None;
        for det in detections {
            // Strict comparison keeps the first occurrence on ties.
            match best {
                Some(b) if det.confidence > b.confidence => best = Some(det),
                None => best = Some(det),
                _ => {}
            }
        }

        best.filter(|d| d.confidence >= self.threshold)
            .map(|d| d.label.clone())
    }
}

/// Streaming-side admission: a recognized-label allow-list plus a
/// confidence threshold.
///
/// Unlike [`ConfidenceFilter`], every detection that clears both checks is
/// admitted; a single frame can contribute several counts.
#[derive(Debug, Clone)]
pub struct AllowListFilter {
    recognized: HashSet<String>,
    threshold: f64,
}

impl AllowListFilter {
    /// Creates a filter from an allow-list and a confidence threshold.
    pub fn new(recognized: impl IntoIterator<Item = String>, threshold: f64) -> Self {
        Self {
            recognized: recognized.into_iter().collect(),
            threshold,
        }
    }

    /// Returns true if the label is on the allow-list.
    pub fn recognizes(&self, label: &str) -> bool {
        self.recognized.contains(label)
    }

    /// Returns the admitted labels of a frame, in input order.
    pub fn admitted<'a>(&'a self, detections: &'a [Detection]) -> impl Iterator<Item = &'a str> {
        detections
            .iter()
            .filter(|d| d.confidence >= self.threshold && self.recognized.contains(&d.label))
            .map(|d| d.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    fn det(label: &str, confidence: f64) -> Detection {
        Detection::new(label, confidence)
    }

    #[test]
    fn test_confidence_filter_empty_frame() {
        let filter = ConfidenceFilter::new(0.6);
        assert_eq!(filter.admit(&[]), None);
    }

    #[test]
    fn test_confidence_filter_admits_best_at_threshold() {
        let filter = ConfidenceFilter::new(0.6);
        let frame = vec![det("A", 0.3), det("B", 0.6)];
        assert_eq!(filter.admit(&frame), Some("B".to_string()));
    }

    #[test]
    fn test_confidence_filter_rejects_below_threshold() {
        let filter = ConfidenceFilter::new(0.6);
        let frame = vec![det("A", 0.59), det("B", 0.2)];
        assert_eq!(filter.admit(&frame), None);
    }

    #[test]
    fn test_confidence_filter_tie_keeps_first_occurrence() {
        let filter = ConfidenceFilter::new(0.5);
        let frame = vec![det("A", 0.8), det("B", 0.8)];
        assert_eq!(filter.admit(&frame), Some("A".to_string()));
    }

    #[test]
    fn test_confidence_filter_best_of_many() {
        let filter = ConfidenceFilter::new(0.5);
        let frame = vec![det("A", 0.55), det("B", 0.9), det("C", 0.7)];
        assert_eq!(filter.admit(&frame), Some("B".to_string()));
    }

    #[test]
    fn test_confidence_filter_is_deterministic() {
        let filter = ConfidenceFilter::new(0.5);
        let frame = vec![det("A", 0.7), det("B", 0.7), det("C", 0.6)];
        let first = filter.admit(&frame);
        for _ in 0..10 {
            assert_eq!(filter.admit(&frame), first);
        }
    }

    #[test]
    fn test_allow_list_admits_every_clearing_detection() {
        let filter = AllowListFilter::new(defaults::recognized_labels(), 0.5);
        let frame = vec![det("Hello", 0.9), det("Yes", 0.6), det("Hello", 0.7)];
        let admitted: Vec<&str> = filter.admitted(&frame).collect();
        assert_eq!(admitted, vec!["Hello", "Yes", "Hello"]);
    }

    #[test]
    fn test_allow_list_rejects_unrecognized_labels() {
        let filter = AllowListFilter::new(defaults::recognized_labels(), 0.5);
        let frame = vec![det("Wave", 0.99), det("No", 0.8)];
        let admitted: Vec<&str> = filter.admitted(&frame).collect();
        assert_eq!(admitted, vec!["No"]);
    }

    #[test]
    fn test_allow_list_rejects_below_threshold() {
        let filter = AllowListFilter::new(defaults::recognized_labels(), 0.5);
        let frame = vec![det("Hello", 0.49), det("Hello", 0.5)];
        let admitted: Vec<&str> = filter.admitted(&frame).collect();
        assert_eq!(admitted, vec!["Hello"]);
    }

    #[test]
    fn test_allow_list_recognizes() {
        let filter = AllowListFilter::new(defaults::recognized_labels(), 0.5);
        assert!(filter.recognizes("OK"));
        assert!(!filter.recognizes("Wave"));
    }
}
