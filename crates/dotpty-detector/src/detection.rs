//! Core detection types and traits.

use std::sync::Arc;

use tracing::trace;

use crate::detectors::{PatternDetector, StructuredDetector};

/// A graph found in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCandidate {
    /// Graph kind, used for counting and naming output files
    pub kind: String,
    /// DOT source to hand to the renderer
    pub source: Vec<u8>,
}

impl GraphCandidate {
    /// Create a new candidate.
    pub fn new(kind: impl Into<String>, source: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
        }
    }
}

/// Trait for graph detectors.
pub trait GraphDetector: Send + Sync {
    /// Detector name for debugging/logging.
    fn name(&self) -> &'static str;

    /// Priority (higher = runs first).
    ///
    /// Typical priorities:
    /// - 100: Self-describing records (JSON)
    /// - 50: Textual matches on raw output
    fn priority(&self) -> u32;

    /// Inspect one record. Must not fail: anything unrecognized is `None`.
    fn detect(&self, record: &[u8]) -> Option<GraphCandidate>;

    /// Whether this detector is enabled.
    fn enabled(&self) -> bool {
        true
    }
}

/// Detection pipeline that tries detectors in priority order.
///
/// The first detector to recognize a record wins; later ones never see it.
pub struct DetectionPipeline {
    detectors: Vec<Arc<dyn GraphDetector>>,
}

impl DetectionPipeline {
    /// Create an empty detection pipeline.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Pipeline with the structured (JSON) detector followed by the DOT
    /// header pattern detector.
    pub fn with_default_detectors() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_detector(Arc::new(StructuredDetector::new()));
        pipeline.add_detector(Arc::new(PatternDetector::new()));
        pipeline
    }

    /// Add a detector to the pipeline.
    pub fn add_detector(&mut self, detector: Arc<dyn GraphDetector>) {
        self.detectors.push(detector);
        // Stable sort keeps insertion order among equal priorities
        self.detectors
            .sort_by_key(|b| std::cmp::Reverse(b.priority()));
    }

    /// Names of the detectors in the order they run.
    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run detectors on a record until one matches.
    pub fn detect(&self, record: &[u8]) -> Option<GraphCandidate> {
        for detector in &self.detectors {
            if !detector.enabled() {
                continue;
            }

            if let Some(candidate) = detector.detect(record) {
                trace!(
                    "Detector '{}' matched kind '{}'",
                    detector.name(),
                    candidate.kind
                );
                return Some(candidate);
            }
        }

        None
    }
}

impl Default for DetectionPipeline {
    fn default() -> Self {
        Self::with_default_detectors()
    }
}
