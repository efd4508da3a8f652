//! Detector for JSON-wrapped graphs.
//!
//! Programs can print a graph as a single-line JSON object such as
//! `{"name": "TaskGraph", "data": "digraph { ... }"}`.

use serde::Deserialize;
use serde_json::Value;

use crate::detection::{GraphCandidate, GraphDetector};

/// Schema a structured record must satisfy. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct GraphRecord {
    name: String,
    data: String,
}

/// Structured detector for `{"name": ..., "data": ...}` records.
pub struct StructuredDetector;

impl StructuredDetector {
    /// Create a new structured detector.
    pub fn new() -> Self {
        Self
    }

    /// Parse a record into the schema, or `None` for anything else.
    fn parse(record: &[u8]) -> Option<GraphRecord> {
        let value: Value = serde_json::from_slice(record).ok()?;
        // Structs also deserialize from arrays; only objects count here.
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

impl Default for StructuredDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDetector for StructuredDetector {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn detect(&self, record: &[u8]) -> Option<GraphCandidate> {
        let parsed = Self::parse(record)?;
        if !parsed.name.contains("Graph") {
            return None;
        }

        Some(GraphCandidate::new(parsed.name, parsed.data.into_bytes()))
    }
}
