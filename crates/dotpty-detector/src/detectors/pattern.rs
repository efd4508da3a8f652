//! Detector for raw DOT documents printed on one line.

use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::detection::{GraphCandidate, GraphDetector};

lazy_static! {
    /// A `digraph` header whose label (quoted, or an HTML-like `<...>` label
    /// after any leading tags) ends in a word ending with `Graph`. Group 1 is
    /// the label text up to and including `Graph`.
    static ref GRAPH_LABEL: Regex =
        Regex::new(r#"(?-u)^digraph\b[^=}]*\blabel=(?:"|<(?:<[^>]*>)*)([^"<>]*?Graph)"#)
            .expect("graph label pattern is valid");
}

/// Pattern detector for `digraph ... label="... Graph"` records.
pub struct PatternDetector;

impl PatternDetector {
    /// Create a new pattern detector.
    pub fn new() -> Self {
        Self
    }

    /// Extract the graph kind from a DOT header, if it has one.
    pub fn kind_of(record: &[u8]) -> Option<String> {
        let captures = GRAPH_LABEL.captures(record)?;
        let label = captures.get(1)?;
        Some(String::from_utf8_lossy(label.as_bytes()).into_owned())
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDetector for PatternDetector {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn priority(&self) -> u32 {
        50
    }

    fn detect(&self, record: &[u8]) -> Option<GraphCandidate> {
        let kind = Self::kind_of(record)?;
        Some(GraphCandidate::new(kind, record))
    }
}
