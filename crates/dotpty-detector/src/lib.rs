//! # dotpty-detector
//!
//! Graph detection and rendering for dotpty.
//!
//! This crate provides:
//! - A detection pipeline that recognizes graphs in output records
//! - Detectors for JSON-wrapped graphs and raw `digraph` documents
//! - Rendering through an external layout program (Graphviz `dot`)
//! - The recorder tying detection, per-kind numbering, and rendering together
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on dotpty-core and
//! consumes the records produced by dotpty-terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detection;
pub mod detectors;
pub mod recorder;
pub mod render;
pub mod testing;

// Re-export commonly used types
pub use detection::{DetectionPipeline, GraphCandidate, GraphDetector};
pub use detectors::{PatternDetector, StructuredDetector};
pub use recorder::GraphRecorder;
pub use render::{compact_kind, output_path, DotRenderer, GraphRenderer};
