//! Graph detector implementations.

pub mod pattern;
pub mod structured;

pub use pattern::PatternDetector;
pub use structured::StructuredDetector;
