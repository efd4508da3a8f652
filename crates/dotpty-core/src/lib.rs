//! # dotpty-core
//!
//! Core types for dotpty.
//!
//! This crate contains the fundamental types with **no internal dependencies**
//! on other dotpty crates. It provides:
//!
//! - Error types
//! - Run configuration (YAML)
//! - The per-kind render counter table
//! - Shell command line construction
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other dotpty crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod config;
pub mod counter;
pub mod error;

// Re-export commonly used types
pub use config::{
    Dimensions, DotptyConfig, OutputSettings, RendererSettings, StreamSettings, TerminalSettings,
};
pub use counter::KindCounter;
pub use error::{Error, Result};
