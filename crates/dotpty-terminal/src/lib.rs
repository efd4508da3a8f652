//! # dotpty-terminal
//!
//! Terminal plumbing for dotpty.
//!
//! This crate provides:
//! - PTY (pseudo-terminal) lifecycle management for the child command
//! - Reassembly of the PTY output stream into terminator-delimited records
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on dotpty-core and
//! feeds records to whatever [`RecordSink`] the host supplies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pty;
pub mod reassembler;

// Re-export commonly used types
pub use pty::PtyHandle;
pub use reassembler::{Framing, Reassembler, RecordSink, DEFAULT_CHUNK_SIZE};
