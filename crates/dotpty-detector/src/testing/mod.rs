//! Testing utilities for dotpty detection.
//!
//! Provides a renderer double that records what it was asked to render.

use std::io;
use std::path::{Path, PathBuf};

use dotpty_core::{Error, Result};

use crate::render::GraphRenderer;

/// One call made to a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    /// DOT source handed to the renderer
    pub source: Vec<u8>,
    /// Requested output path
    pub output: PathBuf,
}

/// Renderer that remembers its calls instead of running a program.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    fail: bool,
}

impl RecordingRenderer {
    /// Create a renderer that accepts every call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that fails every call as if the program were missing.
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    /// Calls made so far, oldest first.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.clone()
    }
}

impl GraphRenderer for RecordingRenderer {
    fn render(&mut self, source: &[u8], output: &Path) -> Result<()> {
        self.calls.push(RenderCall {
            source: source.to_vec(),
            output: output.to_path_buf(),
        });

        if self.fail {
            return Err(Error::Render {
                path: output.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "renderer not found"),
            });
        }

        Ok(())
    }
}
