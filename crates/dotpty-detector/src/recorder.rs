//! Turning records into rendered graph images.

use std::path::{Path, PathBuf};

use tracing::{info, trace};

use dotpty_core::{KindCounter, Result};
use dotpty_terminal::RecordSink;

use crate::detection::DetectionPipeline;
use crate::render::{output_path, GraphRenderer};

/// Classifies records and renders every graph found.
///
/// Owns the per-kind counter table for the run. Renders happen synchronously
/// inside [`RecordSink::record`], so images appear in the order their
/// graphs were printed.
pub struct GraphRecorder<R> {
    pipeline: DetectionPipeline,
    renderer: R,
    counter: KindCounter,
    out_dir: PathBuf,
    extension: String,
}

impl<R: GraphRenderer> GraphRecorder<R> {
    /// Create a recorder writing `png` images into `out_dir` with the default
    /// detectors.
    pub fn new(out_dir: impl Into<PathBuf>, renderer: R) -> Self {
        Self {
            pipeline: DetectionPipeline::with_default_detectors(),
            renderer,
            counter: KindCounter::new(),
            out_dir: out_dir.into(),
            extension: "png".to_string(),
        }
    }

    /// Use a custom detection pipeline.
    pub fn with_pipeline(mut self, pipeline: DetectionPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Use a different image file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Detect a graph in `record` and render it if there is one.
    ///
    /// Records that are not graphs are dropped without error. Only renderer
    /// failures are returned.
    pub fn classify_and_maybe_render(&mut self, record: &[u8]) -> Result<()> {
        match self.pipeline.detect(record) {
            Some(candidate) => {
                self.render(&candidate.kind, &candidate.source)?;
                Ok(())
            }
            None => {
                trace!("Discarding {}-byte record", record.len());
                Ok(())
            }
        }
    }

    /// Count one more graph of `kind` and render `source` to its file.
    ///
    /// The count goes up before the renderer runs, so it reflects render
    /// attempts rather than successful images. Returns the output path.
    pub fn render(&mut self, kind: &str, source: &[u8]) -> Result<PathBuf> {
        let seq = self.counter.increment(kind);
        let path = output_path(&self.out_dir, kind, seq, &self.extension);

        info!("Rendering {} #{} to {}", kind, seq, path.display());
        self.renderer.render(source, &path)?;
        Ok(path)
    }

    /// Renders issued so far, per kind.
    pub fn counts(&self) -> &KindCounter {
        &self.counter
    }

    /// Consume the recorder, keeping the counter table.
    pub fn into_counts(self) -> KindCounter {
        self.counter
    }

    /// The renderer in use.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Directory images are written to.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl<R: GraphRenderer> RecordSink for GraphRecorder<R> {
    fn record(&mut self, record: &[u8]) -> Result<()> {
        self.classify_and_maybe_render(record)
    }
}
