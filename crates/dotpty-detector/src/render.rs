//! Rendering detected graphs with an external layout program.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

use dotpty_core::{Error, RendererSettings, Result};

/// Turns DOT source into an image file.
pub trait GraphRenderer {
    /// Render `source` into the file at `output`.
    ///
    /// Only failures that make the renderer unusable are errors. A renderer
    /// that runs but rejects the graph is not.
    fn render(&mut self, source: &[u8], output: &Path) -> Result<()>;
}

/// Runs Graphviz `dot` (or any program with the same stdin/stdout contract).
///
/// The source goes through a temporary file on the program's stdin and its
/// stdout is redirected into the output file. No shell is involved.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    program: String,
    args: Vec<String>,
}

impl DotRenderer {
    /// `dot -Tpng`.
    pub fn new() -> Self {
        Self::from_settings(&RendererSettings::default())
    }

    /// Run `program` with `args` instead.
    pub fn with_program(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create a renderer from settings.
    pub fn from_settings(settings: &RendererSettings) -> Self {
        Self::with_program(settings.program.clone(), settings.args.clone())
    }

    /// Program that will be executed.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&mut self, source: &[u8], output: &Path) -> Result<()> {
        let fail = |source: io::Error| Error::Render {
            path: output.to_path_buf(),
            source,
        };

        // Removed on drop, whichever way we leave this function
        let mut dot_file = NamedTempFile::new().map_err(fail)?;
        dot_file.write_all(source).map_err(fail)?;
        dot_file.flush().map_err(fail)?;

        let stdin = dot_file.reopen().map_err(fail)?;
        let stdout = File::create(output).map_err(fail)?;

        debug!(
            "Running {} {:?} < {} > {}",
            self.program,
            self.args,
            dot_file.path().display(),
            output.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .status()
            .map_err(|e| {
                error!("Failed to run renderer '{}': {}", self.program, e);
                fail(e)
            })?;

        if !status.success() {
            warn!(
                "Renderer '{}' exited with {} for {}",
                self.program,
                status,
                output.display()
            );
        }

        Ok(())
    }
}

/// Kind name with all whitespace removed, used as the file stem.
///
/// # Example
/// ```
/// use dotpty_detector::render::compact_kind;
///
/// assert_eq!(compact_kind("Task Graph"), "TaskGraph");
/// ```
pub fn compact_kind(kind: &str) -> String {
    kind.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Path of the `seq`-th image of `kind` (1-based).
///
/// The first image is `<Kind>.<ext>`, later ones `<Kind>-<seq>.<ext>`.
pub fn output_path(out_dir: &Path, kind: &str, seq: usize, extension: &str) -> PathBuf {
    let stem = compact_kind(kind);
    let file_name = if seq > 1 {
        format!("{stem}-{seq}.{extension}")
    } else {
        format!("{stem}.{extension}")
    };
    out_dir.join(file_name)
}
