//! Configuration types for dotpty.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Run configuration, optionally loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DotptyConfig {
    /// Where rendered images go
    pub output: OutputSettings,
    /// External renderer invocation
    pub renderer: RendererSettings,
    /// Record framing of the PTY byte stream
    pub stream: StreamSettings,
    /// Child terminal settings
    pub terminal: TerminalSettings,
    /// Log filter used when `RUST_LOG` is not set (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DotptyConfig {
    fn default() -> Self {
        Self {
            output: OutputSettings::default(),
            renderer: RendererSettings::default(),
            stream: StreamSettings::default(),
            terminal: TerminalSettings::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl DotptyConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DotptyConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.renderer.program.trim().is_empty() {
            return Err(Error::Config(
                "renderer.program must not be empty".to_string(),
            ));
        }

        if self.output.extension.trim().is_empty() {
            return Err(Error::Config(
                "output.extension must not be empty".to_string(),
            ));
        }

        if self.stream.chunk_size == 0 {
            return Err(Error::Config("stream.chunk_size must be > 0".to_string()));
        }

        if self.terminal.shell.trim().is_empty() {
            return Err(Error::Config("terminal.shell must not be empty".to_string()));
        }

        if self.terminal.rows == 0 || self.terminal.cols == 0 {
            return Err(Error::Config("terminal dimensions must be > 0".to_string()));
        }

        Ok(())
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory rendered images are written to
    pub out_dir: PathBuf,
    /// File extension of rendered images, without the dot
    pub extension: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            extension: "png".to_string(),
        }
    }
}

/// Renderer settings.
///
/// Any program that reads a DOT document on stdin and writes an image to
/// stdout can stand in for Graphviz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// Program to execute
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
            args: vec!["-Tpng".to_string()],
        }
    }
}

/// Stream framing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Byte value that ends a record (13 = carriage return)
    pub terminator: u8,
    /// Number of bytes dropped after each terminator
    ///
    /// A terminal line discipline turns `\n` into `\r\n`, so the default drops
    /// the `\n` following each `\r`.
    pub skip: usize,
    /// Maximum number of bytes taken from the PTY per read
    pub chunk_size: usize,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            terminator: b'\r',
            skip: 1,
            chunk_size: 10_000,
        }
    }
}

/// Terminal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Shell used to run the command line
    pub shell: String,
    /// Terminal rows
    pub rows: u16,
    /// Terminal columns
    pub cols: u16,
    /// Copy our stdin into the child's terminal
    pub forward_stdin: bool,
}

impl TerminalSettings {
    /// Terminal size as [`Dimensions`].
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols)
    }
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
            rows: 24,
            cols: 80,
            forward_stdin: true,
        }
    }
}

/// Dimensions of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Number of rows
    pub rows: u16,
    /// Number of columns
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(24, 80)
    }
}
