//! Error types for dotpty.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for dotpty operations.
#[derive(Debug, Error)]
pub enum Error {
    /// PTY-related errors
    #[error("PTY error: {0}")]
    Pty(String),

    /// The external renderer could not be run for an output file.
    ///
    /// This is fatal for the whole run: a renderer that cannot be spawned
    /// once will not work for any later graph either.
    #[error("Failed to render {}", path.display())]
    Render {
        /// Output image path the render was targeting
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
