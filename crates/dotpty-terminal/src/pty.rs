//! PTY (Pseudo-Terminal) handling with portable-pty.

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, error, info};

use dotpty_core::{Dimensions, Error, Result};

/// Handle to a child process running in a PTY.
pub struct PtyHandle {
    /// The master PTY end
    master: Box<dyn MasterPty + Send>,
    /// The child process
    child: Box<dyn Child + Send + Sync>,
}

impl std::fmt::Debug for PtyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PtyHandle")
            .field("pid", &self.child.process_id())
            .finish_non_exhaustive()
    }
}

impl PtyHandle {
    /// Spawn a new PTY running `command` with `args`.
    ///
    /// The slave side is closed in this process once the child is running, so
    /// reads from the master fail as soon as the child's terminal goes away.
    ///
    /// # Arguments
    /// * `command` - Program to execute (e.g., "/bin/sh")
    /// * `args` - Program arguments
    /// * `dimensions` - Terminal dimensions
    /// * `cwd` - Working directory; portable-pty falls back to `$HOME` when unset
    ///
    /// # Example
    /// ```no_run
    /// use dotpty_terminal::pty::PtyHandle;
    /// use dotpty_core::Dimensions;
    ///
    /// # fn example() -> dotpty_core::Result<()> {
    /// let args = vec!["-c".to_string(), "echo hello".to_string()];
    /// let mut pty = PtyHandle::spawn("/bin/sh", &args, Dimensions::new(24, 80), None)?;
    /// let code = pty.wait()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn(
        command: &str,
        args: &[String],
        dimensions: Dimensions,
        cwd: Option<PathBuf>,
    ) -> Result<Self> {
        info!(
            "Spawning PTY: command='{}' args={:?}, dimensions={}x{}, cwd={:?}",
            command, args, dimensions.rows, dimensions.cols, cwd
        );

        let pty_system = native_pty_system();

        let pty_size = PtySize {
            rows: dimensions.rows,
            cols: dimensions.cols,
            pixel_width: 0,
            pixel_height: 0,
        };

        debug!("Opening PTY with native system");
        let pair = pty_system.openpty(pty_size).map_err(|e| {
            error!("Failed to open PTY: {}", e);
            Error::Pty(format!("Failed to open PTY: {e}"))
        })?;

        let mut cmd = CommandBuilder::new(command);
        for arg in args {
            cmd.arg(arg);
        }

        if let Some(dir) = cwd {
            debug!("Setting working directory to: {}", dir.display());
            cmd.cwd(dir);
        }

        debug!("Spawning child process: {}", command);
        let child = pair.slave.spawn_command(cmd).map_err(|e| {
            error!("Failed to spawn command '{}': {}", command, e);
            Error::Pty(format!("Failed to spawn command: {e}"))
        })?;

        // Keeping the slave open here would hold the terminal alive after the
        // child exits and the reader would never see end of stream.
        drop(pair.slave);

        info!("PTY spawned successfully: command='{}'", command);

        Ok(Self {
            master: pair.master,
            child,
        })
    }

    /// Get a blocking reader for the child's merged output.
    pub fn reader(&self) -> Result<Box<dyn Read + Send>> {
        self.master.try_clone_reader().map_err(|e| {
            error!("Failed to clone PTY reader: {}", e);
            Error::Pty(format!("Failed to clone reader: {e}"))
        })
    }

    /// Take the writer feeding the child's terminal input.
    ///
    /// Can only be taken once.
    pub fn writer(&self) -> Result<Box<dyn Write + Send>> {
        self.master.take_writer().map_err(|e| {
            error!("Failed to take PTY writer: {}", e);
            Error::Pty(format!("Failed to take writer: {e}"))
        })
    }

    /// Wait for the child process to exit and return its exit code.
    pub fn wait(&mut self) -> Result<i32> {
        let status = self
            .child
            .wait()
            .map_err(|e| Error::Pty(format!("Wait failed: {e}")))?;

        let code = status.exit_code() as i32;
        info!("Child exited with code {}", code);
        Ok(code)
    }

    /// Kill the child process.
    pub fn kill(&mut self) -> Result<()> {
        info!("Killing PTY process");
        self.child
            .kill()
            .map_err(|e| Error::Pty(format!("Kill failed: {e}")))
    }
}
