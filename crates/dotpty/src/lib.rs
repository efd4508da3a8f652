//! dotpty library
//!
//! Host side of the tool: spawns the command in a PTY, pumps its output
//! through the reassembler into the graph recorder, and echoes it to the
//! user's terminal. The binary entry point is in main.rs.

pub mod cli;
pub mod summary;

use anyhow::Context;
use std::io::{self, Read, Write};
use std::thread;
use tracing::{debug, info};

use dotpty_core::command::{shell_args, shell_command_line};
use dotpty_core::DotptyConfig;
use dotpty_detector::{DotRenderer, GraphRecorder};
use dotpty_terminal::{PtyHandle, Reassembler, RecordSink};

// Re-export commonly used types
pub use cli::Cli;
pub use summary::summary;

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Exit code of the child command
    pub exit_code: i32,
    /// Summary line printed at the end
    pub summary: String,
}

/// Read from `source` until end of stream, dispatching records to `sink` and
/// copying every chunk to `echo`.
///
/// Stops early on the first error from the sink (a fatal render failure) or
/// from `echo`.
pub fn pump<R, S, W>(
    reassembler: &mut Reassembler,
    source: &mut R,
    sink: &mut S,
    echo: &mut W,
) -> dotpty_core::Result<()>
where
    R: Read + ?Sized,
    S: RecordSink + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let chunk = reassembler.read(source, sink)?;
        if chunk.is_empty() {
            return Ok(());
        }
        echo.write_all(&chunk)?;
        echo.flush()?;
    }
}

/// Run `command` under a PTY and render the graphs it prints.
///
/// Prints the summary line to stdout and returns the child's exit code.
pub fn run(config: &DotptyConfig, command: &[String]) -> anyhow::Result<RunReport> {
    let out_dir = &config.output.out_dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let command_line = shell_command_line(command);
    info!("Running '{}' via {}", command_line, config.terminal.shell);

    let cwd = std::env::current_dir().ok();
    let mut pty = PtyHandle::spawn(
        &config.terminal.shell,
        &shell_args(&command_line),
        config.terminal.dimensions(),
        cwd,
    )?;
    let mut reader = pty.reader()?;

    if config.terminal.forward_stdin {
        forward_stdin(pty.writer()?);
    }

    let renderer = DotRenderer::from_settings(&config.renderer);
    let mut recorder = GraphRecorder::new(out_dir.clone(), renderer)
        .with_extension(config.output.extension.clone());
    let mut reassembler = Reassembler::from_settings(&config.stream);

    let stdout = io::stdout();
    let pumped = pump(
        &mut reassembler,
        &mut reader,
        &mut recorder,
        &mut stdout.lock(),
    );

    if let Err(e) = pumped {
        // Nothing more will be rendered; don't leave the child running.
        if let Err(kill_err) = pty.kill() {
            debug!("Failed to kill child after error: {}", kill_err);
        }
        return Err(e.into());
    }

    let exit_code = pty.wait()?;
    let summary = summary(recorder.counts(), out_dir);
    println!("{summary}");

    Ok(RunReport { exit_code, summary })
}

/// Copy our stdin into the child's terminal on a background thread.
fn forward_stdin(mut writer: Box<dyn Write + Send>) {
    thread::spawn(move || {
        let mut stdin = io::stdin();
        match io::copy(&mut stdin, &mut writer) {
            Ok(n) => debug!("Stdin closed after forwarding {} bytes", n),
            Err(e) => debug!("Stopped forwarding stdin: {}", e),
        }
    });
}
