//! Command-line interface for dotpty.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use dotpty_core::DotptyConfig;

/// dotpty - run a command in a pseudo-terminal and render the graphs it prints
#[derive(Parser, Debug)]
#[command(name = "dotpty")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output directory for rendered images (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Renderer program reading DOT on stdin and writing an image to stdout
    #[arg(long, value_name = "PROGRAM")]
    pub renderer: Option<String>,

    /// Argument for the renderer (repeatable); replaces the configured arguments
    #[arg(long = "renderer-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub renderer_args: Vec<String>,

    /// Bytes dropped after each record terminator
    #[arg(long, value_name = "N")]
    pub framing_skip: Option<usize>,

    /// Command line, passed to the shell
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Build the run configuration: file (if any), then command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<DotptyConfig> {
        let mut config = match &self.config {
            Some(path) => DotptyConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => DotptyConfig::default(),
        };

        if let Some(dir) = &self.out_dir {
            config.output.out_dir = dir.clone();
        } else if config.output.out_dir == Path::new(".") {
            if let Ok(cwd) = std::env::current_dir() {
                config.output.out_dir = cwd;
            }
        }

        // A different program does not inherit the configured arguments
        if let Some(program) = &self.renderer {
            config.renderer.program = program.clone();
            config.renderer.args.clear();
        }
        if !self.renderer_args.is_empty() {
            config.renderer.args = self.renderer_args.clone();
        }

        if let Some(skip) = self.framing_skip {
            config.stream.skip = skip;
        }

        config.validate()?;
        Ok(config)
    }
}
