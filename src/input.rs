//! Reading payloads for the command line

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Name standing for standard input
pub const STDIN_MARKER: &str = "-";

/// Where a payload comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Interpret a command-line argument, expanding `~`
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_MARKER {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(shellexpand::tilde(arg).as_ref()))
        }
    }

    /// Human-readable name for headers and logs
    pub fn describe(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole payload
    pub fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut payload = String::new();
                std::io::stdin()
                    .read_to_string(&mut payload)
                    .context("Failed to read standard input")?;
                Ok(payload)
            }
            Source::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}

/// Sources for the given arguments; none means standard input
pub fn sources(args: &[String]) -> Vec<Source> {
    if args.is_empty() {
        vec![Source::Stdin]
    } else {
        args.iter().map(|arg| Source::from_arg(arg)).collect()
    }
}
