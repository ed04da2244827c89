//! Environment File Writer
//!
//! Writes the `KEY="VALUE"` output file. The file is recreated fresh on
//! every run and only ever appended to afterwards, so an interrupted run
//! leaves a partial file rather than a stale one.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only `.env` writer
#[derive(Debug)]
pub struct EnvFile {
    path: PathBuf,
}

impl EnvFile {
    /// Create the output file, truncating any previous run's content.
    ///
    /// A run that discovers nothing leaves the file at zero bytes.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        File::create(path)
            .with_context(|| format!("Failed to create env file {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Append one block of env lines, keeping a category's lines contiguous.
    pub fn append(&self, lines: &[(String, String)]) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open env file {}", self.path.display()))?;

        for (key, value) in lines {
            writeln!(file, "{}", format_line(key, value))
                .with_context(|| format!("Failed to write env file {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Format one env line in shell-environment-file convention
pub fn format_line(key: &str, value: &str) -> String {
    format!("{}=\"{}\"", key, value)
}
