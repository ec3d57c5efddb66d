//! Optional `pvim.toml` configuration.
//!
//! ```toml
//! [editor]
//! line_numbers = true
//! initial_file = "readme.txt"
//!
//! [[files]]
//! name = "notes.txt"
//! lines = ["first", "second"]
//! ```

use crate::vfs::CannedFiles;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name looked up by [`default_config_paths`].
pub const CONFIG_FILE: &str = "pvim.toml";

/// File opened when neither the command line nor the config names one.
pub const DEFAULT_FILE: &str = "readme.txt";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorSettings,

    /// Extra read-only files mounted next to the built-in ones.
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct EditorSettings {
    pub line_numbers: bool,
    pub initial_file: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self { line_numbers: true, initial_file: DEFAULT_FILE.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Parsing {}", path.display()))
    }

    /// Load the first config file found in `candidates`; defaults when none exists.
    pub fn discover(candidates: &[PathBuf]) -> Result<Self> {
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// The file store: built-in files plus the configured extras.
    ///
    /// Entries with an empty name are skipped.
    pub fn file_store(&self) -> CannedFiles {
        let extra = self.files.iter().filter_map(|f| {
            if f.name.trim().is_empty() {
                warn!("ignoring [[files]] entry with an empty name");
                return None;
            }
            Some((f.name.clone(), f.lines.clone()))
        });
        CannedFiles::with_extra(extra)
    }
}

/// Config search path:
/// - `./pvim.toml` relative to the current working directory
/// - `pvim.toml` next to the executable
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(CONFIG_FILE));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            paths.push(dir.join(CONFIG_FILE));
        }
    }

    paths
}
