//! Corpus loading: directory resolution and per-file JSON parsing.

pub mod loader;

pub use loader::*;

use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Raw corpus keyed by file name, in sorted file-name order
pub type RawCorpus = BTreeMap<String, Value>;

/// Anything that can produce a fresh raw corpus on demand
pub trait CorpusSource: Send + Sync {
    fn load(&self) -> Result<RawCorpus>;

    /// Directory to watch for changes, if the source has one
    fn watch_path(&self) -> Option<&Path> {
        None
    }
}

/// Reads every `*.json` file of one directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl CorpusSource for DirectorySource {
    fn load(&self) -> Result<RawCorpus> {
        Ok(load_all(&self.dir)?.files)
    }

    fn watch_path(&self) -> Option<&Path> {
        Some(&self.dir)
    }
}
