use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::RawCorpus;
use crate::common::format_elapsed;

/// Corpus directory candidates, relative to the working directory, in priority order
pub const CORPUS_DIR_CANDIDATES: [&str; 3] = ["../bioc", "./bioc", "../../bioc"];

/// Result of one directory load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully parsed files
    pub files: RawCorpus,
    /// Files that could not be read or parsed, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Resolve the corpus directory against the process working directory
pub fn resolve_corpus_dir(override_dir: Option<&Path>) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_corpus_dir_from(&cwd, override_dir)
}

/// Resolve the corpus directory: the override wins, then the first candidate
/// under `base` that is an existing directory. When none exists the first
/// candidate is returned anyway so the service starts with an empty corpus.
pub fn resolve_corpus_dir_from(base: &Path, override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    let candidates: Vec<PathBuf> = CORPUS_DIR_CANDIDATES
        .iter()
        .map(|candidate| base.join(candidate))
        .collect();

    match candidates.iter().find(|path| path.is_dir()) {
        Some(found) => found.clone(),
        None => {
            warn!(
                "No corpus directory found among {:?}, using {}",
                CORPUS_DIR_CANDIDATES,
                candidates[0].display()
            );
            candidates[0].clone()
        }
    }
}

fn is_corpus_file(name: &str) -> bool {
    name.ends_with(".json")
}

fn read_corpus_file(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Load every `*.json` file in `dir`.
///
/// Unreadable or malformed files are skipped with a warning. A missing
/// directory yields an empty corpus. Only a directory that exists but cannot
/// be listed is an error.
pub fn load_all(dir: &Path) -> Result<LoadReport> {
    let start = Instant::now();
    let mut report = LoadReport::default();

    if !dir.is_dir() {
        warn!("Corpus directory does not exist: {}", dir.display());
        warn!("No corpus files loaded");
        return Ok(report);
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list corpus directory: {}", dir.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().to_string();
        if !is_corpus_file(&name) {
            debug!("Ignoring non-JSON entry {}", name);
            continue;
        }

        match read_corpus_file(&entry.path()) {
            Ok(value) => {
                report.files.insert(name, value);
            }
            Err(e) => {
                warn!("Skipping corpus file {}: {:#}", name, e);
                report.skipped.push((name, format!("{:#}", e)));
            }
        }
    }

    if report.files.is_empty() {
        warn!("No corpus files loaded from {}", dir.display());
    } else {
        info!(
            "Loaded {} corpus files from {} in {}",
            report.files.len(),
            dir.display(),
            format_elapsed(start.elapsed())
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_skips_malformed_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.json"), r#"{"documents": []}"#).unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let report = load_all(dir.path()).unwrap();

        assert_eq!(report.files.len(), 1);
        assert!(report.files.contains_key("good.json"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "bad.json");
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        let report = load_all(&dir.path().join("absent")).unwrap();

        assert!(report.files.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_resolve_prefers_override() {
        let dir = tempdir().unwrap();
        let custom = dir.path().join("custom");
        assert_eq!(resolve_corpus_dir_from(dir.path(), Some(&custom)), custom);
    }

    #[test]
    fn test_resolve_picks_first_existing_candidate() {
        let root = tempdir().unwrap();
        let base = root.path().join("a").join("b");
        fs::create_dir_all(&base).unwrap();
        // Only ../../bioc exists relative to base
        fs::create_dir_all(root.path().join("bioc")).unwrap();

        let resolved = resolve_corpus_dir_from(&base, None);
        assert_eq!(resolved, base.join("../../bioc"));

        // ./bioc outranks ../../bioc once it exists
        fs::create_dir_all(base.join("bioc")).unwrap();
        assert_eq!(resolve_corpus_dir_from(&base, None), base.join("./bioc"));
    }

    #[test]
    fn test_resolve_falls_back_to_first_candidate() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("x").join("y");
        fs::create_dir_all(&base).unwrap();

        let resolved = resolve_corpus_dir_from(&base, None);
        assert_eq!(resolved, base.join("../bioc"));
    }
}
