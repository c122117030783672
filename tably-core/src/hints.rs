//! One-time hint flags ("has the user been shown this before?").
//!
//! Injected as a small capability so the wizard stays testable with a fake;
//! the durable implementation keeps a JSON file and replaces it atomically.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Hint shown once when the first share code appears on the summary step
pub const SHARE_CODE_HINT: &str = "summary-share-code";

pub trait HintStore {
    fn has_seen(&self, key: &str) -> bool;
    fn mark_seen(&mut self, key: &str) -> Result<()>;
}

// ============================================================================
// Durable JSON store
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct HintFile {
    seen: BTreeSet<String>,
}

#[derive(Debug)]
pub struct JsonHintStore {
    path: PathBuf,
    seen: BTreeSet<String>,
}

impl JsonHintStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let seen = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read hint file: {}", path.display()))?;
            let file: HintFile =
                serde_json::from_str(&content).context("Failed to parse hint file")?;
            file.seen
        } else {
            BTreeSet::new()
        };
        Ok(Self { path, seen })
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create hint directory: {}", parent.display())
            })?;
        }
        let payload = serde_json::to_string_pretty(&HintFile {
            seen: self.seen.clone(),
        })
        .context("Failed to serialize hints")?;

        let tmp_path = temp_path(&self.path);
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temp hint file: {}", tmp_path.display()))?;
        file.write_all(payload.as_bytes())
            .context("Failed to write hints")?;
        file.sync_all().context("Failed to flush hints")?;

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!("Failed to atomically replace hint file: {}", self.path.display())
        })?;
        Ok(())
    }
}

impl HintStore for JsonHintStore {
    fn has_seen(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    fn mark_seen(&mut self, key: &str) -> Result<()> {
        if self.seen.insert(key.to_string()) {
            self.save()?;
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("hints.json");
    path.with_file_name(format!("{}.tmp", file_name))
}

// ============================================================================
// In-memory fake
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryHintStore {
    seen: BTreeSet<String>,
}

impl HintStore for MemoryHintStore {
    fn has_seen(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    fn mark_seen(&mut self, key: &str) -> Result<()> {
        self.seen.insert(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mark_seen_round_trips_through_the_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("hints.json");

        let mut store = JsonHintStore::load(&path).unwrap();
        assert!(!store.has_seen(SHARE_CODE_HINT));
        store.mark_seen(SHARE_CODE_HINT).unwrap();
        assert!(store.has_seen(SHARE_CODE_HINT));

        // A fresh load sees the durable flag.
        let reloaded = JsonHintStore::load(&path).unwrap();
        assert!(reloaded.has_seen(SHARE_CODE_HINT));
        assert!(!reloaded.has_seen("some-other-hint"));
    }

    #[test]
    fn memory_store_behaves_the_same_without_io() {
        let mut store = MemoryHintStore::default();
        assert!(!store.has_seen("x"));
        store.mark_seen("x").unwrap();
        assert!(store.has_seen("x"));
    }
}
