//! Flat key-value persistence
//!
//! A plain-text property file of `key=value` lines, one entry per line.
//! Reads load the whole file into a transient map; writes rewrite the whole
//! file. Storage problems never surface to callers: a missing or unreadable
//! file reads as an empty store, and a failed write is logged and dropped.
//!
//! Keys must not contain `=` or line breaks and values must not contain line
//! breaks; the format has no escaping.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File-backed flat key-value store.
///
/// The write path reloads the file, updates one entry and rewrites the whole
/// file; there is no atomicity across that sequence. Two stores racing on the
/// same file can lose updates (last writer wins with its own in-memory copy,
/// not a merged view). Callers sharing one file across threads must serialize
/// access externally.
#[derive(Debug)]
pub struct FlatKvStore {
    path: PathBuf,
}

impl FlatKvStore {
    /// Create a store over the given file. The file itself is created lazily
    /// by the first `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatKvStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`, or `None` when the key or the whole file is
    /// absent. Never fails: unreadable files read as an empty store.
    pub fn get(&self, key: &str) -> Option<String> {
        self.load_all().get(key).cloned()
    }

    /// Store `value` under `key`, rewriting the backing file.
    ///
    /// Best-effort by contract: an I/O failure is logged as a warning and
    /// otherwise swallowed, and previously stored entries may be lost when
    /// the rewrite fails partway.
    pub fn set(&self, key: &str, value: &str) {
        let mut entries = self.load_all();
        entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.store_all(&entries) {
            warn!(
                "could not save key-value store \"{}\": {}",
                self.path.display(),
                e
            );
        }
    }

    /// All keys currently present, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.load_all().into_keys().collect()
    }

    fn load_all(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("could not find key-value store file \"{}\"", self.path.display());
                return entries;
            }
            Err(e) => {
                warn!(
                    "could not load key-value store from \"{}\": {}",
                    self.path.display(),
                    e
                );
                return entries;
            }
        };

        for line in contents.lines() {
            let line = line.trim_start();
            // properties-style comment lines
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.to_string(), value.to_string());
            }
        }
        entries
    }

    fn store_all(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.path)?;
        for (key, value) in entries {
            writeln!(file, "{}={}", key, value)?;
        }
        file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FlatKvStore {
        FlatKvStore::new(dir.path().join("store.properties"))
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("foo", "bar");
        assert_eq!(store.get("foo"), Some("bar".to_string()));
    }

    #[test]
    fn test_read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("anything"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_first_write_creates_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(!store.path().exists());
        store.set("foo", "bar");
        assert!(store.path().exists());

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert!(on_disk.lines().any(|l| l == "foo=bar"));
    }

    #[test]
    fn test_overwrite_keeps_keys_unique() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("k", "first");
        store.set("k", "second");

        assert_eq!(store.get("k"), Some("second".to_string()));

        let on_disk = fs::read_to_string(store.path()).unwrap();
        assert_eq!(on_disk.lines().filter(|l| l.starts_with("k=")).count(), 1);
    }

    #[test]
    fn test_write_preserves_other_entries() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("a", "1");
        store.set("b", "2");

        assert_eq!(store.get("a"), Some("1".to_string()));
        assert_eq!(store.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_value_may_contain_equals_sign() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("url", "host=example;port=7051");
        assert_eq!(store.get("url"), Some("host=example;port=7051".to_string()));
    }

    #[test]
    fn test_comment_lines_skipped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.properties");
        fs::write(&path, "# header\n! other comment\n\nfoo=bar\n").unwrap();

        let store = FlatKvStore::new(path);
        assert_eq!(store.get("foo"), Some("bar".to_string()));
        assert_eq!(store.get("# header"), None);
    }

    #[test]
    fn test_keys_sorted() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("b", "2");
        store.set("a", "1");
        store.set("c", "3");

        assert_eq!(store.keys(), vec!["a", "b", "c"]);
    }
}
