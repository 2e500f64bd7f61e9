//! Content-addressed cache for loaded knowledge files.
//!
//! Source files are static for the process lifetime in the common case,
//! so extraction results are cached keyed by path. The cached entry
//! carries a SHA-256 digest of the file bytes and is invalidated when
//! the content changes on disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::core::errors::ApiError;

#[derive(Debug, Clone)]
struct CacheEntry {
    digest: String,
    text: String,
}

#[derive(Default)]
pub struct KnowledgeCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl KnowledgeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached extraction for `path`, or run `load` and cache
    /// its result. Nonexistent paths bypass the cache entirely so the
    /// loader decides whether absence is an error.
    pub fn load_with<F>(&self, path: &Path, load: F) -> Result<String, ApiError>
    where
        F: FnOnce(&Path) -> Result<String, ApiError>,
    {
        let Some(digest) = file_digest(path) else {
            return load(path);
        };

        {
            let entries = self.entries.lock().map_err(|_| {
                ApiError::Internal("knowledge cache lock poisoned".to_string())
            })?;
            if let Some(entry) = entries.get(path) {
                if entry.digest == digest {
                    tracing::debug!("knowledge cache hit for {}", path.display());
                    return Ok(entry.text.clone());
                }
                tracing::info!("knowledge file changed, reloading {}", path.display());
            }
        }

        let text = load(path)?;
        let mut entries = self.entries.lock().map_err(|_| {
            ApiError::Internal("knowledge cache lock poisoned".to_string())
        })?;
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                digest,
                text: text.clone(),
            },
        );
        Ok(text)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

fn file_digest(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Some(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn second_load_is_served_from_cache() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"leave policy text").expect("write");

        let cache = KnowledgeCache::new();
        let mut calls = 0;
        for _ in 0..2 {
            let text = cache
                .load_with(file.path(), |path| {
                    calls += 1;
                    Ok(fs::read_to_string(path).expect("readable"))
                })
                .expect("load");
            assert_eq!(text, "leave policy text");
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn content_change_invalidates_the_entry() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"version one").expect("write");

        let cache = KnowledgeCache::new();
        let first = cache
            .load_with(file.path(), |path| Ok(fs::read_to_string(path).expect("readable")))
            .expect("load");
        assert_eq!(first, "version one");

        fs::write(file.path(), b"version two").expect("rewrite");
        let second = cache
            .load_with(file.path(), |path| Ok(fs::read_to_string(path).expect("readable")))
            .expect("load");
        assert_eq!(second, "version two");
    }

    #[test]
    fn missing_files_bypass_the_cache() {
        let cache = KnowledgeCache::new();
        let text = cache
            .load_with(Path::new("/nonexistent/facts.json"), |_| Ok(String::new()))
            .expect("loader decides");
        assert_eq!(text, "");
        assert_eq!(cache.len(), 0);
    }
}
