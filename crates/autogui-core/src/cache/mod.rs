//! Content-addressed caching of expensive, deterministic transforms.
//!
//! Inputs are hashed to a stable key with [`content_key`]; results live in a
//! bounded in-memory LRU backed by a cache directory for on-disk artifacts.
//! A failing transform is returned to the caller and nothing is stored for
//! that key, so other keys are unaffected.

mod latex;

pub use latex::LatexRenderer;

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Lowercase hex SHA-256 of `content` followed by `params`.
pub fn content_key(content: &str, params: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update([0u8]);
    hasher.update(params.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug)]
pub struct ContentCache<T> {
    entries: LruCache<String, T>,
    dir: PathBuf,
    misses: u64,
}

impl<T> ContentCache<T> {
    /// `capacity` is clamped to at least one entry.
    pub fn new(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            dir: dir.into(),
            misses: 0,
        }
    }

    /// Directory for on-disk artifacts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times a transform had to run.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Return the cached value for `key`, running `transform` on a miss.
    /// The transform receives the cache directory.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        key: &str,
        transform: impl FnOnce(&Path) -> Result<T, E>,
    ) -> Result<&T, E> {
        let dir = &self.dir;
        let misses = &mut self.misses;
        self.entries.try_get_or_insert(key.to_string(), || {
            *misses += 1;
            tracing::debug!(key, "content cache miss");
            transform(dir)
        })
    }
}
