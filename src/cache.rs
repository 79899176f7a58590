//! Key-value cache for packed repository contents.
//!
//! The agent treats the cache as an external collaborator addressed by a
//! namespace and a string key. `KvStore` is the seam; `InMemoryKvStore` is
//! the default non-persistent implementation with lazy TTL expiry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Namespace under which packed repo contents are stored.
pub const REPO_CONTENTS_NAMESPACE: &str = "github-repo-contents";

/// Options for a cache write.
#[derive(Debug, Clone)]
pub struct SetOptions {
    /// Time-to-live after which the entry is considered expired.
    pub ttl: Duration,

    /// Content-type marker stored alongside the value.
    pub content_type: String,
}

/// A key-value store with namespaced string keys and per-entry expiry.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Check whether a non-expired entry exists.
    async fn exists(&self, namespace: &str, key: &str) -> bool;

    /// Read an entry as text. Returns `None` if missing or expired.
    async fn get_text(&self, namespace: &str, key: &str) -> Option<String>;

    /// Store a value under the given namespace and key.
    async fn set(&self, namespace: &str, key: &str, value: &str, opts: SetOptions);
}

#[derive(Clone)]
struct Entry {
    value: String,
    #[allow(dead_code)]
    content_type: String,
    expires_at: Instant,
}

/// In-memory cache (non-persistent).
///
/// Expired entries are dropped lazily on access; concurrent requests for
/// the same missing key may each trigger an upstream fetch, which is
/// accepted behavior.
#[derive(Clone, Default)]
pub struct InMemoryKvStore {
    entries: Arc<RwLock<HashMap<(String, String), Entry>>>,
}

impl InMemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn get_live(&self, namespace: &str, key: &str) -> Option<Entry> {
        let map_key = (namespace.to_string(), key.to_string());
        let entries = self.entries.read().await;
        let entry = entries.get(&map_key)?;
        if entry.expires_at <= Instant::now() {
            drop(entries);
            self.entries.write().await.remove(&map_key);
            return None;
        }
        Some(entry.clone())
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn exists(&self, namespace: &str, key: &str) -> bool {
        self.get_live(namespace, key).await.is_some()
    }

    async fn get_text(&self, namespace: &str, key: &str) -> Option<String> {
        self.get_live(namespace, key).await.map(|e| e.value)
    }

    async fn set(&self, namespace: &str, key: &str, value: &str, opts: SetOptions) {
        let entry = Entry {
            value: value.to_string(),
            content_type: opts.content_type,
            expires_at: Instant::now() + opts.ttl,
        };
        self.entries
            .write()
            .await
            .insert((namespace.to_string(), key.to_string()), entry);
    }
}
