//! In-memory token pool

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use perx_common::time::{Clock, SystemClock};
use perx_domain::{Result, Token};

use super::ports::TokenPool;

#[derive(Clone)]
struct Entry {
    token: Token,
    /// `None` when `now + ttl` is past the clock's range.
    expires_at: Option<Instant>,
}

/// Process-local [`TokenPool`] backed by a sharded concurrent map.
///
/// Expired entries are reported as misses but stay in the map until they are
/// overwritten.
pub struct InMemoryTokenPool {
    entries: DashMap<String, Entry>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTokenPool {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { entries: DashMap::new(), clock }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryTokenPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTokenPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTokenPool").field("entries", &self.entries.len()).finish()
    }
}

#[async_trait]
impl TokenPool for InMemoryTokenPool {
    async fn get(&self, key: &str) -> Result<Option<Token>> {
        let now = self.clock.now();
        Ok(self
            .entries
            .get(key)
            .filter(|entry| entry.expires_at.map_or(true, |expires_at| now < expires_at))
            .map(|entry| entry.token.clone()))
    }

    async fn put(&self, key: &str, token: Token, ttl: Duration) -> Result<()> {
        let expires_at = self.clock.now().checked_add(ttl);
        self.entries.insert(key.to_string(), Entry { token, expires_at });
        Ok(())
    }
}
