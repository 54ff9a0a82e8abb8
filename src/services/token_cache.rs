// src/services/token_cache.rs
// DOCUMENTATION: In-memory cache for the spreadsheet OAuth access token
// PURPOSE: Avoid a token exchange on every export

use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Tokens are refreshed this long before Google says they expire
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Cache entry with expiration
#[derive(Clone, Debug)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Single-slot token cache
/// DOCUMENTATION: Thread-safe; shared by all workers through the sheets client
#[derive(Default)]
pub struct TokenCache {
    slot: RwLock<Option<CacheEntry<String>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached token if it is still usable
    pub async fn get(&self) -> Option<String> {
        let slot = self.slot.read().await;

        match slot.as_ref() {
            Some(entry) if !entry.is_expired() => Some(entry.data.clone()),
            Some(_) => {
                log::debug!("Access token EXPIRED");
                None
            }
            None => None,
        }
    }

    /// Store a token that Google says lives for `expires_in`
    pub async fn set(&self, token: String, expires_in: Duration) {
        let ttl = expires_in.saturating_sub(REFRESH_MARGIN);
        let mut slot = self.slot.write().await;
        *slot = Some(CacheEntry::new(token, ttl));
        log::debug!("Access token cached (TTL: {}s)", ttl.as_secs());
    }

    /// Drop the cached token
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}
