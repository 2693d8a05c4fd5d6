//! TTL cache in front of a [`ContextSource`].
//!
//! The cached value is never served once `now >= expires`. On a miss the
//! source is loaded before `get` returns. Concurrent misses queue on a refresh
//! lock and re-check the slot, so a burst of requests triggers one load.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use super::ContextSource;
use crate::clock::Clock;

#[derive(Debug, Clone)]
struct CachedContext {
    value: String,
    expires: Instant,
}

pub struct ContextCache<S> {
    source: S,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: RwLock<Option<CachedContext>>,
    refresh: Mutex<()>,
}

impl<S: ContextSource> ContextCache<S> {
    pub fn new(source: S, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            ttl,
            clock,
            slot: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The current context, loading it from the source if stale or absent.
    pub async fn get(&self) -> String {
        if let Some(value) = self.fresh().await {
            return value;
        }

        let _refresh = self.refresh.lock().await;
        // Another task may have refreshed while we waited.
        if let Some(value) = self.fresh().await {
            return value;
        }

        let started = self.clock.now();
        let value = self.source.load().await;
        *self.slot.write().await = Some(CachedContext {
            value: value.clone(),
            expires: started + self.ttl,
        });
        tracing::debug!(ttl_secs = self.ttl.as_secs(), "context cache refreshed");
        value
    }

    /// Drop the cached value so the next `get` reloads.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    async fn fresh(&self) -> Option<String> {
        let now = self.clock.now();
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|cached| now < cached.expires)
            .map(|cached| cached.value.clone())
    }
}
