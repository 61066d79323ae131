// ABOUTME: LRU cache of fitted calorie models with TTL expiry
// ABOUTME: Fitting happens outside the lock, so a cold race may fit twice but never blocks readers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{Clock, SystemClock};
use crate::config::ModelCacheConfig;
use crate::constants::cache::DEFAULT_MAX_MODELS;
use crate::errors::{AppError, AppResult};
use calorie_intelligence::FittedModel;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

/// A fitted model and when it was fitted
#[derive(Debug, Clone)]
pub struct CachedModel {
    /// The shared model
    pub model: Arc<FittedModel>,
    /// Fit timestamp from the cache clock
    pub fitted_at: DateTime<Utc>,
}

/// Bounded, expiring store of fitted models keyed by training-data fingerprint
///
/// Entries older than the TTL are treated as absent and evicted on access.
pub struct ModelCache<C: Clock = SystemClock> {
    store: Mutex<LruCache<String, CachedModel>>,
    ttl: ChronoDuration,
    clock: Arc<C>,
}

impl ModelCache<SystemClock> {
    /// Cache driven by the wall clock
    #[must_use]
    pub fn new(config: &ModelCacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }
}

impl<C: Clock> ModelCache<C> {
    /// Capacity used when the configuration asks for zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_MODELS) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    /// Cache driven by an injected clock
    #[must_use]
    pub fn with_clock(config: &ModelCacheConfig, clock: Arc<C>) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        let ttl = ChronoDuration::from_std(config.ttl).unwrap_or(ChronoDuration::MAX);
        Self {
            store: Mutex::new(LruCache::new(capacity)),
            ttl,
            clock,
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, LruCache<String, CachedModel>>> {
        self.store
            .lock()
            .map_err(|_| AppError::internal("model cache lock poisoned"))
    }

    fn is_expired(&self, entry: &CachedModel, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.fitted_at) >= self.ttl
    }

    /// Cached model for `key`, if present and not expired
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn get(&self, key: &str) -> AppResult<Option<Arc<FittedModel>>> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let lookup = store
            .get(key)
            .map(|entry| (self.is_expired(entry, now), Arc::clone(&entry.model)));
        let hit = match lookup {
            Some((true, _)) => {
                store.pop(key);
                debug!(key, "Cached model expired");
                None
            }
            Some((false, model)) => Some(model),
            None => None,
        };
        drop(store);
        Ok(hit)
    }

    /// Store a model under `key`, stamped with the current clock time
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn insert(&self, key: &str, model: Arc<FittedModel>) -> AppResult<()> {
        let entry = CachedModel {
            model,
            fitted_at: self.clock.now(),
        };
        let mut store = self.lock()?;
        if let Some((evicted, _)) = store.push(key.to_owned(), entry) {
            if evicted != key {
                debug!(evicted = %evicted, "Evicted least recently used model");
            }
        }
        drop(store);
        Ok(())
    }

    /// Cached model for `key`, fitting and storing one on a miss
    ///
    /// The lock is not held while `fit` runs.
    ///
    /// # Errors
    ///
    /// Propagates the error from `fit`, or an internal error if the lock is poisoned
    pub fn get_or_fit<F>(&self, key: &str, fit: F) -> AppResult<Arc<FittedModel>>
    where
        F: FnOnce() -> AppResult<FittedModel>,
    {
        if let Some(model) = self.get(key)? {
            debug!(key, "Model cache hit");
            return Ok(model);
        }

        info!(key, "Model cache miss, fitting");
        let model = Arc::new(fit()?);
        self.insert(key, Arc::clone(&model))?;
        Ok(model)
    }

    /// Remove the entry for `key`; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn invalidate(&self, key: &str) -> AppResult<bool> {
        let mut store = self.lock()?;
        let removed = store.pop(key).is_some();
        drop(store);
        Ok(removed)
    }

    /// Remove every entry
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn clear(&self) -> AppResult<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Drop every expired entry, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn purge_expired(&self) -> AppResult<usize> {
        let now = self.clock.now();
        let mut store = self.lock()?;
        let expired: Vec<String> = store
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            store.pop(key);
        }
        drop(store);
        if !expired.is_empty() {
            debug!(removed = expired.len(), "Purged expired models");
        }
        Ok(expired.len())
    }

    /// Number of stored entries, expired ones included until accessed
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Whether the cache holds no entries
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Time left before `key` expires; `None` when absent or already expired
    ///
    /// Does not change the LRU order.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the cache lock is poisoned
    pub fn remaining_ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        let now = self.clock.now();
        let store = self.lock()?;
        let remaining = store.peek(key).and_then(|entry| {
            self.ttl
                .checked_sub(&now.signed_duration_since(entry.fitted_at))
                .and_then(|left| left.to_std().ok())
                .filter(|left| !left.is_zero())
        });
        drop(store);
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn config(max_entries: usize) -> ModelCacheConfig {
        ModelCacheConfig {
            ttl: Duration::from_secs(60),
            max_entries,
        }
    }

    #[test]
    fn test_get_or_fit_fits_once() {
        let cache = ModelCache::new(&config(2));
        let mut fits = 0;
        for _ in 0..3 {
            cache
                .get_or_fit("data", || {
                    fits += 1;
                    Ok(FittedModel::default())
                })
                .unwrap();
        }
        assert_eq!(fits, 1);
    }

    #[test]
    fn test_entries_expire_with_the_clock() {
        let clock = Arc::new(ManualClock::default());
        let cache = ModelCache::with_clock(&config(2), Arc::clone(&clock));
        cache.insert("data", Arc::new(FittedModel::default())).unwrap();

        clock.advance(ChronoDuration::seconds(30));
        assert_eq!(cache.remaining_ttl("data").unwrap(), Some(Duration::from_secs(30)));
        assert!(cache.get("data").unwrap().is_some());

        clock.advance(ChronoDuration::seconds(30));
        assert!(cache.get("data").unwrap().is_none());
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_fit_errors_are_not_cached() {
        let cache = ModelCache::new(&config(2));
        let result = cache.get_or_fit("data", || Err(AppError::data("no rows")));
        assert!(result.is_err());
        assert_eq!(cache.len().unwrap(), 0);
    }
}
