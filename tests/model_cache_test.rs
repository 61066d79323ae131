// ABOUTME: Integration tests for the fitted-model cache
// ABOUTME: Tests TTL expiration with a manual clock, LRU capacity limits, and invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_advisor::cache::{ManualClock, ModelCache};
use calorie_advisor::config::ModelCacheConfig;
use calorie_intelligence::{CalorieEstimator, FittedModel};
use chrono::Duration as ChronoDuration;
use std::sync::Arc;
use std::time::Duration;

/// Helper: cache with a manual clock
fn create_test_cache(max_entries: usize, ttl_secs: u64) -> (ModelCache<ManualClock>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let config = ModelCacheConfig {
        ttl: Duration::from_secs(ttl_secs),
        max_entries,
    };
    (ModelCache::with_clock(&config, Arc::clone(&clock)), clock)
}

#[test]
fn test_lru_evicts_least_recently_used() {
    let (cache, _) = create_test_cache(2, 3600);
    cache.insert("a", Arc::new(FittedModel::default())).unwrap();
    cache.insert("b", Arc::new(FittedModel::default())).unwrap();

    // Touch "a" so "b" becomes least recently used
    assert!(cache.get("a").unwrap().is_some());
    cache.insert("c", Arc::new(FittedModel::default())).unwrap();

    assert_eq!(cache.len().unwrap(), 2);
    assert!(cache.get("a").unwrap().is_some());
    assert!(cache.get("b").unwrap().is_none());
    assert!(cache.get("c").unwrap().is_some());
}

#[test]
fn test_expired_model_is_refitted() {
    common::init_test_logging();
    let (cache, clock) = create_test_cache(4, 60);
    let data = common::synthetic_training_data(60);
    let estimator = CalorieEstimator::new(common::fast_forest());
    let mut fits = 0;
    let mut fit = || {
        fits += 1;
        estimator.fit_records(data.records())
    };

    let first = cache.get_or_fit(data.fingerprint(), &mut fit).unwrap();
    let again = cache.get_or_fit(data.fingerprint(), &mut fit).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    clock.advance(ChronoDuration::seconds(61));
    let refitted = cache.get_or_fit(data.fingerprint(), &mut fit).unwrap();
    assert!(!Arc::ptr_eq(&first, &refitted));
    drop(fit);
    assert_eq!(fits, 2);
}

#[test]
fn test_remaining_ttl_counts_down() {
    let (cache, clock) = create_test_cache(4, 100);
    cache.insert("model", Arc::new(FittedModel::default())).unwrap();
    assert_eq!(
        cache.remaining_ttl("model").unwrap(),
        Some(Duration::from_secs(100))
    );

    clock.advance(ChronoDuration::seconds(40));
    assert_eq!(
        cache.remaining_ttl("model").unwrap(),
        Some(Duration::from_secs(60))
    );

    clock.advance(ChronoDuration::seconds(60));
    assert_eq!(cache.remaining_ttl("model").unwrap(), None);
    assert_eq!(cache.remaining_ttl("missing").unwrap(), None);
}

#[test]
fn test_invalidate_clear_and_purge() {
    let (cache, clock) = create_test_cache(4, 10);
    cache.insert("a", Arc::new(FittedModel::default())).unwrap();
    cache.insert("b", Arc::new(FittedModel::default())).unwrap();

    assert!(cache.invalidate("a").unwrap());
    assert!(!cache.invalidate("a").unwrap());
    assert_eq!(cache.len().unwrap(), 1);

    clock.advance(ChronoDuration::seconds(10));
    assert_eq!(cache.purge_expired().unwrap(), 1);
    assert!(cache.is_empty().unwrap());

    cache.insert("c", Arc::new(FittedModel::default())).unwrap();
    cache.clear().unwrap();
    assert!(cache.is_empty().unwrap());
}

#[test]
fn test_zero_capacity_falls_back_to_default() {
    let (cache, _) = create_test_cache(0, 10);
    for key in ["a", "b", "c", "d"] {
        cache.insert(key, Arc::new(FittedModel::default())).unwrap();
    }
    assert_eq!(cache.len().unwrap(), 4);
}
