//! # Result Cache Module
//!
//! ## Purpose
//! Bounded memoization of balancer results, keyed by canonicalized equation
//! text. The cache is an explicitly owned object handed to the engine at
//! construction - not a module-level dictionary - with least-recently-used
//! eviction at a fixed capacity. It is purely an optimization: with the cache
//! absent (capacity 0) every result is identical, just recomputed.
//!
//! ## Concurrency
//! A single `Mutex` guards the map and the access clock. The lock is held
//! across the compute closure, so when several callers race on the same
//! uncached key only one computation runs, and an eviction can never remove
//! an entry out from under a reader. Balancing is synchronous and bounded,
//! so holding the lock through it is cheap.
use crate::Balancer::equation_balancer::BalancedEquation;
use crate::errors::ChemEngineError;
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

struct CacheInner {
    /// value plus the tick of its last access
    entries: HashMap<String, (BalancedEquation, u64)>,
    tick: u64,
}

pub struct BalanceCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl BalanceCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                tick: 0,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached balance for `key`, or run `compute`, cache its
    /// success and return it. Errors are never cached: a failed balance is
    /// deterministic anyway and keeping it would only displace good entries.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Result<BalancedEquation, ChemEngineError>
    where
        F: FnOnce() -> Result<BalancedEquation, ChemEngineError>,
    {
        if self.capacity == 0 {
            return compute();
        }
        let mut inner = self.lock();
        inner.tick += 1;
        let now = inner.tick;
        if let Some((value, stamp)) = inner.entries.get_mut(key) {
            *stamp = now;
            debug!("balance cache hit: '{}'", key);
            return Ok(value.clone());
        }
        debug!("balance cache miss: '{}'", key);
        let value = compute()?;
        if inner.entries.len() >= self.capacity {
            let lru_key = inner
                .entries
                .iter()
                .min_by_key(|(_, (_, stamp))| *stamp)
                .map(|(k, _)| k.clone());
            if let Some(lru_key) = lru_key {
                inner.entries.remove(&lru_key);
                debug!("balance cache evicted: '{}'", lru_key);
            }
        }
        inner.entries.insert(key.to_string(), (value.clone(), now));
        Ok(value)
    }
}
