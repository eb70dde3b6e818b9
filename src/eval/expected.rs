//! Exact expected score of a hold.
//!
//! Every outcome of the free dice is enumerated and scored; there is no
//! sampling. The score total is kept as an integer and divided once, so the
//! result is the nearest `f64` to the exact rational mean.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::trace;

use super::score::score;
use crate::dice::{Face, Hold};
use crate::enumerate::SequenceIter;

/// Mean score of `held` plus `num_free` dice re-rolled with `num_sides` sides.
///
/// With `num_free == 0` this is exactly `score(held)`. Costs
/// `num_sides ^ num_free` scorings.
pub fn expected_value(held: &[Face], num_sides: u32, num_free: usize) -> f64 {
    let alphabet: Vec<Face> = (1..=num_sides).collect();
    expected_over(held, &alphabet, num_free)
}

fn expected_over(held: &[Face], alphabet: &[Face], num_free: usize) -> f64 {
    let mut combined: Vec<Face> = Vec::with_capacity(held.len() + num_free);
    let mut total: u64 = 0;
    let mut outcomes: u64 = 0;

    for outcome in SequenceIter::new(alphabet, num_free) {
        combined.clear();
        combined.extend_from_slice(held);
        combined.extend_from_slice(&outcome);
        total += score(&combined);
        outcomes += 1;
    }

    if outcomes == 0 {
        return 0.0;
    }
    total as f64 / outcomes as f64
}

/// Cache hit/miss counters for an [`Evaluator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Expected-value evaluator for one die size, with optional memoization.
///
/// Entries are keyed by the canonical hold and the number of free dice.
/// Cached values are the same pure results `expected_value` returns, so the
/// cache can be shared across threads and across hands.
pub struct Evaluator {
    num_sides: u32,
    alphabet: Vec<Face>,
    cache: Option<Mutex<HashMap<(Hold, usize), f64>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Evaluator {
    /// Creates an evaluator that recomputes every request.
    pub fn new(num_sides: u32) -> Self {
        Evaluator {
            num_sides,
            alphabet: (1..=num_sides).collect(),
            cache: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates an evaluator that memoizes results.
    pub fn with_cache(num_sides: u32) -> Self {
        Evaluator {
            cache: Some(Mutex::new(HashMap::new())),
            ..Evaluator::new(num_sides)
        }
    }

    pub fn num_sides(&self) -> u32 {
        self.num_sides
    }

    /// Expected score of keeping `hold` and rolling `num_free` dice.
    pub fn evaluate(&self, hold: &[Face], num_free: usize) -> f64 {
        let Some(cache) = &self.cache else {
            return expected_over(hold, &self.alphabet, num_free);
        };

        let mut key_hold = hold.to_vec();
        key_hold.sort_unstable();
        let key = (key_hold, num_free);

        if let Some(&value) = cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(hold = ?key.0, num_free, "expected value cache hit");
            return value;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = expected_over(&key.0, &self.alphabet, num_free);
        cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, value);
        value
    }

    /// Current cache counters. All zero when caching is disabled.
    pub fn stats(&self) -> CacheStats {
        let entries = self
            .cache
            .as_ref()
            .map(|c| c.lock().unwrap_or_else(|p| p.into_inner()).len())
            .unwrap_or(0);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}
