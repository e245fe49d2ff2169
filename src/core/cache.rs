//! Bounded FIFO cache for sample-size search results
//!
//! Eviction is strictly insertion-ordered: a lookup never refreshes an
//! entry's position, so under pressure the oldest insertion goes first
//! regardless of how recently it was read. This matters for reproducibility
//! and is deliberately NOT an LRU.

use std::collections::{HashMap, VecDeque};

use crate::core::search::SearchResult;

/// Default capacity of the plan cache.
pub const DEFAULT_PLAN_CACHE_CAPACITY: usize = 128;

/// Scale for rounding float parameters to 6 decimal digits.
const KEY_SCALE: f64 = 1e6;

/// Full parameter tuple identifying one search, with floats quantized so
/// equal-after-rounding requests share an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanKey {
    aql: u64,
    ltpd: u64,
    alpha: u64,
    beta: u64,
    c_value: u32,
    lot_size: u64,
}

impl PlanKey {
    pub fn new(aql: f64, ltpd: f64, alpha: f64, beta: f64, c_value: u32, lot_size: u64) -> Self {
        Self {
            aql: quantize(aql),
            ltpd: quantize(ltpd),
            alpha: quantize(alpha),
            beta: quantize(beta),
            c_value,
            lot_size,
        }
    }
}

fn quantize(value: f64) -> u64 {
    (value.max(0.0) * KEY_SCALE).round() as u64
}

/// Bounded map plus an explicit insertion queue, instead of relying on the
/// iteration order of a generic mapping type.
#[derive(Debug)]
pub struct PlanCache {
    entries: HashMap<PlanKey, SearchResult>,
    order: VecDeque<PlanKey>,
    capacity: usize,
}

impl PlanCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Lookup without any recency side effect.
    pub fn get(&self, key: &PlanKey) -> Option<&SearchResult> {
        self.entries.get(key)
    }

    /// Insert, evicting the oldest-inserted entry at capacity. Re-inserting
    /// an existing key replaces its value but keeps its queue position.
    pub fn insert(&mut self, key: PlanKey, value: SearchResult) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, value);
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.entries.insert(key, value);
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(DEFAULT_PLAN_CACHE_CAPACITY)
    }
}
