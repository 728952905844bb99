//! Deterministic weighted pattern sequencing and timed rotation.

use fnv::FnvHashMap;

use crate::constants::WEIGHT_REPEAT_SCALE;

pub const NEUTRAL_POOL: &str = "neutral";

/// Named ordered pattern lists the scheduler draws from.
#[derive(Clone, Debug, Default)]
pub struct PatternPools {
    pools: FnvHashMap<String, Vec<String>>,
}

impl PatternPools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, patterns: &[&str]) {
        self.pools
            .insert(name.to_string(), patterns.iter().map(|p| p.to_string()).collect());
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.pools.get(name).map(|v| v.as_slice())
    }
}

/// Relative pool shares, held in insertion order so sequence construction
/// is deterministic.
#[derive(Clone, Debug, Default)]
pub struct WeightMap {
    entries: Vec<(String, f32)>,
}

impl WeightMap {
    pub fn of(entries: &[(&str, f32)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, w)| (name.to_string(), *w))
                .collect(),
        }
    }

    pub fn total(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(name, w)| (name.as_str(), *w))
    }
}

/// Builds a weighted pattern ordering and rotates through it on a fixed
/// wall-clock interval. Rotation state is per-instance, owned by the
/// session that created it.
#[derive(Debug)]
pub struct ShapeScheduler {
    sequence: Vec<String>,
    rotation_index: usize,
    last_rotate_at: f64,
    interval_ms: f64,
}

impl ShapeScheduler {
    pub fn new(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            sequence: Vec::new(),
            rotation_index: 0,
            last_rotate_at: now_ms,
            interval_ms,
        }
    }

    /// Rebuild the sequence: for each weight entry, append
    /// `round(weight * 10 / total)` full copies of that pool, in weight-map
    /// order. A non-positive total (or nothing resolving) falls back to the
    /// neutral pool verbatim.
    ///
    /// Rebuilding preserves elapsed rotation time; the pointer re-wraps
    /// into the new sequence length.
    pub fn build_sequence(&mut self, pools: &PatternPools, weights: &WeightMap) {
        self.sequence.clear();
        let total = weights.total();
        if total > 0.0 {
            for (name, weight) in weights.iter() {
                let Some(pool) = pools.get(name) else {
                    continue;
                };
                let repeats = (weight * WEIGHT_REPEAT_SCALE / total).round().max(0.0) as usize;
                for _ in 0..repeats {
                    self.sequence.extend(pool.iter().cloned());
                }
            }
        }
        if self.sequence.is_empty() {
            if let Some(neutral) = pools.get(NEUTRAL_POOL) {
                self.sequence.extend(neutral.iter().cloned());
            }
        }
        if !self.sequence.is_empty() {
            self.rotation_index %= self.sequence.len();
        } else {
            self.rotation_index = 0;
        }
    }

    /// Advance the rotation pointer if the interval has elapsed.
    pub fn tick(&mut self, now_ms: f64) {
        if now_ms - self.last_rotate_at >= self.interval_ms {
            self.last_rotate_at = now_ms;
            if !self.sequence.is_empty() {
                self.rotation_index = (self.rotation_index + 1) % self.sequence.len();
            }
        }
    }

    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    pub fn current(&self) -> Option<&str> {
        self.sequence.get(self.rotation_index).map(|s| s.as_str())
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }
}
