//! Flat material counter owned by one agent.
//!
//! Counts are unsigned and only ever decremented through `try_remove`, which
//! checks and subtracts in one step, so a count can never go negative and a
//! failed removal leaves the inventory untouched.

use rustc_hash::FxHashMap;

use va_core::Material;

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    counts: FxHashMap<Material, u32>,
    total:  u32,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` units of `material`; returns the new count.
    pub fn add(&mut self, material: Material, n: u32) -> u32 {
        if n == 0 {
            return self.count(material);
        }
        let count = self.counts.entry(material).or_insert(0);
        *count = count.saturating_add(n);
        self.total = self.total.saturating_add(n);
        *count
    }

    /// Remove `n` units if at least `n` are held.  Returns `false` and
    /// changes nothing otherwise.
    pub fn try_remove(&mut self, material: Material, n: u32) -> bool {
        let Some(count) = self.counts.get_mut(&material) else {
            return n == 0;
        };
        if *count < n {
            return false;
        }
        *count -= n;
        self.total -= n;
        if *count == 0 {
            self.counts.remove(&material);
        }
        true
    }

    /// Remove one unit of the first material in `preference` that is held.
    pub fn take_first_of(&mut self, preference: &[Material]) -> Option<Material> {
        let material = self.first_held(preference)?;
        self.try_remove(material, 1).then_some(material)
    }

    /// The first material in `preference` with a non-zero count.
    pub fn first_held(&self, preference: &[Material]) -> Option<Material> {
        preference.iter().copied().find(|&m| self.count(m) > 0)
    }

    #[inline]
    pub fn count(&self, material: Material) -> u32 {
        self.counts.get(&material).copied().unwrap_or(0)
    }

    #[inline]
    pub fn total_count(&self) -> u32 {
        self.total
    }

    #[inline]
    pub fn is_full(&self, threshold: u32) -> bool {
        self.total >= threshold
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Non-zero entries, sorted by material.
    pub fn contents(&self) -> Vec<(Material, u32)> {
        let mut out: Vec<_> = self.counts.iter().map(|(&m, &c)| (m, c)).collect();
        out.sort_unstable();
        out
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}
