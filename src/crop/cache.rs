use std::ops::Range;

/// Border of the window a strip is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Left edge (horizontal pass) or top edge (vertical pass)
    Leading,
    /// Right edge (horizontal pass) or bottom edge (vertical pass)
    Trailing,
}

#[derive(Debug, Clone)]
struct CachedStrip {
    bounds: Range<usize>,
    entropy: f64,
}

/// Memoized strip entropies for one reduction pass
///
/// Holds at most one strip per side. A side's entropy is reused until that
/// side's boundary moves or the strip width changes.
#[derive(Default, Debug)]
pub struct StripCache {
    leading: Option<CachedStrip>,
    trailing: Option<CachedStrip>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses (entropy evaluations)
    pub misses: usize,
}

impl StripCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the cached entropy for `side` or compute and store it
    ///
    /// The closure runs only when the stored strip for `side` is missing
    /// or covers different bounds.
    pub fn get_or_compute<F>(&mut self, side: Side, bounds: Range<usize>, compute_fn: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let slot = self.slot_mut(side);

        if let Some(cached) = slot.as_ref().filter(|cached| cached.bounds == bounds) {
            let entropy = cached.entropy;
            self.stats.hits += 1;
            return entropy;
        }

        let entropy = compute_fn();
        *slot = Some(CachedStrip { bounds, entropy });
        self.stats.misses += 1;
        entropy
    }

    /// Drop the stored strip for `side`
    pub fn invalidate(&mut self, side: Side) {
        *self.slot_mut(side) = None;
    }

    /// Check if `side` currently holds a strip
    pub const fn is_cached(&self, side: Side) -> bool {
        match side {
            Side::Leading => self.leading.is_some(),
            Side::Trailing => self.trailing.is_some(),
        }
    }

    const fn slot_mut(&mut self, side: Side) -> &mut Option<CachedStrip> {
        match side {
            Side::Leading => &mut self.leading,
            Side::Trailing => &mut self.trailing,
        }
    }
}
