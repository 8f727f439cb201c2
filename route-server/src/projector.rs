//! Coordinate projection with a recency cache.
//!
//! Place identifiers repeat heavily — stop points come back request after
//! request — and the graph search behind a snap is the expensive part of
//! location handling. The projector keeps an LRU index from
//! (coordinate, street mode) to the engine's anchored location, batches the
//! misses of each request into one engine search, and runs that search
//! outside the cache lock so one slow search never blocks other workers'
//! reads.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;
use tracing::debug;

use crate::costing::CostModel;
use crate::domain::{Coordinate, RequestMode, TravelMode};
use crate::engine::{AnchoredLocation, EngineError, RoutingEngine, SnapOptions};

/// Error returned when a projector is configured with no room at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("projection cache capacity must be at least 1")]
pub struct InvalidCacheSize;

/// Snapshot of the cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Probes against the cache index.
    pub lookups: u64,
    /// Probes that had to go to the engine.
    pub misses: u64,
}

impl CacheStats {
    pub fn hits(&self) -> u64 {
        self.lookups - self.misses
    }
}

struct CacheIndex {
    entries: LruCache<(Coordinate, TravelMode), AnchoredLocation>,
    lookups: u64,
    misses: u64,
}

/// Shared projection service over one routing engine.
pub struct Projector {
    engine: Arc<dyn RoutingEngine>,
    snap_options: SnapOptions,
    index: Mutex<CacheIndex>,
}

impl Projector {
    /// Creates a projector with room for `cache_size` anchored locations.
    ///
    /// # Errors
    ///
    /// Returns `Err` when `cache_size` is zero.
    pub fn new(
        engine: Arc<dyn RoutingEngine>,
        cache_size: usize,
        snap_options: SnapOptions,
    ) -> Result<Self, InvalidCacheSize> {
        let capacity = NonZeroUsize::new(cache_size).ok_or(InvalidCacheSize)?;
        Ok(Self {
            engine,
            snap_options,
            index: Mutex::new(CacheIndex {
                entries: LruCache::new(capacity),
                lookups: 0,
                misses: 0,
            }),
        })
    }

    /// Resolves a batch of coordinates to engine-anchored locations.
    ///
    /// The result only contains coordinates the engine could snap; callers
    /// must detect omissions rather than assume full coverage. With
    /// `use_cache` set, hits are served from the index (and promoted to
    /// most-recently-used) under one lock, and only the misses reach the
    /// engine; without it, the call goes straight to the engine and cache
    /// state is left untouched — one-off user coordinates must not evict the
    /// hot stop points.
    ///
    /// The bike-share mode resolves under the walking key: dock access is
    /// pedestrian-reachable, so both modes share entries.
    pub fn resolve(
        &self,
        coordinates: &[Coordinate],
        mode: RequestMode,
        model: &CostModel,
        use_cache: bool,
    ) -> Result<HashMap<Coordinate, AnchoredLocation>, EngineError> {
        if use_cache {
            self.resolve_cached(coordinates, mode.projection_mode(), model)
        } else {
            let snapped = self.engine.snap(coordinates, &self.snap_options, model)?;
            Ok(snapped.into_iter().collect())
        }
    }

    fn resolve_cached(
        &self,
        coordinates: &[Coordinate],
        effective_mode: TravelMode,
        model: &CostModel,
    ) -> Result<HashMap<Coordinate, AnchoredLocation>, EngineError> {
        let mut resolved = HashMap::with_capacity(coordinates.len());
        let mut missed = Vec::new();

        {
            let mut index = self.lock_index();
            for &coord in coordinates {
                index.lookups += 1;
                match index.entries.get(&(coord, effective_mode)) {
                    Some(location) => {
                        resolved.insert(coord, location.clone());
                    }
                    None => {
                        index.misses += 1;
                        missed.push(coord);
                    }
                }
            }
        }

        if !missed.is_empty() {
            debug!(count = missed.len(), "Snapping cache misses");
            let snapped = self.engine.snap(&missed, &self.snap_options, model)?;

            let mut index = self.lock_index();
            for (coord, location) in snapped {
                index.entries.put((coord, effective_mode), location.clone());
                resolved.insert(coord, location);
            }
        }

        Ok(resolved)
    }

    /// Current counter values.
    pub fn stats(&self) -> CacheStats {
        let index = self.lock_index();
        CacheStats {
            lookups: index.lookups,
            misses: index.misses,
        }
    }

    /// Number of anchored locations currently cached.
    pub fn cached_len(&self) -> usize {
        self.lock_index().entries.len()
    }

    fn lock_index(&self) -> std::sync::MutexGuard<'_, CacheIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
