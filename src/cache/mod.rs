//! Consumer-facing cache facade
//!
//! [`RngCache`] is the front of the crate: it owns the active chunk the
//! consumer drains, the pool of background producers, and the round-robin
//! cursor that picks which producer hands over the next full chunk.
//!
//! # Round-robin rationale
//!
//! Cycling through all N producers before revisiting any one gives each
//! producer up to `(N-1) * capacity` consumed values of wall-clock slack
//! to refill before being asked again, smoothing throughput instead of
//! starving a single producer's engine.
//!
//! # Single consumer
//!
//! `generate()` takes `&mut self` and the fast path performs no
//! synchronization, so the cache is single-consumer by construction.
//! Producers are the only concurrency inside.

use crate::chunk::Chunk;
use crate::error::{CacheError, Result};
use crate::producer::Producer;
use crate::seed;
use rand::distributions::Distribution;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::mem::size_of;

/// Target memory footprint of one chunk when no capacity is configured
const DEFAULT_CHUNK_BYTES: usize = 128 * 1024;

/// Default chunk capacity for a value type: ~128 KiB worth of elements
fn default_capacity<T>() -> usize {
    (DEFAULT_CHUNK_BYTES / size_of::<T>().max(1)).max(1)
}

/// Construction-time parameters, all optional
///
/// Every field has a well-defined default; zero values are rejected
/// rather than coerced, since an empty pool or zero-size chunk would
/// deadlock the hand-off protocol.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Root seed; omission derives one from OS entropy
    pub seed: Option<u64>,
    /// Producer thread count; omission uses available hardware
    /// parallelism, with a floor of 1
    pub producers: Option<usize>,
    /// Values per chunk; omission targets ~128 KiB per chunk
    pub chunk_capacity: Option<usize>,
}

impl CacheConfig {
    /// Resolve the producer count, rejecting an explicit zero
    fn resolve_producers(&self) -> Result<usize> {
        match self.producers {
            Some(0) => Err(CacheError::ZeroProducers),
            Some(count) => Ok(count),
            None => Ok(num_cpus::get().max(1)),
        }
    }

    /// Resolve the chunk capacity for value type `T`, rejecting zero
    fn resolve_capacity<T>(&self) -> Result<usize> {
        match self.chunk_capacity {
            Some(0) => Err(CacheError::ZeroChunkCapacity),
            Some(capacity) => Ok(capacity),
            None => Ok(default_capacity::<T>()),
        }
    }
}

/// Pregeneration cache handing out one value per call
///
/// The consumed sequence is deterministic at chunk granularity: producer
/// 0's first capacity-sized run, then producer 1's, and so on, cycling.
/// Chunks are never interleaved, reordered, duplicated or dropped.
///
/// Dropping the cache shuts every producer down and joins its thread
/// before the active chunk is released; teardown is deterministic on
/// every exit path.
pub struct RngCache<T> {
    active: Chunk<T>,
    producers: Vec<Producer<T>>,
    next_producer: usize,
}

impl<T: Copy + Send + 'static> RngCache<T> {
    /// Create a cache with default configuration
    ///
    /// Entropy seeding, one producer per hardware thread, ~128 KiB chunks.
    pub fn new<D>(distribution: D) -> Result<Self>
    where
        D: Distribution<T> + Clone + Send + 'static,
    {
        Self::with_config(distribution, CacheConfig::default())
    }

    /// Create a cache with explicit configuration
    ///
    /// Uses xoshiro256++ as the engine; see [`RngCache::with_engine`] to
    /// supply a different one.
    pub fn with_config<D>(distribution: D, config: CacheConfig) -> Result<Self>
    where
        D: Distribution<T> + Clone + Send + 'static,
    {
        Self::with_engine::<D, Xoshiro256PlusPlus>(distribution, config)
    }

    /// Create a cache with an explicit engine type
    ///
    /// Sub-seeds are drawn from the root engine before any producer
    /// thread is spawned, so seed assignment is deterministic and
    /// independent of scheduling. The active chunk starts empty, forcing
    /// a hand-off on the first `generate()` call.
    pub fn with_engine<D, E>(distribution: D, config: CacheConfig) -> Result<Self>
    where
        D: Distribution<T> + Clone + Send + 'static,
        E: RngCore + SeedableRng + Send + 'static,
    {
        let producer_count = config.resolve_producers()?;
        let capacity = config.resolve_capacity::<T>()?;
        let root_seed = config.seed.unwrap_or_else(seed::from_entropy);

        let producers = seed::sub_seeds::<E>(root_seed, producer_count)
            .into_iter()
            .map(|sub_seed| Producer::spawn::<D, E>(distribution.clone(), sub_seed, capacity))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            active: Chunk::new(capacity),
            producers,
            next_producer: 0,
        })
    }

    /// Return one value of the distribution's result type
    ///
    /// Fast path: pop from the active chunk, no locking. When the chunk
    /// is exhausted, exchange it for the next producer's full one in
    /// round-robin order; this is the only blocking path, and it blocks
    /// only if that specific producer has not finished its current fill.
    #[inline]
    pub fn generate(&mut self) -> Result<T> {
        if self.active.is_empty() {
            let producer = &self.producers[self.next_producer];
            self.next_producer = (self.next_producer + 1) % self.producers.len();
            producer.swap_chunk(&mut self.active)?;
        }
        Ok(self.active.next())
    }

    /// Number of producer threads backing this cache
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    /// Values held per chunk
    pub fn chunk_capacity(&self) -> usize {
        self.active.capacity()
    }
}
