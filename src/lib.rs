//! rngcache - Concurrent pregeneration cache for expensive random draws
//!
//! rngcache hides the latency of individually expensive random draws (e.g.
//! non-uniform distributions) behind a pool of background producer threads.
//! Each producer pre-fills a fixed-capacity chunk of values; a single
//! consumer drains the active chunk at memory speed and swaps in a freshly
//! filled chunk in round-robin order whenever it runs dry.
//!
//! # Architecture
//!
//! - **Chunks**: fixed-capacity value buffers, exchanged wholesale, never shared
//! - **Producers**: one thread + engine + distribution copy each, refilling perpetually
//! - **Facade**: `RngCache`, the consumer-facing round-robin front
//! - **Reproducibility**: per-producer sub-seeds derived from one root seed,
//!   so output is deterministic for a fixed (seed, producers, distribution,
//!   chunk capacity) tuple regardless of thread scheduling
//!
//! # Example
//!
//! ```
//! use rngcache::{CacheConfig, RngCache};
//! use rand_distr::StandardNormal;
//!
//! let config = CacheConfig {
//!     seed: Some(42),
//!     producers: Some(2),
//!     chunk_capacity: Some(1024),
//! };
//! let mut cache: RngCache<f64> = RngCache::with_config(StandardNormal, config)?;
//! let value = cache.generate()?;
//! # let _ = value;
//! # Ok::<(), rngcache::CacheError>(())
//! ```

pub mod cache;
pub mod chunk;
pub mod config;
pub mod error;
pub mod producer;
pub mod seed;
pub mod stats;

// Re-export commonly used types
pub use cache::{CacheConfig, RngCache};
pub use chunk::Chunk;
pub use error::{CacheError, Result};
