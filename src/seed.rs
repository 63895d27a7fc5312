//! Root seed acquisition and per-producer sub-seed derivation
//!
//! Every producer owns its own engine, seeded independently so its output
//! stream is deterministic given the root seed. Sub-seeds are drawn from a
//! root engine sequentially, i-th draw to i-th producer, before any thread
//! is spawned. This makes the full cache's output reproducible for a fixed
//! (seed, producer count, distribution) triple, independent of scheduling.

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};

/// Derive a 64-bit root seed from the OS entropy source
///
/// The entropy source's native word is 32 bits, narrower than the engine
/// seed width, so two successive draws are concatenated to fill it.
pub fn from_entropy() -> u64 {
    let mut device = OsRng;
    (u64::from(device.next_u32()) << 32) | u64::from(device.next_u32())
}

/// Draw `count` sub-seeds from a root engine seeded with `root_seed`
///
/// The i-th element seeds the i-th producer in construction order.
pub fn sub_seeds<E: RngCore + SeedableRng>(root_seed: u64, count: usize) -> Vec<u64> {
    let mut root = E::seed_from_u64(root_seed);
    (0..count).map(|_| root.next_u64()).collect()
}
