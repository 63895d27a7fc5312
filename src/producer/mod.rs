//! Background producer threads
//!
//! Each [`Producer`] owns one dedicated OS thread that perpetually refills
//! a private [`Chunk`] from its own engine and distribution copy. The chunk
//! is handed to the consumer facade through [`Producer::swap_chunk`], an
//! atomic exchange under the producer's monitor, so at any instant the
//! chunk has exactly one owner: the fill thread or the facade.
//!
//! # State machine
//!
//! A producer's chunk cycles `Filling → Full (waiting for swap) →
//! Emptying (owned by the facade) → Filling → …`. The terminal state,
//! shutdown, is reachable from either wait point once the flag is set;
//! the flag is only checked at wait points, so a fill already in progress
//! always runs to completion first.
//!
//! # Thread safety
//!
//! The monitor's mutex serializes exactly two parties: this producer's
//! fill thread and the single consumer facade. One condition variable
//! serves both waiters; they can never wait simultaneously (the facade
//! waits only while the chunk is not full, the fill thread only while it
//! is not empty), so `notify_one` always wakes the right peer.

use crate::chunk::Chunk;
use crate::error::{CacheError, Result};
use rand::distributions::Distribution;
use rand::{RngCore, SeedableRng};
use std::mem;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// State guarded by the producer's monitor
struct Shared<T> {
    chunk: Chunk<T>,
    shutdown: bool,
}

/// Mutex + condition pair mediating chunk hand-off
struct Monitor<T> {
    state: Mutex<Shared<T>>,
    cond: Condvar,
}

impl<T> Monitor<T> {
    /// Lock the monitor, recovering the guard if the peer thread panicked
    fn lock(&self) -> MutexGuard<'_, Shared<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One background fill thread plus the chunk it keeps topped up
///
/// Dropping a producer signals shutdown, wakes the fill thread at
/// whichever wait point it is blocked on, and joins it unconditionally.
/// No detached threads survive the producer.
pub struct Producer<T> {
    monitor: Arc<Monitor<T>>,
    handle: Option<JoinHandle<()>>,
}

impl<T: Copy + Send + 'static> Producer<T> {
    /// Spawn a producer with its own distribution copy and sub-seed
    ///
    /// The fill thread starts immediately: the private chunk begins empty,
    /// so the first fill happens before any hand-off is requested.
    pub fn spawn<D, E>(distribution: D, seed: u64, capacity: usize) -> Result<Self>
    where
        D: Distribution<T> + Send + 'static,
        E: RngCore + SeedableRng + Send + 'static,
    {
        let monitor = Arc::new(Monitor {
            state: Mutex::new(Shared {
                chunk: Chunk::new(capacity),
                shutdown: false,
            }),
            cond: Condvar::new(),
        });

        let fill_monitor = Arc::clone(&monitor);
        let handle = thread::Builder::new()
            .name("rngcache-producer".to_string())
            .spawn(move || {
                let mut engine = E::seed_from_u64(seed);
                run_fill_loop(&fill_monitor, &distribution, &mut engine);
            })
            .map_err(CacheError::Spawn)?;

        Ok(Self {
            monitor,
            handle: Some(handle),
        })
    }

    /// Exchange the caller's exhausted chunk for this producer's full one
    ///
    /// Blocks until the private chunk is full, then swaps it with
    /// `active` and wakes the fill thread to refill the exhausted one.
    /// If shutdown is observed instead of fullness the hand-off fails
    /// with [`CacheError::Closed`]; under correct facade usage this is
    /// unreachable.
    pub fn swap_chunk(&self, active: &mut Chunk<T>) -> Result<()> {
        {
            let mut state = self.monitor.lock();
            while !state.shutdown && !state.chunk.is_full() {
                state = self
                    .monitor
                    .cond
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if state.shutdown {
                return Err(CacheError::Closed);
            }
            mem::swap(&mut state.chunk, active);
        }
        self.monitor.cond.notify_one();
        Ok(())
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        {
            let mut state = self.monitor.lock();
            state.shutdown = true;
        }
        self.monitor.cond.notify_one();
        if let Some(handle) = self.handle.take() {
            // The thread observes the flag at its next wait point; a join
            // error only occurs if the fill thread panicked.
            let _ = handle.join();
        }
    }
}

/// Perpetual fill loop run by the producer's thread
///
/// Waits until the chunk is empty (handed back by the facade) or shutdown
/// is requested, refills one value at a time from the distribution, then
/// notifies the monitor and loops.
fn run_fill_loop<T, D, E>(monitor: &Monitor<T>, distribution: &D, engine: &mut E)
where
    T: Copy,
    D: Distribution<T>,
    E: RngCore,
{
    loop {
        {
            let mut state = monitor.lock();
            while !state.shutdown && !state.chunk.is_empty() {
                state = monitor
                    .cond
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if state.shutdown {
                return;
            }
            state.chunk.refill(|| distribution.sample(&mut *engine));
        }
        monitor.cond.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_xoshiro::Xoshiro256PlusPlus;

    /// Pass-through distribution: emits the engine's raw 64-bit output,
    /// making producer streams directly comparable to an engine replay.
    #[derive(Clone)]
    struct RawDraw;

    impl Distribution<u64> for RawDraw {
        fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> u64 {
            rng.next_u64()
        }
    }

    fn replay(seed: u64, count: usize) -> Vec<u64> {
        let mut engine = Xoshiro256PlusPlus::seed_from_u64(seed);
        (0..count).map(|_| engine.next_u64()).collect()
    }

    #[test]
    fn test_swap_yields_full_chunk() {
        let producer =
            Producer::spawn::<RawDraw, Xoshiro256PlusPlus>(RawDraw, 99, 32).unwrap();
        let mut active: Chunk<u64> = Chunk::new(32);
        producer.swap_chunk(&mut active).unwrap();
        assert!(active.is_full());
    }

    #[test]
    fn test_chunk_matches_engine_replay() {
        let seed = 1234;
        let capacity = 16;
        let producer =
            Producer::spawn::<RawDraw, Xoshiro256PlusPlus>(RawDraw, seed, capacity).unwrap();

        let mut active: Chunk<u64> = Chunk::new(capacity);
        let expected = replay(seed, capacity * 3);

        // Three consecutive hand-offs must continue the same engine stream
        // with no skipped or repeated draws.
        let mut produced = Vec::new();
        for _ in 0..3 {
            producer.swap_chunk(&mut active).unwrap();
            while !active.is_empty() {
                produced.push(active.next());
            }
        }
        assert_eq!(produced, expected);
    }

    #[test]
    fn test_drop_while_waiting_to_hand_off() {
        // The fill thread finishes its chunk and blocks waiting for a swap;
        // dropping must wake and join it rather than hang.
        let producer =
            Producer::spawn::<RawDraw, Xoshiro256PlusPlus>(RawDraw, 5, 64).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        drop(producer);
    }

    #[test]
    fn test_drop_immediately_after_spawn() {
        let producer =
            Producer::spawn::<RawDraw, Xoshiro256PlusPlus>(RawDraw, 5, 1 << 16).unwrap();
        drop(producer);
    }
}
