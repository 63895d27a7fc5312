//! Error types for the cache
//!
//! Both error categories are unrecoverable at the point of detection:
//! configuration misuse is rejected at construction, and lifecycle misuse
//! (touching a producer that has begun shutdown) aborts the operation.
//! There is no retry or soft-failure path anywhere in the crate.

use thiserror::Error;

/// Errors surfaced by [`RngCache`](crate::RngCache) and its producers
#[derive(Debug, Error)]
pub enum CacheError {
    /// The configured producer count was zero. An empty pool would make
    /// round-robin selection undefined, so it is rejected up front.
    #[error("producer count must be at least 1")]
    ZeroProducers,

    /// The configured chunk capacity was zero.
    #[error("chunk capacity must be at least 1")]
    ZeroChunkCapacity,

    /// A chunk hand-off was attempted against a producer that has begun
    /// shutdown. This is only reachable through lifecycle misuse and never
    /// occurs through the public facade under correct usage.
    #[error("illegal access of closed producer")]
    Closed,

    /// The OS refused to spawn a producer thread.
    #[error("failed to spawn producer thread")]
    Spawn(#[source] std::io::Error),
}

/// Result type used throughout rngcache
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CacheError::ZeroProducers.to_string(),
            "producer count must be at least 1"
        );
        assert_eq!(
            CacheError::Closed.to_string(),
            "illegal access of closed producer"
        );
    }
}
