//! Latency histogram for the benchmark harness
//!
//! Thin wrapper around HdrHistogram tracking per-draw latencies from
//! 1 ns to 1 hour at 3 significant digits. Recording and percentile
//! queries are O(1); one histogram costs about 2 KB.

use hdrhistogram::Histogram;
use std::time::Duration;

const MAX_LATENCY_NS: u64 = 3_600_000_000_000;

/// Per-draw latency histogram
#[derive(Debug)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    pub fn new() -> Self {
        // Bounds are compile-time constants and always valid.
        let histogram = Histogram::new_with_bounds(1, MAX_LATENCY_NS, 3)
            .expect("histogram bounds are valid");
        Self { histogram }
    }

    /// Record one latency sample, clamped to the tracked range
    #[inline]
    pub fn record(&mut self, latency: Duration) {
        let nanos = (latency.as_nanos() as u64).clamp(1, MAX_LATENCY_NS);
        let _ = self.histogram.record(nanos);
    }

    /// Latency at the given percentile (0.0 - 100.0), if any samples exist
    pub fn percentile(&self, percentile: f64) -> Option<Duration> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(
            self.histogram.value_at_percentile(percentile),
        ))
    }

    /// Mean recorded latency, if any samples exist
    pub fn mean(&self) -> Option<Duration> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.mean() as u64))
    }

    /// Maximum recorded latency, if any samples exist
    pub fn max(&self) -> Option<Duration> {
        if self.histogram.is_empty() {
            return None;
        }
        Some(Duration::from_nanos(self.histogram.max()))
    }

    /// Number of recorded samples
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = LatencyHistogram::new();
        assert!(hist.is_empty());
        assert_eq!(hist.len(), 0);
        assert!(hist.percentile(50.0).is_none());
        assert!(hist.mean().is_none());
        assert!(hist.max().is_none());
    }

    #[test]
    fn test_record_and_query() {
        let mut hist = LatencyHistogram::new();
        hist.record(Duration::from_micros(100));
        hist.record(Duration::from_micros(200));
        hist.record(Duration::from_micros(300));

        assert_eq!(hist.len(), 3);
        let p50 = hist.percentile(50.0).unwrap();
        assert!(p50 >= Duration::from_micros(100) && p50 <= Duration::from_micros(300));
        assert!(hist.max().unwrap() >= Duration::from_micros(299));
    }

    #[test]
    fn test_out_of_range_clamped() {
        let mut hist = LatencyHistogram::new();
        hist.record(Duration::from_nanos(0));
        hist.record(Duration::from_secs(100_000));
        assert_eq!(hist.len(), 2);
    }
}
