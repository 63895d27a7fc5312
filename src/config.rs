//! CLI argument parsing using clap

use anyhow::Result;
use clap::{Parser, ValueEnum};

/// Probability law sampled by the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistributionKind {
    /// Uniform reals in [0, 1)
    Uniform,
    /// Standard normal (Box-Muller class draws, moderately expensive)
    Normal,
    /// Exponential with lambda 1
    Exponential,
    /// Log-normal with mu 0, sigma 1 (expensive; where caching shines)
    LogNormal,
}

/// rngcache - pregeneration cache benchmark harness
///
/// Times raw single-threaded generation against the cached path over the
/// same number of draws and reports the speedup ratio.
#[derive(Parser, Debug)]
#[command(name = "rngcache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of values to draw in each timed pass
    #[arg(short = 'n', long, default_value = "50000000")]
    pub samples: u64,

    /// Distribution to sample
    #[arg(long, value_enum, default_value = "uniform")]
    pub distribution: DistributionKind,

    /// Root seed; omit for entropy-based seeding
    #[arg(long)]
    pub seed: Option<u64>,

    /// Producer thread count (default: hardware parallelism)
    #[arg(short = 't', long)]
    pub producers: Option<usize>,

    /// Values per chunk (default: ~128 KiB worth)
    #[arg(long)]
    pub chunk_capacity: Option<usize>,

    /// Record per-draw latency every Nth draw (0 disables sampling)
    #[arg(long, default_value = "1024")]
    pub latency_sample_every: u64,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations beyond what clap enforces
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            anyhow::bail!("--samples must be at least 1");
        }
        if self.producers == Some(0) {
            anyhow::bail!("--producers must be at least 1");
        }
        if self.chunk_capacity == Some(0) {
            anyhow::bail!("--chunk-capacity must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("rngcache").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.samples, 50_000_000);
        assert_eq!(cli.distribution, DistributionKind::Uniform);
        assert!(cli.seed.is_none());
        assert!(cli.producers.is_none());
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_zero_samples_rejected() {
        assert!(cli(&["--samples", "0"]).validate().is_err());
    }

    #[test]
    fn test_zero_producers_rejected() {
        assert!(cli(&["--producers", "0"]).validate().is_err());
    }

    #[test]
    fn test_distribution_parsing() {
        assert_eq!(
            cli(&["--distribution", "log-normal"]).distribution,
            DistributionKind::LogNormal
        );
    }
}
