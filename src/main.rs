//! rngcache CLI entry point
//!
//! Benchmark harness: times raw single-threaded generation against the
//! pregeneration cache over the same draw count and prints the speedup.
//! This binary is purely a consumer of the library's public contract.

use anyhow::{Context, Result};
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_distr::{Exp, LogNormal, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;
use rngcache::config::{Cli, DistributionKind};
use rngcache::stats::LatencyHistogram;
use rngcache::{seed, CacheConfig, RngCache};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    println!("rngcache v{}", env!("CARGO_PKG_VERSION"));
    println!("Pregeneration cache benchmark");
    println!();

    let cli = Cli::parse_args();
    cli.validate()?;

    match cli.distribution {
        DistributionKind::Uniform => run_benchmark(Uniform::new(0.0f64, 1.0), &cli),
        DistributionKind::Normal => {
            let dist = Normal::new(0.0, 1.0).context("Invalid normal parameters")?;
            run_benchmark(dist, &cli)
        }
        DistributionKind::Exponential => {
            let dist = Exp::new(1.0).context("Invalid exponential parameters")?;
            run_benchmark(dist, &cli)
        }
        DistributionKind::LogNormal => {
            let dist = LogNormal::new(0.0, 1.0).context("Invalid log-normal parameters")?;
            run_benchmark(dist, &cli)
        }
    }
}

/// Outcome of one timed pass
struct PassReport {
    elapsed: Duration,
    sum: f64,
    latency: LatencyHistogram,
}

fn run_benchmark<D>(distribution: D, cli: &Cli) -> Result<()>
where
    D: Distribution<f64> + Clone + Send + 'static,
{
    let root_seed = cli.seed.unwrap_or_else(seed::from_entropy);
    println!("Samples:    {}", cli.samples);
    println!("Root seed:  {:#018x}", root_seed);
    println!();

    let baseline = run_baseline(distribution.clone(), root_seed, cli);
    print_report("Baseline", cli.samples, &baseline);

    let cached = run_cached(distribution, root_seed, cli)?;
    print_report("RngCache", cli.samples, &cached);

    let speedup = baseline.elapsed.as_secs_f64() / cached.elapsed.as_secs_f64();
    println!();
    println!("Speedup: {:.2}x", speedup);

    Ok(())
}

/// Raw generation: one engine, one distribution, one thread
fn run_baseline<D: Distribution<f64>>(distribution: D, root_seed: u64, cli: &Cli) -> PassReport {
    let mut engine = Xoshiro256PlusPlus::seed_from_u64(root_seed);
    let mut latency = LatencyHistogram::new();
    let mut sum = 0.0f64;

    let begin = Instant::now();
    for i in 0..cli.samples {
        if cli.latency_sample_every != 0 && i % cli.latency_sample_every == 0 {
            let draw_begin = Instant::now();
            sum += distribution.sample(&mut engine);
            latency.record(draw_begin.elapsed());
        } else {
            sum += distribution.sample(&mut engine);
        }
    }
    let elapsed = begin.elapsed();

    PassReport {
        elapsed,
        sum,
        latency,
    }
}

/// Cached generation through the round-robin facade
fn run_cached<D>(distribution: D, root_seed: u64, cli: &Cli) -> Result<PassReport>
where
    D: Distribution<f64> + Clone + Send + 'static,
{
    let config = CacheConfig {
        seed: Some(root_seed),
        producers: cli.producers,
        chunk_capacity: cli.chunk_capacity,
    };
    let mut cache = RngCache::with_config(distribution, config)
        .context("Failed to construct cache")?;

    println!(
        "Cache: {} producers, {} values per chunk",
        cache.producer_count(),
        cache.chunk_capacity()
    );

    let mut latency = LatencyHistogram::new();
    let mut sum = 0.0f64;

    let begin = Instant::now();
    for i in 0..cli.samples {
        if cli.latency_sample_every != 0 && i % cli.latency_sample_every == 0 {
            let draw_begin = Instant::now();
            sum += cache.generate().context("Cache draw failed")?;
            latency.record(draw_begin.elapsed());
        } else {
            sum += cache.generate().context("Cache draw failed")?;
        }
    }
    let elapsed = begin.elapsed();

    Ok(PassReport {
        elapsed,
        sum,
        latency,
    })
}

fn print_report(name: &str, samples: u64, report: &PassReport) {
    let per_draw_ns = report.elapsed.as_nanos() as f64 / samples as f64;
    let throughput = samples as f64 / report.elapsed.as_secs_f64() / 1e6;

    println!("{name}: {:.3}s", report.elapsed.as_secs_f64());
    println!("  {per_draw_ns:.1} ns per draw, {throughput:.1} Mdraws/s");
    if !report.latency.is_empty() {
        let fmt = |d: Option<Duration>| d.map_or(0, |d| d.as_nanos());
        println!(
            "  sampled draw latency: p50 {} ns, p99 {} ns, max {} ns ({} samples)",
            fmt(report.latency.percentile(50.0)),
            fmt(report.latency.percentile(99.0)),
            fmt(report.latency.max()),
            report.latency.len()
        );
    }
    // Print the accumulated sum so the work cannot be optimized away.
    println!("  produced sum: {:.6}", report.sum);
    println!();
}
