//! Rate cache simulator - drives the cache with random keys and a slow
//! simulated upstream lookup

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use ratecache::{LoaderError, RateCache};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of rates)
    #[arg(short, long, default_value_t = 50_000)]
    capacity: usize,

    /// Total number of lookups to perform
    #[arg(short, long, default_value_t = 10_000)]
    attempts: u64,

    /// Worker threads issuing lookups
    #[arg(short, long, default_value_t = 1)]
    threads: u64,

    /// Simulated upstream latency in milliseconds
    #[arg(short, long, default_value_t = 10)]
    delay_ms: u64,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.threads > 0, "at least one worker thread is required");

    info!("Starting ratesim v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    info!(
        "Lookups: {} across {} thread(s)",
        args.attempts, args.threads
    );
    info!("Simulated upstream latency: {}ms", args.delay_ms);

    let cache = RateCache::new(args.capacity);
    let delay = Duration::from_millis(args.delay_ms);
    let loads = AtomicU64::new(0);

    let start = Instant::now();
    thread::scope(|s| {
        for t in 0..args.threads {
            // Spread the remainder over the first threads
            let share =
                args.attempts / args.threads + u64::from(t < args.attempts % args.threads);
            let cache = &cache;
            let loads = &loads;
            s.spawn(move || {
                let mut rng = rand::thread_rng();
                let loader = |key: &str| -> std::result::Result<f64, LoaderError> {
                    loads.fetch_add(1, Ordering::Relaxed);
                    rate_lookup(key, delay)
                };
                for _ in 0..share {
                    // Keys span twice the capacity so the cache keeps churning
                    let id = rng.gen_range(0..cache.capacity() * 2);
                    if let Err(e) = cache.fast_rate_lookup(&id.to_string(), Some(&loader)) {
                        warn!("Lookup failed for {}: {}", id, e);
                    }
                }
            });
        }
    });
    let elapsed = start.elapsed();

    let loads = loads.load(Ordering::Relaxed);
    let hits = args.attempts.saturating_sub(loads);
    let hit_ratio = if args.attempts > 0 {
        hits as f64 / args.attempts as f64 * 100.0
    } else {
        0.0
    };

    info!("Done in {:.2?}", elapsed);
    info!(
        "Lookups: {} ({} cache hits, {} upstream loads, {:.1}% hit ratio)",
        args.attempts, hits, loads, hit_ratio
    );
    info!("Cached rates: {} / {}", cache.len(), cache.capacity());

    Ok(())
}

/// Simulated upstream rate lookup. Parses the key as a numeric address id
/// and sleeps to mimic a remote call.
fn rate_lookup(key: &str, delay: Duration) -> std::result::Result<f64, LoaderError> {
    let id: u64 = key.parse()?;
    thread::sleep(delay);
    Ok(id as f64 * 1.238712)
}
