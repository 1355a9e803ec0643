//! MemoStore benchmark driver
//!
//! Exercises the two cache structures against brute-force baselines:
//! splay-tree-memoized Fibonacci vs. an iterative computation, and a
//! random range-sum/update workload run once uncached and once through
//! the LRU-backed service.

use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use memolru::RangeSum;
use memotree::{fib, fib_iterative, SplayTree};

/// Values past this overflow the u128 Fibonacci representation
const FIB_MAX_SUPPORTED: u32 = 186;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Largest Fibonacci index to measure
    #[arg(long, default_value_t = 180)]
    fib_max: u32,

    /// Step between measured Fibonacci indices
    #[arg(long, default_value_t = 10)]
    fib_step: u32,

    /// Executions averaged per measurement
    #[arg(short, long, default_value_t = 100)]
    reps: u32,

    /// Array length for the range-sum workload
    #[arg(long, default_value_t = 100_000)]
    array_size: usize,

    /// Number of range/update queries to generate
    #[arg(long, default_value_t = 50_000)]
    num_queries: usize,

    /// Cache capacity for the range-sum workload
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// RNG seed for reproducible workloads
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One generated workload step
enum Query {
    Range(usize, usize),
    Update(usize, i64),
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

    if args.fib_max > FIB_MAX_SUPPORTED {
        bail!(
            "--fib-max {} overflows u128 (max supported: {})",
            args.fib_max,
            FIB_MAX_SUPPORTED
        );
    }
    if args.fib_step == 0 {
        bail!("--fib-step must be at least 1");
    }
    if args.array_size < 2 {
        bail!("--array-size must be at least 2");
    }

    info!("MemoStore benchmark v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Fibonacci: n = 0..={} step {}, {} reps",
        args.fib_max, args.fib_step, args.reps
    );
    info!(
        "Range workload: array {} / {} queries / capacity {} / seed {}",
        args.array_size, args.num_queries, args.capacity, args.seed
    );

    run_fibonacci_comparison(&args);
    run_range_workload(&args)?;

    Ok(())
}

/// Time memoized vs. iterative Fibonacci across a stride of n values.
///
/// Each measured n gets a fresh tree, matching the reference setup: the
/// first repetition pays the cold cost, the rest hit the memo.
fn run_fibonacci_comparison(args: &Args) {
    println!();
    println!("n        Splay Memo (s)      Iterative (s)");
    println!("--------------------------------------------");

    let mut n = 0;
    while n <= args.fib_max {
        let mut tree = SplayTree::new();
        let start = Instant::now();
        for _ in 0..args.reps {
            std::hint::black_box(fib(n, &mut tree));
        }
        let splay_avg = start.elapsed().as_secs_f64() / f64::from(args.reps);

        let start = Instant::now();
        for _ in 0..args.reps {
            std::hint::black_box(fib_iterative(n));
        }
        let iter_avg = start.elapsed().as_secs_f64() / f64::from(args.reps);

        println!("{:<8} {:>18.9} {:>18.9}", n, splay_avg, iter_avg);

        n = match n.checked_add(args.fib_step) {
            Some(next) => next,
            None => break,
        };
    }
}

/// Run the same random query mix uncached and through the cached
/// service, reporting elapsed time and hit ratio.
fn run_range_workload(args: &Args) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(args.seed);

    let values: Vec<i64> = (0..args.array_size)
        .map(|_| rng.gen_range(1..=1000))
        .collect();

    let queries: Vec<Query> = (0..args.num_queries)
        .map(|_| {
            if rng.gen_bool(0.5) {
                let l = rng.gen_range(0..args.array_size - 1);
                let r = rng.gen_range(l + 1..args.array_size);
                Query::Range(l, r)
            } else {
                let index = rng.gen_range(0..args.array_size);
                Query::Update(index, rng.gen_range(1..=1000))
            }
        })
        .collect();

    // Uncached baseline: recompute every sum from scratch
    let mut plain = values.clone();
    let start = Instant::now();
    for query in &queries {
        match *query {
            Query::Range(l, r) => {
                std::hint::black_box(plain[l..=r].iter().sum::<i64>());
            }
            Query::Update(index, value) => plain[index] = value,
        }
    }
    let uncached = start.elapsed();

    // Cached run over a fresh service instance
    let mut service = RangeSum::new(values, args.capacity)?;
    let start = Instant::now();
    for query in &queries {
        match *query {
            Query::Range(l, r) => {
                std::hint::black_box(service.range_sum(l, r)?);
            }
            Query::Update(index, value) => service.update(index, value)?,
        }
    }
    let cached = start.elapsed();

    println!();
    println!("Range-sum workload ({} queries):", args.num_queries);
    println!("  uncached: {:>10.3} s", uncached.as_secs_f64());
    println!("  cached:   {:>10.3} s", cached.as_secs_f64());
    println!(
        "  hit ratio {:.3} ({} hits / {} misses, {} invalidated)",
        service.stats().hit_ratio(),
        service.stats().hits(),
        service.stats().misses(),
        service.stats().invalidations()
    );

    Ok(())
}
