//! Ranks the pages of an HTML corpus with both estimators.

use anyhow::{Context, Result};
use clap::Parser;
use pagerank_surfer::{
    corpus,
    page_rank::{iterated, sampled},
};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "pagerank", version, about)]
struct Cli {
    /// Directory holding the `.html` pages
    corpus: PathBuf,

    /// Probability of following a link instead of jumping anywhere
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Steps of the random walk
    #[arg(long, default_value_t = 10_000)]
    samples: usize,

    /// Largest change between sweeps at which iteration stops
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    #[arg(long, default_value_t = 10_000)]
    max_sweeps: usize,

    /// Seed of the random walk; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Measure convergence by the total change over all pages
    #[arg(long)]
    l1: bool,
}

/// `RUST_LOG` directives on top of a `warn` default.
fn log_filter() -> tracing_subscriber::filter::Builder {
    EnvFilter::builder().with_default_directive(LevelFilter::WARN.into())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter().from_env_lossy())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let graph = corpus::crawl(&cli.corpus)
        .with_context(|| format!("cannot crawl {}", cli.corpus.display()))?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sampled_cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let ranks =
        pagerank_surfer::sample_rank(&graph, &sampled_cfg, rng).context("sampling failed")?;
    println!("PageRank Results from Sampling (n = {})", cli.samples);
    print!("{ranks}");

    let iterated_cfg = iterated::Config {
        damping: cli.damping,
        tolerance: cli.tolerance,
        max_sweeps: cli.max_sweeps,
        convergence: if cli.l1 {
            iterated::Convergence::L1
        } else {
            iterated::Convergence::PerNode
        },
    };
    let ranks = pagerank_surfer::iterate_rank(&graph, &iterated_cfg).context("iteration failed")?;
    println!("PageRank Results from Iteration");
    print!("{ranks}");
    Ok(())
}
