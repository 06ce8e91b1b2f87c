//! Ranks the pages of an HTML corpus with both estimators.

use anyhow::{Context, Result};
use clap::Parser;
use link_rank::{
    corpus,
    page_rank::{iterated, sampled, PageRank, PageRankResult, RankMapping, DEFAULT_DAMPING},
};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pagerank")]
#[command(author, version, about = "PageRank of a directory of HTML pages")]
struct Cli {
    /// Directory holding the `.html` pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, default_value_t = DEFAULT_DAMPING)]
    damping: f64,

    /// Number of random-surfer steps
    #[arg(short = 'n', long, default_value_t = sampled::DEFAULT_SAMPLES)]
    samples: usize,

    /// Largest per-page change at which iteration stops
    #[arg(short, long, default_value_t = iterated::DEFAULT_EPSILON)]
    epsilon: f64,

    /// Seed for the random surfer, for repeatable sampling
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let graph = corpus::crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;
    info!(
        pages = graph.page_count(),
        links = graph.link_count(),
        "crawled corpus"
    );

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let config = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
    };
    let result = sampled::SampledPageRank::new(&graph, &config, rng)
        .and_then(|spr| spr.calc())
        .context("sampling failed")?;
    trace!("{:?}", result.debug(&graph));
    let title = format!("PageRank Results from Sampling (n = {})", cli.samples);
    print!("{}", format_ranks(&title, &result.rank_mapping(&graph)));

    let config = iterated::Config {
        damping: cli.damping,
        epsilon: cli.epsilon,
        ..iterated::Config::default()
    };
    let result = iterated::IteratedPageRank::new(&graph, &config)
        .and_then(|ipr| ipr.calc())
        .context("iteration failed")?;
    trace!("{:?}", result.debug(&graph));
    let title = "PageRank Results from Iteration";
    print!("{}", format_ranks(title, &result.rank_mapping(&graph)));

    Ok(())
}

/// One `page: rank` line per page, sorted by page name.
fn format_ranks(title: &str, ranks: &RankMapping<String>) -> String {
    let mut pages: Vec<_> = ranks.iter().collect();
    pages.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = format!("{title}\n");
    for (page, rank) in pages {
        out.push_str(&format!("  {page}: {rank:.4}\n"));
    }
    out
}
