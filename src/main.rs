//! feasible CLI - uniform samples from a constrained region of the unit hypercube.

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use feasible::config::{DEFAULT_BATCH_SIZE, DEFAULT_EDGE_ITERATIONS, DEFAULT_MAX_ESCALATIONS};
use feasible::{FeasibilityOracle, FeasibleRegion, SampleSet};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "feasible")]
#[command(version)]
#[command(about = "Draw approximately uniform samples from a constrained region of [0, 1]^n")]
struct Cli {
    /// Constraint file: dimension, example point, then one predicate per line
    input: PathBuf,

    /// Where to write the sample matrix (one space-delimited row per sample)
    output: PathBuf,

    /// Number of samples to draw
    count: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Seconds to spend diffusing after growth (0 disables diffusion)
    #[arg(long, default_value_t = 0.0)]
    diffuse_secs: f64,

    /// Candidates in the first batch of each search
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Batch escalations before a search gives up
    #[arg(long, default_value_t = DEFAULT_MAX_ESCALATIONS)]
    max_escalations: usize,

    /// Bisection steps per edge search
    #[arg(long, default_value_t = DEFAULT_EDGE_ITERATIONS)]
    edge_iterations: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")
}

/// Load, grow, diffuse. Runs on a blocking thread.
fn run(cli: &Cli, budget: Duration, cancel: &AtomicBool) -> Result<SampleSet<FeasibleRegion>> {
    let region = FeasibleRegion::from_file(&cli.input)
        .with_context(|| format!("Failed to load constraints from {}", cli.input.display()))?;
    info!(
        dimension = region.dimension(),
        predicates = region.n_predicates(),
        "loaded region"
    );

    let mut builder = SampleSet::builder()
        .initial_batch_size(cli.batch_size)
        .max_escalations(Some(cli.max_escalations))
        .edge_iterations(cli.edge_iterations);
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    let mut set = builder.build(region).context("Failed to seed the sample set")?;

    set.grow_while(cli.count, |_| {
        if cancel.load(Ordering::Relaxed) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .with_context(|| format!("Failed to grow the sample set to {}", cli.count))?;

    if cancel.load(Ordering::Relaxed) {
        warn!(
            accepted = set.len(),
            target = cli.count,
            "interrupted, skipping diffusion"
        );
        return Ok(set);
    }
    if budget.is_zero() {
        return Ok(set);
    }

    let report = set
        .diffuse_for(budget, cancel)
        .context("Diffusion failed")?;
    info!(
        steps = report.steps,
        elapsed_secs = report.elapsed.as_secs_f64(),
        reason = ?report.reason,
        "diffusion stopped"
    );
    Ok(set)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let budget = Duration::try_from_secs_f64(cli.diffuse_secs)
        .with_context(|| format!("Invalid --diffuse-secs value {}", cli.diffuse_secs))?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing the current search");
            flag.store(true, Ordering::Relaxed);
        }
    });

    let cli = Arc::new(cli);
    let job = Arc::clone(&cli);
    let set = tokio::task::spawn_blocking(move || run(&job, budget, &cancel))
        .await
        .context("Sampling task panicked")??;

    set.save_matrix(&cli.output)
        .with_context(|| format!("Failed to write samples to {}", cli.output.display()))?;

    let stats = set.stats();
    info!(
        samples = set.len(),
        searches = stats.searches,
        candidates = stats.candidates,
        escalations = stats.escalations,
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}
