//! gaff-cli: drive a run of gaffed decisions against one symbol strip.
//!
//! Logging: set `RUST_LOG=gaff_core=debug` to see sampler logs on stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gaff_core::domain::IndexRequest;
use gaff_core::impls::StdRandom;
use gaff_core::ports::SymbolTable;
use gaff_core::{DecisionShape, EngineBuilder, GaffConfig};

#[derive(Debug, Parser)]
#[command(name = "gaff", about = "Run gaffed decisions against a symbol strip")]
struct Cli {
    /// JSON config listing the decision makers.
    #[arg(long)]
    config: PathBuf,

    /// Comma-separated symbol names, one per strip position.
    #[arg(long, value_delimiter = ',', required = true)]
    strip: Vec<String>,

    /// Context labels, cycled across decisions. Each full cycle is one
    /// sequence; sequence state is discarded when the cycle restarts.
    #[arg(long = "context", default_value = "spin")]
    contexts: Vec<String>,

    /// Number of decisions to make.
    #[arg(long, default_value_t = 1)]
    decisions: usize,

    /// Indexes requested per decision.
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seed for the random source (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Forbid the same index twice within one decision.
    #[arg(long)]
    no_duplicates: bool,

    /// Make yes/no decisions instead of index decisions.
    #[arg(long)]
    simple: bool,

    /// Print every decision maker's rule before running.
    #[arg(long)]
    describe: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gaff_core=info,gaff_cli=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let json = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;
    let config = GaffConfig::from_json(&json).context("parsing config")?;

    let rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRandom::from_seed_u64(seed),
        None => StdRandom::from_entropy(),
    };
    let mut engine = EngineBuilder::from_config(&config)?.build(rng)?;
    tracing::info!(makers = ?engine.maker_names(), "engine ready");

    if cli.describe {
        for line in engine.describe() {
            println!("{line}");
        }
    }

    let shape = if cli.simple {
        DecisionShape::Simple
    } else {
        let names: Arc<dyn SymbolTable> = Arc::new(cli.strip.clone());
        DecisionShape::Indexes(IndexRequest::over(names, cli.count, !cli.no_duplicates)?)
    };

    let mut failures = 0;
    for i in 0..cli.decisions {
        let position = i % cli.contexts.len();
        if i > 0 && position == 0 {
            engine.end_sequences();
        }
        let context = &cli.contexts[position];
        let decision = engine.decide(context, &shape);
        if !decision.outcome.success {
            failures += 1;
        }
        println!("{}", serde_json::to_string(&decision)?);
    }

    tracing::info!(decisions = cli.decisions, failures, "run finished");
    Ok(())
}
