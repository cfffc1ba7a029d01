//! Summon index CLI
//!
//! Loads every pack file of a directory, runs the ruleset's enrichment and
//! prints the creature table.
//!
//! Usage:
//!   summons --packs ./packs --ruleset pf2e --sort 1 --desc

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use summons_cli::{RunOptions, run};
use summons_index::SummonsConfig;
use summons_types::RulesetId;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "summons")]
#[command(about = "Index summonable creatures from pack files")]
struct Args {
    /// Directory of *.json pack files
    #[arg(short, long)]
    packs: PathBuf,

    /// Path to the settings file
    #[arg(short, long, default_value = "summons.toml")]
    config: PathBuf,

    /// Game system whose columns and enrichment apply
    #[arg(short, long, default_value = "pf2e")]
    ruleset: String,

    /// uuid -> image JSON map used as module art
    #[arg(long)]
    art: Option<PathBuf>,

    /// Column index to sort by
    #[arg(short, long)]
    sort: Option<usize>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = SummonsConfig::load_from(&args.config);

    let level = if args.verbose || config.debug { "debug" } else { "info" };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let table = run(RunOptions {
        packs_dir: args.packs,
        config,
        ruleset: RulesetId::new(args.ruleset),
        art: args.art,
        sort: args.sort,
        descending: args.desc,
    })
    .await?;

    println!("{table}");
    Ok(())
}
