//! glb CLI: run the sample workloads on the single-worker processor.

use clap::{Parser, Subcommand};
use glb_rs::config::Config;
use glb_rs::payload::{SpawnBag, Sum, UtsBag};
use glb_rs::processor::{GlbProcessor, LoopProcessor};
use glb_rs::telemetry::{TelemetryConfig, init_telemetry};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "glb", about = "Lifeline-based global load balancing")]
struct Cli {
    /// TOML configuration file (defaults come from the environment)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Work units per process slice (overrides the configuration)
    #[arg(long, global = true)]
    work_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Unbalanced tree search: count the nodes of a seeded random tree
    Uts {
        /// Depth bound of the tree
        #[arg(long, default_value_t = 13)]
        depth: u32,
        /// Root seed
        #[arg(long, default_value_t = 19)]
        seed: u64,
        /// Skip the warm-up run at depth - 2
        #[arg(long)]
        no_warmup: bool,
        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,
    },
    /// Spawn chain: one bag spawns `amount` unit bags, each adding 1
    Spawn {
        #[arg(long, default_value_t = 400)]
        amount: u64,
    },
}

#[derive(Serialize)]
struct UtsReport {
    depth: u32,
    seed: u64,
    work_size: usize,
    nodes: i64,
    slices: u64,
    seconds: f64,
    mnodes_per_sec: f64,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(work_size) = cli.work_size {
        anyhow::ensure!(work_size > 0, "--work-size must be positive");
        config.work_size = work_size;
    }

    init_telemetry(TelemetryConfig {
        log_level: config.log_level.clone(),
        compact: true,
    })?;

    match cli.command {
        Command::Uts {
            depth,
            seed,
            no_warmup,
            json,
        } => cmd_uts(&config, depth, seed, no_warmup, json),
        Command::Spawn { amount } => cmd_spawn(&config, amount),
    }
}

fn cmd_uts(
    config: &Config,
    depth: u32,
    seed: u64,
    no_warmup: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut processor = LoopProcessor::<Sum>::from_config(config);

    if !no_warmup && depth > 2 {
        info!(depth = depth - 2, "warmup");
        processor.compute(UtsBag::new(seed, depth - 2), Sum::default);
    }

    info!(depth, seed, work_size = config.work_size, "starting");
    let nodes = processor.compute(UtsBag::new(seed, depth), Sum::default).sum;
    let stats = processor
        .last_run()
        .ok_or_else(|| anyhow::anyhow!("processor reported no run"))?;

    let seconds = stats.elapsed.as_secs_f64();
    let mnodes_per_sec = if seconds > 0.0 {
        nodes as f64 / seconds / 1e6
    } else {
        0.0
    };

    if json {
        let report = UtsReport {
            depth,
            seed,
            work_size: config.work_size,
            nodes,
            slices: stats.slices,
            seconds,
            mnodes_per_sec,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Depth: {depth}, Performance: {nodes}/{seconds:.3} = {mnodes_per_sec:.3}M nodes/s"
        );
    }
    Ok(())
}

fn cmd_spawn(config: &Config, amount: u64) -> anyhow::Result<()> {
    let mut processor = LoopProcessor::<Sum>::from_config(config);
    let result = processor.compute(SpawnBag::new(amount), Sum::default);
    println!("Spawned {amount} unit bags, sum = {}", result.sum);
    Ok(())
}
