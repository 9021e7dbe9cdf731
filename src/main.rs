use anyhow::Result;
use clap::Parser;
use particle_data::{Arrangement, ForceLawKind};
use particle_life_lib::model::config::load_config;
use particle_life_lib::model::metrics::init_logging;
use particle_life_lib::model::simulation::Simulation;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless particle life runner", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 1000)]
    ticks: u64,

    /// Seed for reproducible runs (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Initial arrangement (random, circle, f_circle, concentric, line, grid, row, point)
    #[arg(short, long)]
    arrangement: Option<Arrangement>,

    /// Force law given to every type (default, absolute, cluster, snake, simple, inert)
    #[arg(short, long)]
    force_law: Option<ForceLawKind>,

    /// Worker threads for the tick pool; 0 lets rayon decide
    #[arg(short, long)]
    workers: Option<usize>,

    /// Ticks between progress logs; 0 disables them
    #[arg(long, default_value_t = 100)]
    log_every: u64,
}

/// Printed to stdout when the run ends.
#[derive(Serialize, Debug)]
struct RunSummary {
    ticks: u64,
    particles: usize,
    elapsed_ms: u128,
    mean_speed: f64,
    matrix_version: u64,
    fingerprint: String,
}

fn main() -> Result<()> {
    init_logging("info");
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(arrangement) = args.arrangement {
        config.world.arrangement = arrangement;
    }
    if let Some(force_law) = args.force_law {
        config.physics.force_law = force_law;
    }
    if let Some(workers) = args.workers {
        config.physics.workers = workers;
    }
    let fingerprint = config.fingerprint();

    let mut sim = Simulation::new(config)?;
    sim.metrics().set_log_interval(args.log_every);

    let last = sim.run(args.ticks)?;

    let summary = RunSummary {
        ticks: sim.tick,
        particles: sim.particles().len(),
        elapsed_ms: sim.metrics().elapsed().as_millis(),
        mean_speed: sim.mean_speed(),
        matrix_version: last.map_or(0, |stats| stats.matrix_version),
        fingerprint,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
