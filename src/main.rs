//! terrarium - CLI entry point
//!
//! Drives the simulation core headless: loads a configuration, runs the
//! frame loop with a fixed timestep, prints periodic stats summaries.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use terrarium::{benchmark, Config, Ecosystem};

/// Ticks between food replenishment by the driver loop
const FOOD_RESPAWN_INTERVAL: u64 = 10;
/// Food items scattered at each replenishment
const FOOD_RESPAWN_COUNT: usize = 2;

#[derive(Parser)]
#[command(name = "terrarium")]
#[command(version)]
#[command(about = "Bounded 2D ecosystem simulation: herbivores, carnivores, plants")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "terrarium.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Fixed timestep in seconds passed to each update. Aging runs at
        /// 10x wall time, so 0.1 ages entities one tick per update.
        #[arg(long, default_value = "0.1")]
        dt: f32,

        /// Random seed for reproducing a run
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,

        /// Write the stats history to this JSON file at the end
        #[arg(long)]
        stats_out: Option<PathBuf>,
    },

    /// Run a quick performance benchmark
    Bench {
        /// Number of ticks
        #[arg(short, long, default_value = "1000")]
        ticks: u64,

        /// Initial population size
        #[arg(short, long, default_value = "100")]
        population: usize,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "terrarium.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            dt,
            seed,
            quiet,
            stats_out,
        } => run_simulation(config, ticks, dt, seed, quiet, stats_out),

        Commands::Bench { ticks, population } => run_benchmark(ticks, population),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    ticks: u64,
    dt: f32,
    seed: Option<u64>,
    quiet: bool,
    stats_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.log_level),
    )
    .init();

    let mut eco = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Ecosystem::new_with_seed(config.clone(), s)?
    } else {
        Ecosystem::new(config.clone())?
    };

    eco.initialize(
        config.population.initial_herbivores,
        config.population.initial_carnivores,
        config.population.initial_plants,
    );

    println!("Starting simulation");
    println!("  World: {}x{}", config.world.width, config.world.height);
    println!("  Initial population: {}", eco.population());
    println!("  Ticks: {} (dt = {})", ticks, dt);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval;

    for i in 0..ticks {
        eco.update(dt);

        // The driver owns replenishment: periodically scatter fresh food
        if eco.day % FOOD_RESPAWN_INTERVAL == 0 {
            eco.spawn_food(FOOD_RESPAWN_COUNT);
        }

        if !quiet && i % stats_interval == 0 {
            println!("{}", eco.stats.summary());
        }

        if eco.is_extinct() {
            println!("\nEverything is dead at day {}", eco.day);
            break;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Days: {}", eco.day);
    println!("Speed: {:.1} ticks/s", eco.day as f64 / elapsed.as_secs_f64());
    println!("Final population: {}", eco.population());
    println!("{}", eco.stats.summary());

    if let Some(path) = stats_out {
        eco.stats_history
            .save(path.to_str().ok_or("stats_out path is not valid UTF-8")?)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(ticks: u64, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("=== terrarium benchmark ===");
    println!("Ticks: {}", ticks);
    println!("Population: {}", population);
    println!();

    let result = benchmark(ticks, population);
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
