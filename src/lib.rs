//! # terrarium
//!
//! A small real-time ecosystem simulation: a bounded 2D world of
//! herbivores, carnivores and plants competing over a finite food pool.
//!
//! ## Features
//!
//! - **Frame-driven**: one synchronous `update(dt)` call advances the whole
//!   world by a tick; the caller owns the clock
//! - **Closed loop**: foraging, predation, reproduction and death under a
//!   hard population cap
//! - **Steered movement**: bounds avoidance, predator avoidance and food
//!   seeking combined as advisory forces
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use terrarium::{Config, Ecosystem};
//!
//! let config = Config::default();
//! let mut eco = Ecosystem::new_with_seed(config, 42).unwrap();
//! eco.initialize(20, 5, 15);
//!
//! // Drive it from your frame loop
//! for _ in 0..100 {
//!     eco.update(1.0);
//! }
//!
//! println!("population: {}", eco.population());
//! println!("{}", eco.stats.summary());
//! ```
//!
//! Rendering stays outside the crate: capture a
//! [`WorldSnapshot`](snapshot::WorldSnapshot) each frame and draw from
//! that.

pub mod config;
pub mod ecosystem;
pub mod entity;
pub mod food;
pub mod snapshot;
pub mod stats;
pub mod vec2;

// Re-export main types
pub use config::Config;
pub use ecosystem::Ecosystem;
pub use entity::{Entity, Kind};
pub use food::Food;
pub use snapshot::WorldSnapshot;
pub use stats::Stats;
pub use vec2::Vec2;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(ticks: u64, population: usize) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    config.population.max_entities = population.max(config.population.max_entities);
    config.population.initial_herbivores = population / 2;
    config.population.initial_carnivores = population / 10;
    config.population.initial_plants = population - population / 2 - population / 10;

    let mut eco = Ecosystem::new_with_seed(config.clone(), 42).expect("benchmark config is valid");
    eco.initialize(
        config.population.initial_herbivores,
        config.population.initial_carnivores,
        config.population.initial_plants,
    );

    let start = Instant::now();
    eco.run(ticks, 1.0);
    let elapsed = start.elapsed();

    BenchmarkResult {
        ticks,
        initial_population: population,
        final_population: eco.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}
