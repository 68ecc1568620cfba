//! Statistics tracking for the simulation.

use crate::entity::{Entity, Kind};
use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulation tick. Totals are recomputed from
/// scratch every tick; births and deaths accumulate within a tick and reset
/// at the start of the next one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current day/tick counter
    pub tick: u64,
    /// Living herbivores
    pub herbivores: usize,
    /// Living carnivores
    pub carnivores: usize,
    /// Living plants
    pub plants: usize,
    /// Food items in the pool
    pub food: usize,
    /// Births this tick
    pub births: usize,
    /// Deaths this tick
    pub deaths: usize,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute per-kind totals by scanning the current collection
    pub fn update(&mut self, entities: &[Entity], food_count: usize) {
        self.herbivores = 0;
        self.carnivores = 0;
        self.plants = 0;

        for entity in entities {
            match entity.kind {
                Kind::Herbivore => self.herbivores += 1,
                Kind::Carnivore => self.carnivores += 1,
                Kind::Plant => self.plants += 1,
            }
        }

        self.food = food_count;
    }

    /// Total entity count across all kinds
    pub fn total_entities(&self) -> usize {
        self.herbivores + self.carnivores + self.plants
    }

    /// Save stats to a JSON file
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Day:{:5} | H:{:3} C:{:3} P:{:3} | Food:{:3} | +{} -{}",
            self.tick,
            self.herbivores,
            self.carnivores,
            self.plants,
            self.food,
            self.births,
            self.deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in ticks
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with the given recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Total population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.tick, s.total_entities()))
            .collect()
    }

    /// Food pool size over time
    pub fn food_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.tick, s.food)).collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }
}
