//! Ecosystem root: owns the entity and food collections and drives the
//! per-tick update pipeline.

use crate::config::Config;
use crate::entity::{Entity, Kind};
use crate::food::Food;
use crate::stats::{Stats, StatsHistory};
use crate::vec2::Vec2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Distance within which a herbivore consumes a food item
const FORAGE_RANGE: f32 = 10.0;
/// Energy a herbivore gains from one food item
const FORAGE_ENERGY: f32 = 15.0;
/// Distance within which a carnivore takes down a herbivore
const HUNT_RANGE: f32 = 15.0;
/// Energy a carnivore gains from a kill
const HUNT_ENERGY: f32 = 30.0;
/// Chance per tick that a new plant sprouts somewhere
const PLANT_GROWTH_CHANCE: f32 = 0.01;

/// The simulation world: a bounded 2D plane of entities and food.
///
/// Exclusive owner of both collections; all mutation happens inside a
/// single synchronous `update` call. Iteration order is insertion order,
/// which the eating pass relies on for its first-match semantics.
pub struct Ecosystem {
    /// All entities, in insertion order
    pub entities: Vec<Entity>,
    /// Food pool, in insertion order
    pub food: Vec<Food>,
    /// Configuration
    pub config: Config,
    /// Day/tick counter
    pub day: u64,
    /// Statistics snapshot for the current tick
    pub stats: Stats,
    /// Periodic stats history
    pub stats_history: StatsHistory,

    // Master RNG for spawning; entities carry their own streams seeded
    // from this one.
    rng: ChaCha8Rng,
    seed: u64,

    births_this_tick: usize,
    deaths_this_tick: usize,
    spawned_total: u64,
}

impl Ecosystem {
    /// Create an empty world with the given configuration. Rejects invalid
    /// parameters (non-positive dimensions, zero entity cap) up front.
    pub fn new(config: Config) -> Result<Self, String> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create an empty world with a specific master seed
    pub fn new_with_seed(config: Config, seed: u64) -> Result<Self, String> {
        config.validate()?;

        let stats_interval = config.logging.stats_interval;
        log::info!(
            "ecosystem created: {}x{}, cap {}",
            config.world.width,
            config.world.height,
            config.population.max_entities
        );

        Ok(Self {
            entities: Vec::with_capacity(config.population.max_entities),
            food: Vec::with_capacity(config.food.max_items),
            config,
            day: 0,
            stats: Stats::new(),
            stats_history: StatsHistory::new(stats_interval),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            births_this_tick: 0,
            deaths_this_tick: 0,
            spawned_total: 0,
        })
    }

    /// Clear all state and populate the world: the requested counts of each
    /// kind at uniform random positions, plus the initial food scatter.
    pub fn initialize(&mut self, herbivores: usize, carnivores: usize, plants: usize) {
        self.entities.clear();
        self.food.clear();

        for _ in 0..herbivores {
            self.spawn_random_entity(Kind::Herbivore);
        }
        for _ in 0..carnivores {
            self.spawn_random_entity(Kind::Carnivore);
        }
        for _ in 0..plants {
            self.spawn_random_entity(Kind::Plant);
        }
        self.spawn_food(self.config.food.initial_items);

        self.update_statistics();
        log::info!(
            "ecosystem initialized: {} entities, {} food",
            self.entities.len(),
            self.food.len()
        );
    }

    /// Advance the whole world by one tick. `dt` is the elapsed time in
    /// seconds, supplied by the external frame loop.
    pub fn update(&mut self, dt: f32) {
        self.births_this_tick = 0;
        self.deaths_this_tick = 0;

        // Phase 1: steering forces, then individual entity updates
        self.apply_steering();
        for entity in &mut self.entities {
            entity.update(dt);
        }

        // Phase 2: foraging and predation
        self.handle_eating();

        // Phase 3: reproduction
        self.handle_reproduction();

        // Phase 4: drop the dead
        self.remove_dead_entities();

        // Phase 5: plant growth
        self.handle_plant_growth();

        // Phase 6: statistics
        self.update_statistics();
        if self.day % self.stats_history.interval == 0 {
            self.stats_history.record(self.stats.clone());
        }

        self.day += 1;
    }

    /// Compute and apply the combined steering force for every mobile
    /// entity. Forces are advisory vectors collected in a read-only pass
    /// and applied afterwards so siblings never observe half-updated state.
    fn apply_steering(&mut self) {
        let width = self.config.world.width;
        let height = self.config.world.height;

        // Food sources for seeking: the food pool plus a meat source per
        // living herbivore, which is how the food chain reaches carnivores.
        let mut sources: Vec<Food> = self.food.clone();
        sources.extend(
            self.entities
                .iter()
                .filter(|e| e.is_alive() && e.kind == Kind::Herbivore)
                .map(|e| Food::meat(e.position)),
        );

        let forces: Vec<Vec2> = self
            .entities
            .iter()
            .map(|entity| {
                if !entity.is_alive() || entity.kind == Kind::Plant {
                    return Vec2::ZERO;
                }
                entity.stay_in_bounds(width, height)
                    + entity.avoid_predators(&self.entities)
                    + entity.seek_food(&sources)
            })
            .collect();

        for (entity, force) in self.entities.iter_mut().zip(forces) {
            if force != Vec2::ZERO {
                entity.apply_force(force);
            }
        }
    }

    /// Foraging and predation pass.
    ///
    /// Herbivores scan the food pool in insertion order and consume the
    /// first item within range, removing it immediately. Carnivores scan
    /// the entity collection in order and record the first living herbivore
    /// within range as a pending kill; kills are applied after the scan so
    /// the pass never mutates an entity it is still iterating over. The
    /// prey's energy drops to zero but it stays in the collection until its
    /// own vitality check fails.
    fn handle_eating(&mut self) {
        let mut kills: Vec<(usize, usize)> = Vec::new();

        for i in 0..self.entities.len() {
            if !self.entities[i].is_alive() {
                continue;
            }
            let position = self.entities[i].position;

            match self.entities[i].kind {
                Kind::Herbivore => {
                    // First match wins, not closest
                    if let Some(j) = self
                        .food
                        .iter()
                        .position(|f| f.position.distance_to(position) < FORAGE_RANGE)
                    {
                        self.food.remove(j);
                        self.entities[i].eat(FORAGE_ENERGY);
                    }
                }
                Kind::Carnivore => {
                    let prey = self.entities.iter().position(|other| {
                        other.is_alive()
                            && other.kind == Kind::Herbivore
                            && other.position.distance_to(position) < HUNT_RANGE
                    });
                    if let Some(j) = prey {
                        kills.push((i, j));
                    }
                }
                Kind::Plant => {}
            }
        }

        for (hunter, prey) in kills {
            self.entities[hunter].eat(HUNT_ENERGY);
            self.entities[prey].energy = 0.0;
            log::debug!(
                "{} takes down {}",
                self.entities[hunter].name,
                self.entities[prey].name
            );
        }
    }

    /// Reproduction pass. Offspring are collected into a side buffer and
    /// appended afterwards; attempts past the population cap are skipped.
    fn handle_reproduction(&mut self) {
        let cap = self.config.population.max_entities;
        let count = self.entities.len();
        let mut brood: Vec<Entity> = Vec::new();

        for i in 0..count {
            if count + brood.len() >= cap {
                break;
            }
            if let Some(child) = self.entities[i].reproduce() {
                brood.push(child);
                self.births_this_tick += 1;
            }
        }

        self.entities.extend(brood);
    }

    /// Partition out entities whose vitality check has failed
    fn remove_dead_entities(&mut self) {
        let before = self.entities.len();
        self.entities.retain(|e| e.is_alive());

        let removed = before - self.entities.len();
        if removed > 0 {
            self.deaths_this_tick += removed;
            log::debug!("removed {} dead entities", removed);
        }
    }

    /// Occasionally sprout a new plant, subject to the population cap
    fn handle_plant_growth(&mut self) {
        if self.rng.gen::<f32>() < PLANT_GROWTH_CHANCE
            && self.entities.len() < self.config.population.max_entities
        {
            self.spawn_random_entity(Kind::Plant);
        }
    }

    /// Recompute totals from scratch and fold in the per-tick counters
    fn update_statistics(&mut self) {
        self.stats.tick = self.day;
        self.stats.births = self.births_this_tick;
        self.stats.deaths = self.deaths_this_tick;
        self.stats.update(&self.entities, self.food.len());
    }

    /// Place a new entity of the given kind at a uniform random position.
    /// Silently does nothing at the population cap.
    pub fn spawn_random_entity(&mut self, kind: Kind) {
        if self.entities.len() >= self.config.population.max_entities {
            return;
        }

        let position = self.random_position();
        self.spawned_total += 1;
        let name = format!("{}-{}", kind.label(), self.spawned_total);
        let seed = self.rng.gen();
        self.entities.push(Entity::new(kind, position, name, seed));
    }

    /// Scatter up to `count` food items, never exceeding the pool cap
    pub fn spawn_food(&mut self, count: usize) {
        for _ in 0..count {
            if self.food.len() >= self.config.food.max_items {
                break;
            }
            let position = self.random_position();
            self.food.push(Food::plant(position));
        }
    }

    fn random_position(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..self.config.world.width),
            self.rng.gen_range(0.0..self.config.world.height),
        )
    }

    /// Run the simulation for a number of ticks with a fixed timestep
    pub fn run(&mut self, ticks: u64, dt: f32) {
        for _ in 0..ticks {
            self.update(dt);
        }
    }

    /// Count of living entities
    pub fn population(&self) -> usize {
        self.entities.iter().filter(|e| e.is_alive()).count()
    }

    /// True when nothing is left alive
    pub fn is_extinct(&self) -> bool {
        self.population() == 0
    }

    /// Master seed, for reproducing a run
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.world.width = 100.0;
        config.world.height = 100.0;
        config.population.max_entities = 50;
        config
    }

    fn empty_world() -> Ecosystem {
        Ecosystem::new_with_seed(test_config(), 42).unwrap()
    }

    /// Hand-place an entity, bypassing the random spawner
    fn place(eco: &mut Ecosystem, kind: Kind, x: f32, y: f32) {
        eco.spawned_total += 1;
        let name = format!("{}-{}", kind.label(), eco.spawned_total);
        eco.entities
            .push(Entity::new(kind, Vec2::new(x, y), name, eco.spawned_total));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Config::default();
        config.population.max_entities = 0;
        assert!(Ecosystem::new_with_seed(config, 1).is_err());
    }

    #[test]
    fn test_initialize_spawns_requested_counts() {
        let mut eco = empty_world();
        eco.initialize(5, 2, 5);

        assert_eq!(eco.stats.herbivores, 5);
        assert_eq!(eco.stats.carnivores, 2);
        assert_eq!(eco.stats.plants, 5);
        assert_eq!(eco.food.len(), eco.config.food.initial_items);

        // Re-initializing clears previous state first
        eco.initialize(1, 0, 0);
        assert_eq!(eco.entities.len(), 1);
    }

    #[test]
    fn test_scenario_one_tick() {
        // 100x100 world, cap 50, 5 herbivores + 2 carnivores + 5 plants
        // and 20 food, one tick at dt=1.0
        let mut eco = empty_world();
        eco.initialize(5, 2, 5);
        let food_before = eco.food.len();

        eco.update(1.0);

        // No reproduction is possible this early (age 10 <= 20), so the
        // only growth is the 1%-chance plant sprout
        assert!(eco.entities.len() <= 13);
        assert!(eco.entities.len() <= eco.config.population.max_entities);

        // Statistics totals sum to the entity count
        assert_eq!(eco.stats.total_entities(), eco.entities.len());
        assert_eq!(eco.stats.food, eco.food.len());

        // The pool shrinks by exactly the number of herbivore first-matches
        assert!(eco.food.len() <= food_before);
    }

    #[test]
    fn test_scenario_predation() {
        // A carnivore and a herbivore 5 units apart: the carnivore eats,
        // the herbivore's energy is forced to zero
        let mut eco = empty_world();
        place(&mut eco, Kind::Carnivore, 50.0, 50.0);
        place(&mut eco, Kind::Herbivore, 55.0, 50.0);

        let carn_energy = eco.entities[0].energy;
        eco.handle_eating();

        assert_eq!(
            eco.entities[0].energy,
            (carn_energy + HUNT_ENERGY).min(eco.entities[0].max_energy)
        );
        assert_eq!(eco.entities[1].energy, 0.0);
        // Marked for death, not removed mid-pass
        assert_eq!(eco.entities.len(), 2);
    }

    #[test]
    fn test_predation_tick_coupling() {
        // The prey killed in tick N is still in the collection at the end
        // of tick N and gone after tick N+1's removal pass
        let mut config = test_config();
        config.food.initial_items = 0;
        let mut eco = Ecosystem::new_with_seed(config, 9).unwrap();
        place(&mut eco, Kind::Carnivore, 50.0, 50.0);
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);

        // Pin both in place so the kill is guaranteed within range
        eco.entities[0].velocity = Vec2::ZERO;
        eco.entities[1].velocity = Vec2::ZERO;

        eco.handle_eating();
        eco.remove_dead_entities();
        assert_eq!(eco.entities.len(), 2, "prey survives the tick it was hit");
        assert!(eco.entities[1].is_alive());
        assert_eq!(eco.entities[1].energy, 0.0);

        // Next tick its own vitality check fires, then removal drops it
        eco.entities[1].update(1.0);
        assert!(!eco.entities[1].is_alive());
        eco.remove_dead_entities();
        assert_eq!(eco.entities.len(), 1);
        assert_eq!(eco.deaths_this_tick, 1);
    }

    #[test]
    fn test_herbivore_takes_first_food_in_insertion_order() {
        let mut eco = empty_world();
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);

        // Both in range; the second is closer but was inserted later
        eco.food.push(Food::plant(Vec2::new(58.0, 50.0)));
        eco.food.push(Food::plant(Vec2::new(51.0, 50.0)));

        let energy = eco.entities[0].energy;
        eco.handle_eating();

        assert_eq!(eco.food.len(), 1);
        assert_eq!(eco.food[0].position, Vec2::new(51.0, 50.0));
        assert_eq!(eco.entities[0].energy, energy + FORAGE_ENERGY);
    }

    #[test]
    fn test_herbivore_eats_at_most_one_item_per_tick() {
        let mut eco = empty_world();
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);
        for _ in 0..5 {
            eco.food.push(Food::plant(Vec2::new(50.0, 50.0)));
        }

        eco.handle_eating();
        assert_eq!(eco.food.len(), 4);
    }

    #[test]
    fn test_carnivore_takes_first_prey_in_collection_order() {
        let mut eco = empty_world();
        place(&mut eco, Kind::Carnivore, 50.0, 50.0);
        place(&mut eco, Kind::Herbivore, 60.0, 50.0); // inserted first
        place(&mut eco, Kind::Herbivore, 51.0, 50.0); // closer

        eco.handle_eating();

        assert_eq!(eco.entities[1].energy, 0.0);
        assert!(eco.entities[2].energy > 0.0);
    }

    #[test]
    fn test_population_cap_on_reproduction() {
        let mut config = test_config();
        config.population.max_entities = 3;
        let mut eco = Ecosystem::new_with_seed(config, 5).unwrap();

        for _ in 0..3 {
            place(&mut eco, Kind::Herbivore, 50.0, 50.0);
        }
        // Everyone fully eligible
        for e in &mut eco.entities {
            e.energy = e.max_energy;
            e.age = 100;
        }

        eco.handle_reproduction();
        assert_eq!(eco.entities.len(), 3, "attempts beyond the cap are skipped");
        assert_eq!(eco.births_this_tick, 0);
    }

    #[test]
    fn test_reproduction_appends_offspring() {
        let mut eco = empty_world();
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);
        let parent_max = eco.entities[0].max_energy;
        eco.entities[0].age = 100;

        // Retry until the dice roll lands; each attempt refills the parent
        for _ in 0..200 {
            eco.entities.truncate(1);
            eco.entities[0].energy = parent_max;
            eco.handle_reproduction();
            if eco.entities.len() == 2 {
                break;
            }
        }

        assert_eq!(eco.entities.len(), 2);
        assert_eq!(eco.entities[1].kind, Kind::Herbivore);
        assert_eq!(eco.entities[1].age, 0);
        assert!(eco.births_this_tick >= 1);
    }

    #[test]
    fn test_spawn_respects_entity_cap() {
        let mut config = test_config();
        config.population.max_entities = 4;
        let mut eco = Ecosystem::new_with_seed(config, 3).unwrap();

        for _ in 0..10 {
            eco.spawn_random_entity(Kind::Plant);
        }
        assert_eq!(eco.entities.len(), 4);
    }

    #[test]
    fn test_spawn_food_respects_pool_cap() {
        let mut eco = empty_world();
        eco.spawn_food(250);
        assert_eq!(eco.food.len(), eco.config.food.max_items);

        // Further requests silently no-op
        eco.spawn_food(10);
        assert_eq!(eco.food.len(), eco.config.food.max_items);
    }

    #[test]
    fn test_caps_hold_over_many_ticks() {
        let mut config = test_config();
        config.population.max_entities = 30;
        let mut eco = Ecosystem::new_with_seed(config, 77).unwrap();
        eco.initialize(10, 3, 10);

        for _ in 0..300 {
            eco.update(1.0);
            assert!(eco.entities.len() <= 30);
            assert!(eco.food.len() <= eco.config.food.max_items);
            assert_eq!(eco.stats.total_entities(), eco.entities.len());
        }
        assert_eq!(eco.day, 300);
    }

    #[test]
    fn test_tick_counters_reset_each_update() {
        // Decision on the open question: births/deaths are per-tick
        // counters, zeroed at the start of every update.
        let mut eco = empty_world();
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);
        eco.entities[0].energy = -1.0;

        eco.update(1.0);
        assert_eq!(eco.stats.deaths, 1);

        eco.update(1.0);
        assert_eq!(eco.stats.deaths, 0, "counter does not accumulate across ticks");
    }

    #[test]
    fn test_steering_pulls_herbivore_toward_food() {
        let mut config = test_config();
        config.food.initial_items = 0;
        let mut eco = Ecosystem::new_with_seed(config, 21).unwrap();
        place(&mut eco, Kind::Herbivore, 50.0, 50.0);
        eco.entities[0].velocity = Vec2::ZERO;
        eco.food.push(Food::plant(Vec2::new(90.0, 50.0)));

        eco.apply_steering();
        assert!(eco.entities[0].velocity.x > 0.0);
    }

    #[test]
    fn test_steering_points_carnivore_at_prey() {
        let mut config = test_config();
        config.food.initial_items = 0;
        let mut eco = Ecosystem::new_with_seed(config, 22).unwrap();
        place(&mut eco, Kind::Carnivore, 50.0, 50.0);
        place(&mut eco, Kind::Herbivore, 90.0, 50.0);
        eco.entities[0].velocity = Vec2::ZERO;

        // The herbivore doubles as a meat source for the carnivore
        eco.apply_steering();
        assert!(eco.entities[0].velocity.x > 0.0);
    }
}
