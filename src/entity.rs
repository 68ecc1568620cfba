//! Entity state and behavior: energy, aging, movement, reproduction and
//! steering.

use crate::food::{Food, FoodKind};
use crate::vec2::Vec2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Chance per tick that a mobile entity picks a new random heading
const DIRECTION_CHANGE_CHANCE: f32 = 0.02;
/// Translation scale applied to velocity each tick
const MOVE_SCALE: f32 = 20.0;
/// Energy cost per unit of speed per second
const MOVE_COST: f32 = 0.1;
/// Simulation ticks of age gained per second of wall time
const AGE_SCALE: f32 = 10.0;

/// Minimum energy fraction required to reproduce
const REPRODUCTION_ENERGY_FRACTION: f32 = 0.8;
/// Minimum age in ticks required to reproduce
const REPRODUCTION_MIN_AGE: u32 = 20;
/// Probability that an eligible reproduction attempt succeeds
const REPRODUCTION_CHANCE: f32 = 0.3;
/// Fraction of energy the parent keeps after reproducing
const REPRODUCTION_COST: f32 = 0.6;
/// Fraction of the parent's pre-cost energy given to the child
const OFFSPRING_ENERGY_SHARE: f32 = 0.7;
/// Size scale of a newborn relative to its parent
const OFFSPRING_SIZE_SCALE: f32 = 0.8;

/// Distance inside the world edge where the bounds force kicks in
const BOUNDS_MARGIN: f32 = 30.0;
/// Amplification applied to the bounds-avoidance vector
const BOUNDS_FORCE_SCALE: f32 = 3.0;
/// Radius within which a herbivore reacts to a carnivore
const PREDATOR_DANGER_RADIUS: f32 = 80.0;
/// Radius within which food is worth steering toward
const FOOD_SEEK_RADIUS: f32 = 150.0;
/// Magnitude of the food-seeking force
const FOOD_SEEK_SCALE: f32 = 2.0;

/// Energy ratio below which the rendered color shifts toward red
const LOW_ENERGY_RATIO: f32 = 0.3;

/// The fixed category of an entity. Never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Herbivore,
    Carnivore,
    Plant,
}

/// Constant parameters derived from an entity's kind, looked up once at
/// construction instead of branching on kind in every method.
#[derive(Clone, Copy, Debug)]
pub struct KindParams {
    /// Energy a freshly spawned entity starts with
    pub starting_energy: f32,
    /// Upper bound on stored energy
    pub max_energy: f32,
    /// Age in ticks at which the entity dies
    pub max_age: u32,
    /// Base energy drain per second. Negative means the entity generates
    /// energy (plants photosynthesize).
    pub consumption_rate: f32,
    /// Base display color (RGBA)
    pub base_color: [f32; 4],
    /// Base display size
    pub base_size: f32,
    /// Speed cap enforced by `apply_force`
    pub max_speed: f32,
}

impl Kind {
    /// Parameter table for this kind
    pub const fn params(self) -> KindParams {
        match self {
            Kind::Herbivore => KindParams {
                starting_energy: 80.0,
                max_energy: 150.0,
                max_age: 200,
                consumption_rate: 1.5,
                base_color: [0.0, 0.0, 1.0, 1.0],
                base_size: 8.0,
                max_speed: 80.0,
            },
            Kind::Carnivore => KindParams {
                starting_energy: 100.0,
                max_energy: 200.0,
                max_age: 150,
                consumption_rate: 2.0,
                base_color: [1.0, 0.0, 0.0, 1.0],
                base_size: 12.0,
                max_speed: 120.0,
            },
            Kind::Plant => KindParams {
                starting_energy: 50.0,
                max_energy: 100.0,
                max_age: 300,
                consumption_rate: -0.5,
                base_color: [0.0, 1.0, 0.0, 1.0],
                base_size: 6.0,
                max_speed: 80.0,
            },
        }
    }

    /// Short human-readable label, used for default entity names
    pub fn label(self) -> &'static str {
        match self {
            Kind::Herbivore => "herbivore",
            Kind::Carnivore => "carnivore",
            Kind::Plant => "plant",
        }
    }

    /// What this kind eats, or `None` for plants
    pub fn diet(self) -> Option<FoodKind> {
        match self {
            Kind::Herbivore => Some(FoodKind::Plant),
            Kind::Carnivore => Some(FoodKind::Meat),
            Kind::Plant => None,
        }
    }
}

/// A single agent in the simulation
#[derive(Clone, Debug)]
pub struct Entity {
    pub kind: Kind,
    pub name: String,
    pub position: Vec2,
    pub velocity: Vec2,
    pub energy: f32,
    pub max_energy: f32,
    pub age: u32,
    pub max_age: u32,
    pub size: f32,
    pub color: [f32; 4],
    // Terminal once false. Mutated only by check_vitality, so death stays
    // monotonic.
    alive: bool,
    rng: ChaCha8Rng,
}

impl Entity {
    /// Create an entity of the given kind at a position, with its own
    /// seeded random stream.
    pub fn new(kind: Kind, position: Vec2, name: String, seed: u64) -> Self {
        let params = kind.params();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let velocity = random_direction(&mut rng);

        log::trace!("spawned {} at ({:.1}, {:.1})", name, position.x, position.y);

        Self {
            kind,
            name,
            position,
            velocity,
            energy: params.starting_energy,
            max_energy: params.max_energy,
            age: 0,
            max_age: params.max_age,
            size: params.base_size,
            color: params.base_color,
            alive: true,
            rng,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Advance this entity by one tick. Dead entities are inert.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        self.consume_energy(dt);
        self.advance_age(dt);
        self.move_step(dt);
        self.check_vitality();
    }

    /// Base metabolic drain. Plants run it in reverse and generate energy,
    /// capped at their maximum.
    fn consume_energy(&mut self, dt: f32) {
        self.energy -= self.kind.params().consumption_rate * dt;
        self.energy = self.energy.min(self.max_energy);
    }

    /// Aging runs at 10x wall time; fractional ticks are dropped, so small
    /// dt values do not age the entity at all.
    fn advance_age(&mut self, dt: f32) {
        self.age += (dt * AGE_SCALE) as u32;
    }

    /// Random-walk movement. Plants never move; everything else
    /// occasionally picks a new heading and pays for the distance covered.
    fn move_step(&mut self, dt: f32) {
        if self.kind == Kind::Plant {
            return;
        }

        if self.rng.gen::<f32>() < DIRECTION_CHANGE_CHANCE {
            self.velocity = random_direction(&mut self.rng);
        }

        self.position = self.position + self.velocity * (dt * MOVE_SCALE);
        self.energy -= self.velocity.length() * dt * MOVE_COST;
    }

    /// The only place death is decided. Evaluated exactly once per update;
    /// an entity that crosses a threshold mid-tick is caught next tick.
    fn check_vitality(&mut self) {
        if self.energy <= 0.0 || self.age >= self.max_age {
            self.alive = false;
            let cause = if self.energy <= 0.0 { "starvation" } else { "old age" };
            log::debug!("{} dies of {} (age {})", self.name, cause, self.age);
        }
    }

    /// Gain energy, clamped to the kind's maximum
    pub fn eat(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(self.max_energy);
        log::trace!("{} eats {:.1} energy", self.name, amount);
    }

    /// Eligibility check for reproduction. Pure predicate, no randomness.
    pub fn can_reproduce(&self) -> bool {
        self.alive
            && self.energy > self.max_energy * REPRODUCTION_ENERGY_FRACTION
            && self.age > REPRODUCTION_MIN_AGE
    }

    /// Attempt to reproduce. Eligibility alone is not enough: a successful
    /// attempt also requires a 30% dice roll. On success the parent pays a
    /// 40% energy cost and the child is built from the pre-cost snapshot.
    pub fn reproduce(&mut self) -> Option<Entity> {
        if !self.can_reproduce() {
            return None;
        }
        if self.rng.gen::<f32>() >= REPRODUCTION_CHANCE {
            return None;
        }

        let child_seed = self.rng.gen();
        let child = self.offspring(child_seed);
        self.energy *= REPRODUCTION_COST;

        log::trace!("{} reproduces -> {}", self.name, child.name);
        Some(child)
    }

    /// Build a child from this entity's current (pre-cost) state: same kind,
    /// position, velocity and max stats, 70% of the energy, 80% of the
    /// size, age reset, fresh random stream.
    pub fn offspring(&self, seed: u64) -> Entity {
        Entity {
            kind: self.kind,
            name: format!("{}-child", self.name),
            position: self.position,
            velocity: self.velocity,
            energy: self.energy * OFFSPRING_ENERGY_SHARE,
            max_energy: self.max_energy,
            age: 0,
            max_age: self.max_age,
            size: self.size * OFFSPRING_SIZE_SCALE,
            color: self.color,
            alive: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Add a steering force to the velocity, clamping speed to the kind's
    /// cap.
    pub fn apply_force(&mut self, force: Vec2) {
        self.velocity = self.velocity + force;

        let max_speed = self.kind.params().max_speed;
        let speed = self.velocity.length();
        if speed > max_speed {
            self.velocity = self.velocity * (max_speed / speed);
        }
    }

    /// Corrective force pushing away from world edges. Zero outside the
    /// 30-unit margin.
    pub fn stay_in_bounds(&self, world_width: f32, world_height: f32) -> Vec2 {
        let mut steering = Vec2::ZERO;

        if self.position.x < BOUNDS_MARGIN {
            steering.x = BOUNDS_MARGIN;
        } else if self.position.x > world_width - BOUNDS_MARGIN {
            steering.x = -BOUNDS_MARGIN;
        }

        if self.position.y < BOUNDS_MARGIN {
            steering.y = BOUNDS_MARGIN;
        } else if self.position.y > world_height - BOUNDS_MARGIN {
            steering.y = -BOUNDS_MARGIN;
        }

        steering * BOUNDS_FORCE_SCALE
    }

    /// Repulsion away from living carnivores within 80 units. Only
    /// herbivores flee; everything else returns zero.
    pub fn avoid_predators(&self, others: &[Entity]) -> Vec2 {
        if self.kind != Kind::Herbivore {
            return Vec2::ZERO;
        }

        let mut avoidance = Vec2::ZERO;
        for predator in others {
            if !predator.is_alive() || predator.kind != Kind::Carnivore {
                continue;
            }

            let to_predator = predator.position - self.position;
            let distance = to_predator.length();
            if distance < PREDATOR_DANGER_RADIUS && distance > 0.0 {
                let flee = -to_predator.normalized();
                avoidance = avoidance + flee * (PREDATOR_DANGER_RADIUS - distance);
            }
        }

        avoidance
    }

    /// Attraction toward the nearest diet-matching food source within 150
    /// units. Plants photosynthesize and never seek.
    pub fn seek_food(&self, food_sources: &[Food]) -> Vec2 {
        let Some(diet) = self.kind.diet() else {
            return Vec2::ZERO;
        };

        let mut closest = f32::MAX;
        let mut best_direction = Vec2::ZERO;

        for food in food_sources {
            if food.kind != diet {
                continue;
            }
            let to_food = food.position - self.position;
            let distance = to_food.length();
            if distance < closest {
                closest = distance;
                best_direction = to_food.normalized();
            }
        }

        if closest < FOOD_SEEK_RADIUS {
            best_direction * FOOD_SEEK_SCALE
        } else {
            Vec2::ZERO
        }
    }

    /// Energy as a fraction of the maximum, clamped to [0, 1] for display.
    /// The raw value may dip below zero in the tick before the vitality
    /// check fires.
    pub fn energy_ratio(&self) -> f32 {
        (self.energy / self.max_energy).clamp(0.0, 1.0)
    }

    /// Display color: the base kind color, shifted toward red when energy
    /// drops under 30%.
    pub fn render_color(&self) -> [f32; 4] {
        let ratio = self.energy_ratio();
        let mut color = self.color;
        if ratio < LOW_ENERGY_RATIO {
            color[0] = 1.0;
            color[1] *= ratio;
            color[2] *= ratio;
        }
        color
    }
}

/// A random direction with components uniform in [-1, 1)
fn random_direction(rng: &mut ChaCha8Rng) -> Vec2 {
    Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
}
