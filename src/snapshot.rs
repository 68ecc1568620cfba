//! Read-only snapshot of the world for a renderer or HUD.
//!
//! The simulation hands lightweight copies to its rendering collaborator
//! once per frame; the renderer never gets write access to live state.

use crate::ecosystem::Ecosystem;
use crate::entity::Kind;
use crate::stats::Stats;
use crate::vec2::Vec2;

/// Lightweight view of one living entity
#[derive(Clone, Debug)]
pub struct EntityView {
    pub kind: Kind,
    pub position: Vec2,
    pub size: f32,
    /// Display color with the low-energy red shift applied
    pub color: [f32; 4],
    /// Energy as a fraction of the maximum, clamped to [0, 1]. Drives the
    /// energy bar drawn above non-plant entities.
    pub energy_ratio: f32,
}

/// Complete world snapshot for one frame
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    /// Current day/tick
    pub day: u64,
    /// Statistics for the HUD
    pub stats: Stats,
    /// All living entities
    pub entities: Vec<EntityView>,
    /// Food item positions
    pub food: Vec<Vec2>,
}

impl WorldSnapshot {
    /// Capture the current state of the world. Dead entities awaiting
    /// removal are excluded.
    pub fn from_world(eco: &Ecosystem) -> Self {
        let entities = eco
            .entities
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| EntityView {
                kind: e.kind,
                position: e.position,
                size: e.size,
                color: e.render_color(),
                energy_ratio: e.energy_ratio(),
            })
            .collect();

        let food = eco.food.iter().map(|f| f.position).collect();

        Self {
            day: eco.day,
            stats: eco.stats.clone(),
            entities,
            food,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_snapshot_excludes_dead_entities() {
        let mut config = Config::default();
        config.population.initial_herbivores = 3;
        config.population.initial_carnivores = 0;
        config.population.initial_plants = 0;
        config.food.initial_items = 0;

        let mut eco = Ecosystem::new_with_seed(config, 11).unwrap();
        eco.initialize(3, 0, 0);

        // Starve one herbivore and run its vitality check
        eco.entities[0].energy = -1.0;
        eco.entities[0].update(1.0);

        let snapshot = WorldSnapshot::from_world(&eco);
        assert_eq!(snapshot.entities.len(), 2);
        assert!(snapshot
            .entities
            .iter()
            .all(|v| (0.0..=1.0).contains(&v.energy_ratio)));
    }

    #[test]
    fn test_snapshot_mirrors_food_positions() {
        let mut eco = Ecosystem::new_with_seed(Config::default(), 12).unwrap();
        eco.spawn_food(5);

        let snapshot = WorldSnapshot::from_world(&eco);
        assert_eq!(snapshot.food.len(), 5);
        assert_eq!(snapshot.food[0], eco.food[0].position);
    }
}
