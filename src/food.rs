//! Food items scattered across the world.

use crate::vec2::Vec2;

/// Energy stored in a food item when it is spawned.
pub const FOOD_ENERGY: f32 = 25.0;

/// What a food item is made of. Herbivores graze on plant matter,
/// carnivores only care about meat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    Plant,
    Meat,
}

/// A food item: a position plus a fixed energy value. Created by the
/// ecosystem, destroyed when consumed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Food {
    pub position: Vec2,
    pub energy: f32,
    pub kind: FoodKind,
}

impl Food {
    /// Plant matter, the kind the ecosystem scatters across the world.
    pub fn plant(position: Vec2) -> Self {
        Self {
            position,
            energy: FOOD_ENERGY,
            kind: FoodKind::Plant,
        }
    }

    /// Meat source, used to point hunting carnivores at live prey.
    pub fn meat(position: Vec2) -> Self {
        Self {
            position,
            energy: FOOD_ENERGY,
            kind: FoodKind::Meat,
        }
    }
}
