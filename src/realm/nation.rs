//! Nation - a simulated political actor and its detached holdings

use serde::{Deserialize, Serialize};

use crate::core::config::CombatMetric;
use crate::core::types::{Color, Footprint, NationId, Vec2};

/// Territory at or below this is treated as collapsed
pub const TERRITORY_EPSILON: f32 = 1e-6;

/// Stability bounds ("peace level")
pub const STABILITY_MIN: f32 = 0.0;
pub const STABILITY_MAX: f32 = 100.0;

/// A nation competing for territory on the map
#[derive(Clone, Debug, PartialEq)]
pub struct Nation {
    pub id: NationId,
    pub name: String,

    /// Top-left anchor of the primary footprint
    pub position: Vec2,

    pub strength: f32,
    pub population: f32,
    pub stability: f32,
    pub army_size: f32,

    /// Footprint multiplier; at or below zero the nation is gone
    pub territory: f32,
    /// Explicit footprint edge length; derived from `territory` when absent
    pub territory_size: Option<f32>,

    pub color: Color,
    pub exclaves: Vec<Exclave>,
    pub ships: Vec<Ship>,
}

/// Detached territory fragment, never checked for overlap
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exclave {
    pub x: f32,
    pub y: f32,
}

impl Exclave {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Mobile unit that can intrude into foreign territory
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vec2>,
}

impl Ship {
    pub fn at(position: Vec2) -> Self {
        Self { x: position.x, y: position.y, velocity: None }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Nation {
    /// Edge length of the primary footprint
    pub fn footprint_size(&self, base_unit: f32) -> f32 {
        self.territory_size.unwrap_or(base_unit * self.territory)
    }

    pub fn footprint(&self, base_unit: f32) -> Footprint {
        Footprint::new(self.position, self.footprint_size(base_unit))
    }

    pub fn combat_value(&self, metric: CombatMetric) -> f32 {
        match metric {
            CombatMetric::Strength => self.strength,
            CombatMetric::ArmySize => self.army_size,
        }
    }

    pub fn combat_value_mut(&mut self, metric: CombatMetric) -> &mut f32 {
        match metric {
            CombatMetric::Strength => &mut self.strength,
            CombatMetric::ArmySize => &mut self.army_size,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.territory <= TERRITORY_EPSILON
    }

    /// Tooltip-style summary of the nation's vital statistics
    pub fn details(&self) -> String {
        format!(
            "{} {}: strength {:.2}, population {:.2}, peace {:.2}, army {:.2}, territory {:.2}",
            self.id,
            self.name,
            self.strength,
            self.population,
            self.stability,
            self.army_size,
            self.territory,
        )
    }
}

/// Subtract and clamp at the zero floor
pub fn drain(value: &mut f32, amount: f32) {
    *value = (*value - amount).max(0.0);
}
