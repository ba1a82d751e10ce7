//! Creation and edit requests coming from outside the simulation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GenerationConfig;
use crate::core::types::Color;
use crate::realm::names::random_name;
use crate::realm::nation::{Nation, STABILITY_MAX, STABILITY_MIN};
use crate::realm::registry::NationAttributes;

/// Request to found a nation; every omitted field has a default
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    pub name: Option<String>,
    pub strength: Option<f32>,
    pub population: Option<f32>,
    pub stability: Option<f32>,
    pub color_r: Option<u8>,
    pub color_g: Option<u8>,
    pub color_b: Option<u8>,
    pub army_size: Option<f32>,
    pub ship_count: Option<u32>,
    /// Explicit footprint edge length
    pub footprint_size: Option<f32>,
}

impl CreateRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn into_attributes<R: Rng>(self, generation: &GenerationConfig, rng: &mut R) -> NationAttributes {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| random_name(rng));

        NationAttributes {
            name,
            strength: self.strength.unwrap_or(10.0),
            population: self.population.unwrap_or(100.0),
            stability: self
                .stability
                .unwrap_or(50.0)
                .clamp(STABILITY_MIN, STABILITY_MAX),
            army_size: self.army_size.unwrap_or(0.0),
            color: Color::rgb(
                self.color_r.unwrap_or(0),
                self.color_g.unwrap_or(0),
                self.color_b.unwrap_or(0),
            ),
            ship_count: self.ship_count.unwrap_or(generation.ships_per_nation),
            territory_size: self.footprint_size.filter(|s| *s > 0.0),
        }
    }
}

/// Request to change an existing nation, looked up by name
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditRequest {
    pub name: String,
    pub strength: Option<f32>,
    pub population: Option<f32>,
    pub stability: Option<f32>,
    pub army_size: Option<f32>,
    pub color: Option<Color>,
}

impl EditRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn apply(&self, nation: &mut Nation) {
        if let Some(strength) = self.strength {
            nation.strength = strength.max(0.0);
        }
        if let Some(population) = self.population {
            nation.population = population.max(0.0);
        }
        if let Some(stability) = self.stability {
            nation.stability = stability.clamp(STABILITY_MIN, STABILITY_MAX);
        }
        if let Some(army_size) = self.army_size {
            nation.army_size = army_size.max(0.0);
        }
        if let Some(color) = self.color {
            nation.color = color;
        }
    }
}
