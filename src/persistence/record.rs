//! Flat, field-named save records

use serde::{Deserialize, Serialize};

use crate::core::types::Color;
use crate::realm::nation::{Exclave, Nation, Ship};
use crate::realm::world::SimWorld;

/// Snapshot of the full registry at a tick boundary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub year: u32,
    pub nations: Vec<NationRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationRecord {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub strength: f32,
    pub population: f32,
    #[serde(rename = "peaceLevel")]
    pub stability: f32,
    pub army_size: f32,
    pub territory: f32,
    pub territory_size: Option<f32>,
    pub color: Color,
    pub exclaves: Vec<Exclave>,
    pub ships: Vec<Ship>,
}

impl From<&Nation> for NationRecord {
    fn from(nation: &Nation) -> Self {
        Self {
            id: nation.id.0,
            name: nation.name.clone(),
            x: nation.position.x,
            y: nation.position.y,
            strength: nation.strength,
            population: nation.population,
            stability: nation.stability,
            army_size: nation.army_size,
            territory: nation.territory,
            territory_size: nation.territory_size,
            color: nation.color,
            exclaves: nation.exclaves.clone(),
            ships: nation.ships.clone(),
        }
    }
}

impl SaveFile {
    pub fn capture(world: &SimWorld) -> Self {
        Self {
            year: world.year(),
            nations: world.registry.all().iter().map(NationRecord::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
