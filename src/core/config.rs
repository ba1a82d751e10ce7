//! Simulation configuration with documented constants
//!
//! All tunables are collected here. Every section has sensible defaults
//! so a TOML file only needs to name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Configuration for the whole simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub map: MapConfig,
    pub generation: GenerationConfig,
    pub unrest: UnrestConfig,
    pub conflict: ConflictConfig,
    pub mobility: MobilityConfig,
    pub scheduler: SchedulerConfig,
}

// === MAP ===
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in world units
    pub width: f32,
    /// Map height in world units
    pub height: f32,
    /// Footprint edge length of a nation with territory 1.0
    ///
    /// New nations are placed using this base size regardless of the
    /// territory they later grow into.
    pub base_unit: f32,
    /// Random placement attempts before falling back to a grid scan
    pub placement_attempts: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            base_unit: 50.0,
            placement_attempts: 10_000,
        }
    }
}

// === GENERATION ===
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Nations generated when no save exists
    pub nation_count: u32,
    /// Ships given to each generated nation (and to created nations by default)
    pub ships_per_nation: u32,
    /// Maximum exclave offset from the anchor on each axis
    pub exclave_spread: f32,
    /// Maximum ship spawn offset from the anchor on each axis
    pub ship_spread: f32,
    /// Initial ship speed; 0 produces velocity-less ships that random-walk
    pub ship_speed: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            nation_count: 10,
            ships_per_nation: 3,
            exclave_spread: 45.0,
            ship_spread: 25.0,
            ship_speed: 0.0,
        }
    }
}

// === UNREST ===
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrestPolicy {
    /// Population drops by a uniform random amount below `max_population_loss`
    PopulationDrain,
    /// Territory shrinks by `territory_decay`; collapse eliminates the nation
    TerritoryDecay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UnrestConfig {
    /// Stability strictly below this triggers unrest
    pub threshold: f32,
    pub policy: UnrestPolicy,
    pub max_population_loss: f32,
    pub territory_decay: f32,
}

impl Default for UnrestConfig {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            policy: UnrestPolicy::PopulationDrain,
            max_population_loss: 100.0,
            territory_decay: 0.1,
        }
    }
}

// === CONFLICT ===
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatMetric {
    Strength,
    ArmySize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatPolicy {
    /// Collapsed loser is removed outright
    Eliminate,
    /// Collapsed loser's territory and exclaves fold into the winner
    Absorb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictConfig {
    pub metric: CombatMetric,
    /// Fraction of its own combat value the loser gives up
    pub attrition: f32,
    /// Winner also pays `attrition` of its own combat value
    pub winner_attrition: bool,
    /// Loser population loss as a fraction of the aggressor's population...
    pub population_loss_ratio: f32,
    /// ...capped at this absolute amount per conflict
    pub population_loss_cap: f32,
    pub army_loss_ratio: f32,
    pub army_loss_cap: f32,
    /// Territory moved from loser to winner per conflict; 0 disables transfer
    pub territory_transfer: f32,
    pub defeat: DefeatPolicy,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            metric: CombatMetric::Strength,
            attrition: 0.1,
            winner_attrition: true,
            population_loss_ratio: 0.1,
            population_loss_cap: 100.0,
            army_loss_ratio: 0.1,
            army_loss_cap: 10.0,
            territory_transfer: 0.1,
            defeat: DefeatPolicy::Absorb,
        }
    }
}

// === MOBILITY ===
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilityConfig {
    /// Ships home in on any foreign anchor closer than this
    pub homing_radius: f32,
    /// Per-axis homing step
    pub homing_step: f32,
    /// Per-axis random walk amplitude for velocity-less ships
    pub wander: f32,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            homing_radius: 100.0,
            homing_step: 5.0,
            wander: 2.0,
        }
    }
}

// === SCHEDULER ===
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wall-clock interval between ticks
    pub tick_interval_ms: u64,
    pub years_per_season: u32,
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            years_per_season: 1,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let map = &self.map;
        if map.base_unit <= 0.0 {
            return Err(SimError::InvalidConfig("map.base_unit must be positive".into()));
        }
        if map.width <= map.base_unit || map.height <= map.base_unit {
            return Err(SimError::InvalidConfig(format!(
                "map ({}x{}) must be larger than base_unit ({})",
                map.width, map.height, map.base_unit
            )));
        }

        let ratios = [
            ("conflict.attrition", self.conflict.attrition),
            ("conflict.population_loss_ratio", self.conflict.population_loss_ratio),
            ("conflict.army_loss_ratio", self.conflict.army_loss_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        if self.conflict.territory_transfer < 0.0 || self.unrest.territory_decay < 0.0 {
            return Err(SimError::InvalidConfig(
                "territory_transfer and territory_decay must not be negative".into(),
            ));
        }

        if self.unrest.max_population_loss <= 0.0 {
            return Err(SimError::InvalidConfig(
                "unrest.max_population_loss must be positive".into(),
            ));
        }

        if self.scheduler.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "scheduler.tick_interval_ms must be positive".into(),
            ));
        }

        Ok(())
    }
}
