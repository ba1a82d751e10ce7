//! Calendar tracking simulated years and seasons
//!
//! One tick advances one year. Seasons cycle every `years_per_season`
//! years and only move while the simulation is active.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    year: u32,
    years_per_season: u32,
}

impl Calendar {
    pub fn new(years_per_season: u32) -> Self {
        Self::starting_at(0, years_per_season)
    }

    pub fn starting_at(year: u32, years_per_season: u32) -> Self {
        Self {
            year,
            years_per_season: years_per_season.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.year += 1;
    }

    pub fn current_year(&self) -> u32 {
        self.year
    }

    pub fn current_season(&self) -> Season {
        Season::from_index(self.year / self.years_per_season)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(1)
    }
}
