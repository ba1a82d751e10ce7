//! Persistence boundary
//!
//! Saves are snapshots of the full registry; loading rebuilds the
//! registry verbatim, falling back to fresh generation when no usable
//! save exists.

pub mod record;
pub mod restore;
pub mod store;

pub use record::{NationRecord, SaveFile};
pub use store::{JsonFileStore, MemoryStore, SaveStore};

use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::realm::systems::generate_nations;
use crate::realm::world::SimWorld;

/// Restore the world from `store`, or generate a new one
pub fn load_or_generate(config: &SimulationConfig, store: &dyn SaveStore) -> SimWorld {
    let mut world = SimWorld::empty(config);

    let document = match store.load() {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Unreadable save, starting a new world: {}", e);
            None
        }
    };

    if let Some(document) = document {
        match restore::restore(&document, config, &mut world.rng) {
            Some((registry, year)) => {
                tracing::info!("Restored {} nations at year {}", registry.len(), year);
                world.registry = registry;
                world.calendar = Calendar::starting_at(year, config.scheduler.years_per_season);
                return world;
            }
            None => tracing::warn!("Save holds no nation list, starting a new world"),
        }
    }

    world.registry = generate_nations(config, &mut world.rng);
    world
}
