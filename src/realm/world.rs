//! SimWorld - the world state container and the per-tick context

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::core::types::Vec2;
use crate::realm::events::NotificationLog;
use crate::realm::nation::Nation;
use crate::realm::registry::Registry;

/// Everything a running simulation owns
pub struct SimWorld {
    pub registry: Registry,
    pub calendar: Calendar,
    /// Random number generator (deterministic when seeded)
    pub rng: ChaCha8Rng,
}

/// Single-writer view handed to each pass of a tick, in order.
/// Mutations made by one pass are visible to every later pass.
pub struct TickContext<'a> {
    pub registry: &'a mut Registry,
    pub rng: &'a mut ChaCha8Rng,
    pub log: &'a mut NotificationLog,
    pub config: &'a SimulationConfig,
    pub year: u32,
}

impl SimWorld {
    pub fn new(registry: Registry, calendar: Calendar, rng: ChaCha8Rng) -> Self {
        Self { registry, calendar, rng }
    }

    pub fn empty(config: &SimulationConfig) -> Self {
        Self::new(
            Registry::new(),
            Calendar::new(config.scheduler.years_per_season),
            rng_from_config(config),
        )
    }

    pub fn year(&self) -> u32 {
        self.calendar.current_year()
    }

    pub fn tick_context<'a>(
        &'a mut self,
        log: &'a mut NotificationLog,
        config: &'a SimulationConfig,
    ) -> TickContext<'a> {
        let year = self.calendar.current_year();
        TickContext {
            registry: &mut self.registry,
            rng: &mut self.rng,
            log,
            config,
            year,
        }
    }

    /// First nation whose footprint strictly contains `point`
    pub fn nation_at(&self, point: Vec2, base_unit: f32) -> Option<&Nation> {
        self.registry
            .all()
            .iter()
            .find(|n| n.footprint(base_unit).contains_strict(point))
    }
}

pub fn rng_from_config(config: &SimulationConfig) -> ChaCha8Rng {
    match config.scheduler.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
