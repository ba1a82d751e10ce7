//! Read-only frames handed to renderers

use serde::{Deserialize, Serialize};

use crate::core::calendar::Season;
use crate::core::types::{Color, NationId, Vec2};
use crate::realm::events::Notification;
use crate::realm::world::SimWorld;

/// Everything needed to draw one tick
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderFrame {
    pub year: u32,
    pub season: Season,
    pub active: bool,
    pub nations: Vec<NationView>,
    pub notifications: Vec<Notification>,
    pub statistics: FrameStats,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NationView {
    pub id: NationId,
    pub name: String,
    pub position: Vec2,
    pub footprint_size: f32,
    pub color: Color,
    pub exclaves: Vec<Vec2>,
    pub ships: Vec<Vec2>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FrameStats {
    pub nations_alive: u32,
    pub total_population: f32,
    pub total_ships: u32,
}

impl RenderFrame {
    pub fn capture(
        world: &SimWorld,
        base_unit: f32,
        active: bool,
        notifications: Vec<Notification>,
    ) -> Self {
        let nations: Vec<NationView> = world
            .registry
            .all()
            .iter()
            .map(|n| NationView {
                id: n.id,
                name: n.name.clone(),
                position: n.position,
                footprint_size: n.footprint_size(base_unit),
                color: n.color,
                exclaves: n.exclaves.iter().map(|e| e.position()).collect(),
                ships: n.ships.iter().map(|s| s.position()).collect(),
            })
            .collect();

        let statistics = FrameStats {
            nations_alive: nations.len() as u32,
            total_population: world.registry.all().iter().map(|n| n.population).sum(),
            total_ships: nations.iter().map(|n| n.ships.len() as u32).sum(),
        };

        Self {
            year: world.year(),
            season: world.calendar.current_season(),
            active,
            nations,
            notifications,
            statistics,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Year {} ({:?}){}: {} nations, population {:.0}, {} ships",
            self.year,
            self.season,
            if self.active { "" } else { " [paused]" },
            self.statistics.nations_alive,
            self.statistics.total_population,
            self.statistics.total_ships,
        )
    }
}

/// Rendering collaborator
pub trait FrameSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Renders frames as log lines
#[derive(Debug, Default)]
pub struct LogFrameSink {
    pub frames: u64,
}

impl FrameSink for LogFrameSink {
    fn present(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        tracing::info!("{}", frame.summary());
        for notification in &frame.notifications {
            tracing::info!("{}", notification);
        }
        for nation in &frame.nations {
            tracing::debug!(
                "  {} {} at ({:.0}, {:.0}) size {:.1}",
                nation.id,
                nation.name,
                nation.position.x,
                nation.position.y,
                nation.footprint_size
            );
        }
    }
}
