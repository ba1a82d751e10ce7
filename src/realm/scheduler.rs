//! Tick scheduler - drives the simulation at a fixed cadence
//!
//! Each active tick runs, strictly in order: unrest, conflict, ship
//! movement, time advancement. Render and persistence follow every tick,
//! active or idle. Mode toggles and external requests are only applied
//! between ticks.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::NationId;
use crate::persistence::{SaveFile, SaveStore};
use crate::realm::events::{NotificationKind, NotificationLog};
use crate::realm::output::{FrameSink, RenderFrame};
use crate::realm::requests::{CreateRequest, EditRequest};
use crate::realm::systems::{apply_unrest, found_nation, move_ships, resolve_conflicts};
use crate::realm::world::SimWorld;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Active,
    Idle,
}

/// What one scheduled tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Year after the tick
    pub year: u32,
    pub ran: bool,
    pub unrest: usize,
    pub conflicts: usize,
}

/// External input delivered between ticks
#[derive(Debug, Clone)]
pub enum Control {
    Toggle,
    Create(CreateRequest),
    Edit(EditRequest),
    Find(String),
    Quit,
}

pub struct Scheduler {
    world: SimWorld,
    config: SimulationConfig,
    log: NotificationLog,
    mode: Mode,
    toggle_requested: bool,
}

impl Scheduler {
    pub fn new(world: SimWorld, config: SimulationConfig) -> Self {
        Self {
            world,
            config,
            log: NotificationLog::new(),
            mode: Mode::Active,
            toggle_requested: false,
        }
    }

    pub fn world(&self) -> &SimWorld {
        &self.world
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn notifications(&self) -> &NotificationLog {
        &self.log
    }

    /// Flip between active and idle at the next tick boundary.
    /// Two requests before the boundary cancel out.
    pub fn request_toggle(&mut self) {
        self.toggle_requested = !self.toggle_requested;
    }

    /// Run one scheduled tick
    pub fn tick(&mut self) -> TickReport {
        self.apply_pending_toggle();

        if self.mode == Mode::Idle {
            return TickReport {
                year: self.world.year(),
                ran: false,
                unrest: 0,
                conflicts: 0,
            };
        }

        let mut ctx = self.world.tick_context(&mut self.log, &self.config);
        let unrest = apply_unrest(&mut ctx);
        let conflicts = resolve_conflicts(&mut ctx);
        move_ships(&mut ctx);
        self.world.calendar.advance();

        tracing::debug!(
            "Year {} done: {} unrest, {} conflicts, {} nations",
            self.world.year(),
            unrest,
            conflicts,
            self.world.registry.len()
        );

        TickReport {
            year: self.world.year(),
            ran: true,
            unrest,
            conflicts,
        }
    }

    /// Hand the current state to the renderer and the save store
    pub fn publish(&mut self, sink: &mut dyn FrameSink, store: &mut dyn SaveStore) {
        let frame = RenderFrame::capture(
            &self.world,
            self.config.map.base_unit,
            self.mode == Mode::Active,
            self.log.drain(),
        );
        sink.present(&frame);

        if let Err(e) = store.save(&SaveFile::capture(&self.world)) {
            tracing::warn!("Failed to save year {}: {}", self.world.year(), e);
        }
    }

    /// Tick, then render and persist regardless of mode
    pub fn step(&mut self, sink: &mut dyn FrameSink, store: &mut dyn SaveStore) -> TickReport {
        let report = self.tick();
        self.publish(sink, store);
        report
    }

    pub fn create_nation(&mut self, request: CreateRequest) -> Result<NationId> {
        let attributes = request.into_attributes(&self.config.generation, &mut self.world.rng);
        let name = attributes.name.clone();
        let year = self.world.year();

        match found_nation(&mut self.world.registry, attributes, &self.config, &mut self.world.rng) {
            Ok(id) => {
                tracing::info!("Founded {} ({})", name, id);
                self.log.push(NotificationKind::NationCreated { nation: id, name }, year);
                Ok(id)
            }
            Err(e) => {
                tracing::warn!("Could not found {}: {}", name, e);
                self.log.push(NotificationKind::NoSpace { name }, year);
                Err(e)
            }
        }
    }

    pub fn edit_nation(&mut self, request: &EditRequest) -> Result<NationId> {
        let year = self.world.year();
        match self.world.registry.find_by_name_mut(&request.name) {
            Ok(nation) => {
                request.apply(nation);
                let id = nation.id;
                let name = nation.name.clone();
                self.log.push(NotificationKind::NationEdited { nation: id, name }, year);
                Ok(id)
            }
            Err(e) => {
                notify_lookup_failure(&mut self.log, &e, year);
                Err(e)
            }
        }
    }

    /// Look up a nation by name, reporting a miss as a notification
    pub fn lookup(&mut self, name: &str) -> Result<NationId> {
        let found = self.world.registry.find_by_name(name).map(|n| n.id);
        if let Err(e) = &found {
            notify_lookup_failure(&mut self.log, e, self.world.year());
        }
        found
    }

    pub fn handle(&mut self, control: Control) {
        match control {
            Control::Toggle => self.request_toggle(),
            Control::Create(request) => {
                if let Err(e) = self.create_nation(request) {
                    tracing::debug!("Create request rejected: {}", e);
                }
            }
            Control::Edit(request) => match self.edit_nation(&request) {
                Ok(id) => tracing::debug!("Edited {}", id),
                Err(e) => tracing::debug!("Edit request rejected: {}", e),
            },
            Control::Find(name) => {
                if let Ok(id) = self.lookup(&name) {
                    if let Some(nation) = self.world.registry.get(id) {
                        tracing::info!("{}", nation.details());
                    }
                }
            }
            Control::Quit => {}
        }
    }

    fn apply_pending_toggle(&mut self) {
        if !self.toggle_requested {
            return;
        }
        self.toggle_requested = false;
        self.mode = match self.mode {
            Mode::Active => Mode::Idle,
            Mode::Idle => Mode::Active,
        };
        tracing::info!("Simulation mode is now {:?}", self.mode);
        self.log.push(
            NotificationKind::ModeChanged { active: self.mode == Mode::Active },
            self.world.year(),
        );
    }
}

fn notify_lookup_failure(log: &mut NotificationLog, error: &SimError, year: u32) {
    if let SimError::NationNotFound { name } = error {
        log.push(NotificationKind::LookupFailed { name: name.clone() }, year);
    }
}

/// Drive the scheduler on a wall-clock interval until `Quit`, or until
/// `max_ticks` scheduled ticks have passed. Returns the ticks scheduled.
pub async fn run(
    scheduler: &mut Scheduler,
    sink: &mut dyn FrameSink,
    store: &mut dyn SaveStore,
    mut controls: mpsc::UnboundedReceiver<Control>,
    max_ticks: Option<u64>,
) -> u64 {
    let period = Duration::from_millis(scheduler.config().scheduler.tick_interval_ms);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    let mut controls_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                scheduler.step(sink, store);
                ticks += 1;
                if max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
            control = controls.recv(), if controls_open => match control {
                Some(Control::Quit) => break,
                Some(control) => scheduler.handle(control),
                None => controls_open = false,
            },
        }
    }

    tracing::info!("Scheduler stopped after {} ticks at year {}", ticks, scheduler.world().year());
    ticks
}
