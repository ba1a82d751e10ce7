//! Ship movement system

use rand::Rng;

use crate::core::config::{MapConfig, MobilityConfig};
use crate::core::types::{NationId, Vec2};
use crate::realm::nation::Ship;
use crate::realm::world::TickContext;

/// Move every ship of every nation one step
pub fn move_ships(ctx: &mut TickContext<'_>) {
    let anchors: Vec<(NationId, Vec2)> = ctx
        .registry
        .all()
        .iter()
        .map(|n| (n.id, n.position))
        .collect();
    let rules = &ctx.config.mobility;
    let map = &ctx.config.map;

    for nation in ctx.registry.iter_mut() {
        let owner = nation.id;
        for ship in nation.ships.iter_mut() {
            match nearest_foreign_anchor(ship.position(), owner, &anchors, rules.homing_radius) {
                Some(target) => home_toward(ship, target, rules.homing_step),
                None => drift(ship, rules, ctx.rng),
            }
            keep_in_bounds(ship, map);
        }
    }
}

/// Closest anchor of another nation within `radius`
fn nearest_foreign_anchor(
    position: Vec2,
    owner: NationId,
    anchors: &[(NationId, Vec2)],
    radius: f32,
) -> Option<Vec2> {
    anchors
        .iter()
        .filter(|(id, _)| *id != owner)
        .map(|(_, anchor)| (position.distance(anchor), *anchor))
        .filter(|(distance, _)| *distance <= radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, anchor)| anchor)
}

/// Fixed step toward the target on each axis independently
fn home_toward(ship: &mut Ship, target: Vec2, step: f32) {
    ship.x += axis_step(target.x - ship.x, step);
    ship.y += axis_step(target.y - ship.y, step);
}

fn axis_step(delta: f32, step: f32) -> f32 {
    if delta > 0.0 {
        step
    } else if delta < 0.0 {
        -step
    } else {
        0.0
    }
}

fn drift<R: Rng>(ship: &mut Ship, rules: &MobilityConfig, rng: &mut R) {
    match ship.velocity {
        Some(velocity) => {
            ship.x += velocity.x;
            ship.y += velocity.y;
        }
        None if rules.wander > 0.0 => {
            ship.x += rng.gen_range(-rules.wander..=rules.wander);
            ship.y += rng.gen_range(-rules.wander..=rules.wander);
        }
        None => {}
    }
}

/// Velocity-bearing ships bounce off the edges; the rest are clamped
fn keep_in_bounds(ship: &mut Ship, map: &MapConfig) {
    match ship.velocity.as_mut() {
        Some(velocity) => {
            reflect_axis(&mut ship.x, &mut velocity.x, map.width);
            reflect_axis(&mut ship.y, &mut velocity.y, map.height);
        }
        None => {
            ship.x = ship.x.clamp(0.0, map.width);
            ship.y = ship.y.clamp(0.0, map.height);
        }
    }
}

fn reflect_axis(position: &mut f32, velocity: &mut f32, max: f32) {
    if *position < 0.0 {
        *position = -*position;
        *velocity = -*velocity;
    } else if *position > max {
        *position = 2.0 * max - *position;
        *velocity = -*velocity;
    }
    // A step longer than the map itself still ends up inside
    *position = position.clamp(0.0, max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::Color;
    use crate::realm::events::NotificationLog;
    use crate::realm::nation::Nation;
    use crate::realm::registry::Registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn nation(id: u32, position: Vec2, ships: Vec<Ship>) -> Nation {
        Nation {
            id: NationId(id),
            name: format!("N{}", id),
            position,
            strength: 10.0,
            population: 100.0,
            stability: 50.0,
            army_size: 0.0,
            territory: 1.0,
            territory_size: None,
            color: Color::default(),
            exclaves: vec![],
            ships,
        }
    }

    fn step(registry: &mut Registry, config: &SimulationConfig, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut log = NotificationLog::new();
        move_ships(&mut TickContext {
            registry,
            rng: &mut rng,
            log: &mut log,
            config,
            year: 0,
        });
    }

    #[test]
    fn test_ship_homes_toward_nearby_foreigner() {
        let config = SimulationConfig::default();
        let mut registry = Registry::new();
        registry.insert(nation(1, Vec2::new(0.0, 0.0), vec![Ship::at(Vec2::new(300.0, 300.0))]));
        registry.insert(nation(2, Vec2::new(360.0, 280.0), vec![]));

        step(&mut registry, &config, 1);

        let ship = registry.all()[0].ships[0];
        assert_eq!(ship.position(), Vec2::new(305.0, 295.0));
    }

    #[test]
    fn test_ship_picks_nearest_target_and_ignores_owner() {
        let config = SimulationConfig::default();
        let mut registry = Registry::new();
        // Owner anchor is closest but must be ignored
        registry.insert(nation(1, Vec2::new(500.0, 500.0), vec![Ship::at(Vec2::new(500.0, 500.0))]));
        registry.insert(nation(2, Vec2::new(580.0, 500.0), vec![]));
        registry.insert(nation(3, Vec2::new(450.0, 500.0), vec![]));

        step(&mut registry, &config, 2);

        let ship = registry.all()[0].ships[0];
        assert_eq!(ship.position(), Vec2::new(495.0, 500.0));
    }

    #[test]
    fn test_lonely_ship_wanders_within_amplitude() {
        let config = SimulationConfig::default();
        let mut registry = Registry::new();
        registry.insert(nation(1, Vec2::new(0.0, 0.0), vec![Ship::at(Vec2::new(400.0, 400.0))]));
        registry.insert(nation(2, Vec2::new(900.0, 700.0), vec![]));

        step(&mut registry, &config, 3);

        let ship = registry.all()[0].ships[0];
        assert!((ship.x - 400.0).abs() <= 2.0);
        assert!((ship.y - 400.0).abs() <= 2.0);
    }

    #[test]
    fn test_velocity_ship_reflects_at_edge() {
        let config = SimulationConfig::default();
        let mut registry = Registry::new();
        let mut ship = Ship::at(Vec2::new(997.0, 400.0));
        ship.velocity = Some(Vec2::new(5.0, 0.0));
        registry.insert(nation(1, Vec2::new(0.0, 0.0), vec![ship]));

        step(&mut registry, &config, 4);

        let ship = registry.all()[0].ships[0];
        assert_eq!(ship.x, 998.0);
        assert_eq!(ship.velocity, Some(Vec2::new(-5.0, 0.0)));
    }

    #[test]
    fn test_velocityless_ship_is_clamped() {
        let mut config = SimulationConfig::default();
        config.mobility.wander = 0.0;
        let mut registry = Registry::new();
        registry.insert(nation(1, Vec2::new(0.0, 0.0), vec![Ship::at(Vec2::new(-12.0, 900.0))]));

        step(&mut registry, &config, 5);

        let ship = registry.all()[0].ships[0];
        assert_eq!(ship.position(), Vec2::new(0.0, 800.0));
    }
}
