//! Spatial placement of new nations
//!
//! Rejection sampling bounded by `map.placement_attempts`, followed by a
//! deterministic grid scan. A saturated map yields `NoSpaceAvailable`
//! instead of looping forever.

use rand::Rng;

use crate::core::config::MapConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Footprint, Vec2};
use crate::realm::nation::Nation;

/// Find an anchor whose base footprint overlaps no existing footprint
pub fn find_position<R: Rng>(nations: &[Nation], map: &MapConfig, rng: &mut R) -> Result<Vec2> {
    let size = map.base_unit;
    let max_x = map.width - size;
    let max_y = map.height - size;
    if max_x < 0.0 || max_y < 0.0 {
        return Err(SimError::NoSpaceAvailable { attempts: 0 });
    }

    for _ in 0..map.placement_attempts {
        let candidate = Vec2::new(rng.gen_range(0.0..=max_x), rng.gen_range(0.0..=max_y));
        if is_free(candidate, nations, map) {
            return Ok(candidate);
        }
    }

    let (found, scanned) = grid_scan(nations, map);
    match found {
        Some(position) => {
            tracing::debug!("Random placement exhausted; grid scan found {:?}", position);
            Ok(position)
        }
        None => Err(SimError::NoSpaceAvailable {
            attempts: map.placement_attempts + scanned,
        }),
    }
}

/// True when a base footprint anchored at `candidate` touches no nation
pub fn is_free(candidate: Vec2, nations: &[Nation], map: &MapConfig) -> bool {
    let footprint = Footprint::new(candidate, map.base_unit);
    !nations
        .iter()
        .any(|n| footprint.overlaps(&n.footprint(map.base_unit)))
}

fn grid_scan(nations: &[Nation], map: &MapConfig) -> (Option<Vec2>, u32) {
    let step = map.base_unit / 2.0;
    let max_x = map.width - map.base_unit;
    let max_y = map.height - map.base_unit;
    let mut scanned = 0;

    let mut y = 0.0;
    while y <= max_y {
        let mut x = 0.0;
        while x <= max_x {
            scanned += 1;
            let candidate = Vec2::new(x, y);
            if is_free(candidate, nations, map) {
                return (Some(candidate), scanned);
            }
            x += step;
        }
        y += step;
    }

    (None, scanned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, NationId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn block(x: f32, y: f32, territory: f32) -> Nation {
        Nation {
            id: NationId(1),
            name: "Block".to_string(),
            position: Vec2::new(x, y),
            strength: 1.0,
            population: 1.0,
            stability: 50.0,
            army_size: 0.0,
            territory,
            territory_size: None,
            color: Color::default(),
            exclaves: vec![],
            ships: vec![],
        }
    }

    fn small_map(attempts: u32) -> MapConfig {
        MapConfig {
            width: 200.0,
            height: 100.0,
            base_unit: 50.0,
            placement_attempts: attempts,
        }
    }

    #[test]
    fn test_empty_map_accepts_first_draw() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let map = MapConfig::default();
        let pos = find_position(&[], &map, &mut rng).unwrap();
        assert!(pos.x >= 0.0 && pos.x <= map.width - map.base_unit);
        assert!(pos.y >= 0.0 && pos.y <= map.height - map.base_unit);
    }

    #[test]
    fn test_grid_scan_finds_the_last_gap() {
        // Left 150 units fully covered; only x = 150 fits
        let nations = vec![block(0.0, 0.0, 2.0), block(100.0, 0.0, 1.0), block(100.0, 50.0, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let pos = find_position(&nations, &small_map(0), &mut rng).unwrap();
        assert_eq!(pos, Vec2::new(150.0, 0.0));
        assert!(is_free(pos, &nations, &small_map(0)));
    }

    #[test]
    fn test_saturated_map_reports_no_space() {
        let nations = vec![block(0.0, 0.0, 4.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = find_position(&nations, &small_map(100), &mut rng).unwrap_err();
        match err {
            SimError::NoSpaceAvailable { attempts } => assert!(attempts > 100),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_grown_territory_is_respected() {
        // Candidate footprint is base-sized but the existing one has grown
        let nations = vec![block(0.0, 0.0, 3.0)];
        let map = small_map(0);
        assert!(!is_free(Vec2::new(120.0, 40.0), &nations, &map));
        assert!(is_free(Vec2::new(150.0, 40.0), &nations, &map));
    }
}
