//! Lenient reconstruction of a registry from saved JSON
//!
//! Every field is read on its own. Missing or malformed fields fall back
//! to generation defaults so one damaged record never aborts the load.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::config::SimulationConfig;
use crate::core::types::{Color, NationId, Vec2};
use crate::realm::nation::{Exclave, Nation, Ship, STABILITY_MAX, STABILITY_MIN, TERRITORY_EPSILON};
use crate::realm::registry::{generate_exclave, spawn_ship, Registry};
use crate::realm::systems::{find_position, random_attributes};

/// Rebuild the registry and year from a saved document.
/// Returns `None` when the document holds no nation list at all.
pub fn restore<R: Rng>(
    document: &Value,
    config: &SimulationConfig,
    rng: &mut R,
) -> Option<(Registry, u32)> {
    let nations = document.get("nations")?.as_array()?;
    let year = document
        .get("year")
        .and_then(Value::as_u64)
        .and_then(|y| u32::try_from(y).ok())
        .unwrap_or(0);

    let mut registry = Registry::new();
    for (index, entry) in nations.iter().enumerate() {
        let Some(record) = entry.as_object() else {
            tracing::warn!("Skipping saved nation #{}: not an object", index);
            continue;
        };
        if let Some(nation) = restore_nation(record, &registry, config, rng) {
            registry.insert(nation);
        }
    }

    Some((registry, year))
}

fn restore_nation<R: Rng>(
    record: &Map<String, Value>,
    registry: &Registry,
    config: &SimulationConfig,
    rng: &mut R,
) -> Option<Nation> {
    let defaults = random_attributes(&config.generation, rng);

    let territory = field::<f32>(record, "territory").unwrap_or(1.0);
    if territory <= TERRITORY_EPSILON {
        tracing::warn!("Skipping saved nation with collapsed territory");
        return None;
    }

    let position = match (field::<f32>(record, "x"), field::<f32>(record, "y")) {
        (Some(x), Some(y)) => Vec2::new(x, y),
        _ => match find_position(registry.all(), &config.map, rng) {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("Skipping saved nation without position: {}", e);
                return None;
            }
        },
    };

    let exclaves = field::<Vec<Exclave>>(record, "exclaves")
        .unwrap_or_else(|| vec![generate_exclave(position, &config.generation, rng)]);
    let ships = field::<Vec<Ship>>(record, "ships").unwrap_or_else(|| {
        (0..config.generation.ships_per_nation)
            .map(|_| spawn_ship(position, &config.generation, rng))
            .collect()
    });

    Some(Nation {
        id: NationId(field::<u32>(record, "id").unwrap_or(0)),
        name: field::<String>(record, "name")
            .filter(|n| !n.is_empty())
            .unwrap_or(defaults.name),
        position,
        strength: field::<f32>(record, "strength").unwrap_or(defaults.strength).max(0.0),
        population: field::<f32>(record, "population")
            .unwrap_or(defaults.population)
            .max(0.0),
        stability: field::<f32>(record, "peaceLevel")
            .unwrap_or(defaults.stability)
            .clamp(STABILITY_MIN, STABILITY_MAX),
        army_size: field::<f32>(record, "armySize").unwrap_or(defaults.army_size).max(0.0),
        territory,
        territory_size: field::<f32>(record, "territorySize").filter(|s| *s > 0.0),
        color: field::<Color>(record, "color").unwrap_or(defaults.color),
        exclaves,
        ships,
    })
}

/// Read one field, treating type mismatches like absence
fn field<T: DeserializeOwned>(record: &Map<String, Value>, key: &str) -> Option<T> {
    record
        .get(key)
        .filter(|v| !v.is_null())
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    #[test]
    fn test_missing_nation_list_means_no_save() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = SimulationConfig::default();
        assert!(restore(&json!({"year": 4}), &config, &mut rng).is_none());
        assert!(restore(&json!({"nations": "oops"}), &config, &mut rng).is_none());
    }

    #[test]
    fn test_fields_fall_back_one_by_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = SimulationConfig::default();
        let document = json!({
            "year": 12,
            "nations": [
                {
                    "name": "Tesa",
                    "x": 10.0,
                    "y": 20.0,
                    "strength": "strong",
                    "population": -40.0,
                    "peaceLevel": 250.0,
                    "ships": []
                },
                42,
                { "territory": 0.0, "name": "Gone" }
            ]
        });

        let (registry, year) = restore(&document, &config, &mut rng).unwrap();

        assert_eq!(year, 12);
        assert_eq!(registry.len(), 1);
        let nation = &registry.all()[0];
        assert_eq!(nation.name, "Tesa");
        assert_eq!(nation.position, Vec2::new(10.0, 20.0));
        assert!((1.0..101.0).contains(&nation.strength));
        assert_eq!(nation.population, 0.0);
        assert_eq!(nation.stability, 100.0);
        assert_eq!(nation.territory, 1.0);
        assert_eq!(nation.exclaves.len(), 1);
        assert!(nation.ships.is_empty());
        assert_eq!(nation.id, NationId(1));
    }

    #[test]
    fn test_saved_id_without_successor_is_reassigned() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = SimulationConfig::default();
        let document = json!({
            "nations": [
                { "id": 4294967295u32, "name": "A", "x": 10.0, "y": 10.0 },
                { "name": "B", "x": 300.0, "y": 300.0 }
            ]
        });

        let (registry, _) = restore(&document, &config, &mut rng).unwrap();

        assert_eq!(registry.ids(), vec![NationId(1), NationId(2)]);
        assert_eq!(registry.find_by_name("A").unwrap().id, NationId(1));
    }

    #[test]
    fn test_missing_position_is_placed() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = SimulationConfig::default();
        let document = json!({ "nations": [ { "name": "Drift" } ] });

        let (registry, _) = restore(&document, &config, &mut rng).unwrap();

        let nation = &registry.all()[0];
        assert!(nation.position.x <= config.map.width - config.map.base_unit);
        assert_eq!(nation.ships.len(), config.generation.ships_per_nation as usize);
    }
}
