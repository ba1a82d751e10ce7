//! World generation - randomized nations on an empty map

use rand::Rng;

use crate::core::config::{GenerationConfig, SimulationConfig};
use crate::core::error::{Result, SimError};
use crate::core::types::{Color, NationId};
use crate::realm::names::random_name;
use crate::realm::registry::{NationAttributes, Registry};
use crate::realm::systems::placement::find_position;

/// Randomized starting attributes
pub fn random_attributes<R: Rng>(generation: &GenerationConfig, rng: &mut R) -> NationAttributes {
    NationAttributes {
        name: random_name(rng),
        strength: rng.gen_range(1.0..101.0),
        population: rng.gen_range(100.0..1100.0),
        stability: rng.gen_range(0.0..100.0),
        army_size: rng.gen_range(10.0..110.0),
        color: Color::rgb(rng.gen(), rng.gen(), rng.gen()),
        ship_count: generation.ships_per_nation,
        territory_size: None,
    }
}

/// Place and register one nation
pub fn found_nation<R: Rng>(
    registry: &mut Registry,
    attributes: NationAttributes,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<NationId> {
    let position = find_position(registry.all(), &config.map, rng)?;
    Ok(registry.create(attributes, position, &config.generation, rng))
}

/// Fill an empty registry with `generation.nation_count` random nations.
/// Stops early, keeping what was placed, if the map fills up.
pub fn generate_nations<R: Rng>(config: &SimulationConfig, rng: &mut R) -> Registry {
    let mut registry = Registry::new();

    for _ in 0..config.generation.nation_count {
        let attributes = random_attributes(&config.generation, rng);
        match found_nation(&mut registry, attributes, config, rng) {
            Ok(_) => {}
            Err(SimError::NoSpaceAvailable { attempts }) => {
                tracing::warn!(
                    "Map full after {} nations ({} placement attempts)",
                    registry.len(),
                    attempts
                );
                break;
            }
            Err(e) => {
                tracing::warn!("Failed to generate nation: {}", e);
                break;
            }
        }
    }

    tracing::info!("Generated {} nations", registry.len());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generates_configured_count_without_overlap() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let registry = generate_nations(&config, &mut rng);

        assert_eq!(registry.len(), 10);
        let nations = registry.all();
        for (i, a) in nations.iter().enumerate() {
            assert_eq!(a.ships.len(), 3);
            assert!((1.0..101.0).contains(&a.strength));
            assert!((100.0..1100.0).contains(&a.population));
            for b in &nations[i + 1..] {
                assert!(!a.footprint(50.0).overlaps(&b.footprint(50.0)));
            }
        }
    }

    #[test]
    fn test_generation_stops_when_map_is_full() {
        let mut config = SimulationConfig::default();
        config.map.width = 120.0;
        config.map.height = 60.0;
        config.map.placement_attempts = 50;
        config.generation.nation_count = 10;
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let registry = generate_nations(&config, &mut rng);

        assert!(!registry.is_empty());
        assert!(registry.len() <= 2);
    }
}
