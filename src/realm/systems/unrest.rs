//! Unrest system - stability-driven decay

use rand::Rng;

use crate::core::config::UnrestPolicy;
use crate::core::types::NationId;
use crate::realm::events::NotificationKind;
use crate::realm::nation::drain;
use crate::realm::world::TickContext;

/// Apply unrest to every nation below the stability threshold.
/// Returns the number of nations affected.
pub fn apply_unrest(ctx: &mut TickContext<'_>) -> usize {
    let rules = &ctx.config.unrest;
    let mut collapsed: Vec<NationId> = Vec::new();
    let mut affected = 0;

    for nation in ctx.registry.iter_mut() {
        if nation.stability >= rules.threshold {
            continue;
        }
        affected += 1;

        let (population_loss, territory_loss) = match rules.policy {
            UnrestPolicy::PopulationDrain => {
                let loss = ctx.rng.gen_range(0.0..rules.max_population_loss);
                let before = nation.population;
                drain(&mut nation.population, loss);
                (before - nation.population, 0.0)
            }
            UnrestPolicy::TerritoryDecay => {
                let before = nation.territory;
                drain(&mut nation.territory, rules.territory_decay);
                (0.0, before - nation.territory)
            }
        };

        let is_collapsed = nation.is_collapsed();
        if is_collapsed {
            collapsed.push(nation.id);
        }

        ctx.log.push(
            NotificationKind::Unrest {
                nation: nation.id,
                name: nation.name.clone(),
                population_loss,
                territory_loss,
                collapsed: is_collapsed,
            },
            ctx.year,
        );
    }

    for id in collapsed {
        if let Some(gone) = ctx.registry.remove(id) {
            tracing::info!("{} collapsed from unrest in year {}", gone.name, ctx.year);
        }
    }

    affected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GenerationConfig, SimulationConfig};
    use crate::core::types::{Color, Vec2};
    use crate::realm::events::NotificationLog;
    use crate::realm::registry::{NationAttributes, Registry};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn registry(stabilities: &[f32], rng: &mut ChaCha8Rng) -> Registry {
        let mut registry = Registry::new();
        for (i, stability) in stabilities.iter().enumerate() {
            registry.create(
                NationAttributes {
                    name: format!("N{}", i),
                    strength: 10.0,
                    population: 200.0,
                    stability: *stability,
                    army_size: 5.0,
                    color: Color::default(),
                    ship_count: 0,
                    territory_size: None,
                },
                Vec2::new(i as f32 * 60.0, 0.0),
                &GenerationConfig::default(),
                rng,
            );
        }
        registry
    }

    #[test]
    fn test_population_drain_only_hits_unstable() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut registry = registry(&[10.0, 50.0, 20.0], &mut rng);
        let mut log = NotificationLog::new();

        let affected = apply_unrest(&mut TickContext {
            registry: &mut registry,
            rng: &mut rng,
            log: &mut log,
            config: &config,
            year: 0,
        });

        assert_eq!(affected, 1);
        let unstable = &registry.all()[0];
        assert!(unstable.population < 200.0);
        assert!(unstable.population > 100.0);
        // Threshold is strict
        assert_eq!(registry.all()[1].population, 200.0);
        assert_eq!(registry.all()[2].population, 200.0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_population_never_negative() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut registry = registry(&[0.0], &mut rng);
        registry.get_mut(NationId(1)).unwrap().population = 3.0;
        let mut log = NotificationLog::new();

        for year in 0..20 {
            apply_unrest(&mut TickContext {
                registry: &mut registry,
                rng: &mut rng,
                log: &mut log,
                config: &config,
                year,
            });
        }

        assert_eq!(registry.all()[0].population, 0.0);
    }

    #[test]
    fn test_territory_decay_eliminates_on_collapse() {
        let mut config = SimulationConfig::default();
        config.unrest.policy = UnrestPolicy::TerritoryDecay;
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut registry = registry(&[5.0, 80.0], &mut rng);
        registry.get_mut(NationId(1)).unwrap().territory = 0.2;
        let mut log = NotificationLog::new();

        for year in 0..2 {
            apply_unrest(&mut TickContext {
                registry: &mut registry,
                rng: &mut rng,
                log: &mut log,
                config: &config,
                year,
            });
        }

        assert!(registry.get(NationId(1)).is_none());
        assert_eq!(registry.len(), 1);
        let notes = log.drain();
        assert_eq!(notes.len(), 2);
        assert!(matches!(
            notes[1].kind,
            NotificationKind::Unrest { collapsed: true, .. }
        ));
    }
}
