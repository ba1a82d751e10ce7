//! Conflict resolution system
//!
//! A conflict starts whenever a ship lies strictly inside a foreign
//! footprint. Intrusions are resolved one after another in registry order
//! (attacker, ship, defender); every conflict sees the values left behind
//! by the previous one.

use crate::core::config::{ConflictConfig, DefeatPolicy};
use crate::core::types::NationId;
use crate::realm::events::{Collapse, NotificationKind};
use crate::realm::nation::{drain, Nation};
use crate::realm::world::TickContext;

/// Result of a single two-party conflict
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConflictOutcome {
    pub attacker_won: bool,
    pub loser_collapsed: bool,
}

/// Mutate both parties of one conflict. Pure given its inputs.
pub fn resolve_conflict(
    attacker: &mut Nation,
    defender: &mut Nation,
    rules: &ConflictConfig,
) -> ConflictOutcome {
    let metric = rules.metric;
    // Ties favor the defender
    let attacker_won = attacker.combat_value(metric) > defender.combat_value(metric);

    // Losses scale with the aggressor's pre-conflict numbers
    let population_loss =
        (attacker.population * rules.population_loss_ratio).min(rules.population_loss_cap);
    let army_loss = (attacker.army_size * rules.army_loss_ratio).min(rules.army_loss_cap);

    let (winner, loser) = if attacker_won {
        (attacker, defender)
    } else {
        (defender, attacker)
    };

    let loser_value = loser.combat_value_mut(metric);
    let loser_cost = *loser_value * rules.attrition;
    drain(loser_value, loser_cost);

    if rules.winner_attrition {
        let winner_value = winner.combat_value_mut(metric);
        let winner_cost = *winner_value * rules.attrition;
        drain(winner_value, winner_cost);
    }

    drain(&mut loser.population, population_loss);
    drain(&mut loser.army_size, army_loss);

    // The loser can only give up what it still holds
    let moved = rules.territory_transfer.min(loser.territory).max(0.0);
    if moved > 0.0 {
        winner.territory += moved;
        drain(&mut loser.territory, moved);
    }

    ConflictOutcome {
        attacker_won,
        loser_collapsed: loser.is_collapsed(),
    }
}

/// Resolve every intrusion present this tick. Returns the conflict count.
pub fn resolve_conflicts(ctx: &mut TickContext<'_>) -> usize {
    let base_unit = ctx.config.map.base_unit;
    let mut conflicts = 0;

    for attacker_id in ctx.registry.ids() {
        let ship_count = match ctx.registry.get(attacker_id) {
            Some(nation) => nation.ships.len(),
            None => continue,
        };

        'ships: for ship_index in 0..ship_count {
            for defender_id in ctx.registry.ids() {
                if defender_id == attacker_id {
                    continue;
                }

                let Some(attacker) = ctx.registry.get(attacker_id) else {
                    break 'ships;
                };
                let Some(ship) = attacker.ships.get(ship_index) else {
                    break 'ships;
                };
                let intrudes = ctx
                    .registry
                    .get(defender_id)
                    .is_some_and(|d| d.footprint(base_unit).contains_strict(ship.position()));

                if intrudes {
                    engage(ctx, attacker_id, defender_id);
                    conflicts += 1;
                }
            }
        }
    }

    if conflicts > 0 {
        tracing::debug!("Resolved {} conflicts in year {}", conflicts, ctx.year);
    }

    conflicts
}

fn engage(ctx: &mut TickContext<'_>, attacker_id: NationId, defender_id: NationId) {
    let rules = &ctx.config.conflict;
    let Some((attacker, defender)) = ctx.registry.pair_mut(attacker_id, defender_id) else {
        return;
    };

    let attacker_name = attacker.name.clone();
    let defender_name = defender.name.clone();
    let territory_before = (attacker.territory, defender.territory);
    let outcome = resolve_conflict(attacker, defender, rules);

    let (winner, loser, loser_territory) = if outcome.attacker_won {
        (attacker_id, defender_id, territory_before.1)
    } else {
        (defender_id, attacker_id, territory_before.0)
    };

    let collapse = if outcome.loser_collapsed {
        Some(settle_defeat(ctx, winner, loser, loser_territory))
    } else {
        None
    };

    ctx.log.push(
        NotificationKind::Conflict {
            attacker: attacker_id,
            attacker_name,
            defender: defender_id,
            defender_name,
            attacker_won: outcome.attacker_won,
            collapse,
        },
        ctx.year,
    );
}

/// `loser_territory` is what the loser held before the deciding conflict;
/// all of it has reached the victor once absorption completes.
fn settle_defeat(
    ctx: &mut TickContext<'_>,
    winner: NationId,
    loser: NationId,
    loser_territory: f32,
) -> Collapse {
    match ctx.config.conflict.defeat {
        DefeatPolicy::Eliminate => {
            if let Some(gone) = ctx.registry.remove(loser) {
                tracing::info!("{} was eliminated in year {}", gone.name, ctx.year);
            }
            Collapse::Eliminated
        }
        DefeatPolicy::Absorb => {
            let remainder = ctx.registry.absorb(winner, loser).unwrap_or(0.0);
            let territory = loser_territory.max(remainder);
            let victor_name = ctx
                .registry
                .get(winner)
                .map(|n| n.name.clone())
                .unwrap_or_default();
            tracing::info!("{} absorbed a rival in year {}", victor_name, ctx.year);
            Collapse::AbsorbedBy { victor: winner, victor_name, territory }
        }
    }
}
