//! Registry - owns the live set of nations

use rand::Rng;

use crate::core::config::GenerationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Color, NationId, Vec2};
use crate::realm::nation::{Exclave, Nation, Ship};

/// Attributes a new nation starts from; position is chosen separately
#[derive(Clone, Debug)]
pub struct NationAttributes {
    pub name: String,
    pub strength: f32,
    pub population: f32,
    pub stability: f32,
    pub army_size: f32,
    pub color: Color,
    pub ship_count: u32,
    pub territory_size: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    nations: Vec<Nation>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self { nations: Vec::new(), next_id: 1 }
    }

    /// Build a nation at `position` with one exclave and `ship_count` ships
    pub fn create<R: Rng>(
        &mut self,
        attributes: NationAttributes,
        position: Vec2,
        generation: &GenerationConfig,
        rng: &mut R,
    ) -> NationId {
        let id = self.next_nation_id();

        let exclave = generate_exclave(position, generation, rng);
        let ships = (0..attributes.ship_count)
            .map(|_| spawn_ship(position, generation, rng))
            .collect();

        self.nations.push(Nation {
            id,
            name: attributes.name,
            position,
            strength: attributes.strength.max(0.0),
            population: attributes.population.max(0.0),
            stability: attributes.stability,
            army_size: attributes.army_size.max(0.0),
            territory: 1.0,
            territory_size: attributes.territory_size,
            color: attributes.color,
            exclaves: vec![exclave],
            ships,
        });

        id
    }

    /// Insert an already-built nation, keeping its id unless it is 0, taken,
    /// or has no successor
    pub fn insert(&mut self, mut nation: Nation) -> NationId {
        match nation.id.0.checked_add(1) {
            Some(successor) if nation.id.0 != 0 && self.get(nation.id).is_none() => {
                self.next_id = self.next_id.max(successor);
            }
            _ => nation.id = self.next_nation_id(),
        }
        let id = nation.id;
        self.nations.push(nation);
        id
    }

    pub fn remove(&mut self, id: NationId) -> Option<Nation> {
        let index = self.index_of(id)?;
        Some(self.nations.remove(index))
    }

    pub fn all(&self) -> &[Nation] {
        &self.nations
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Nation> {
        self.nations.iter_mut()
    }

    /// Ids in iteration order
    pub fn ids(&self) -> Vec<NationId> {
        self.nations.iter().map(|n| n.id).collect()
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }

    pub fn get(&self, id: NationId) -> Option<&Nation> {
        self.nations.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NationId) -> Option<&mut Nation> {
        self.nations.iter_mut().find(|n| n.id == id)
    }

    /// First nation carrying `name`; names are not unique
    pub fn find_by_name(&self, name: &str) -> Result<&Nation> {
        self.nations
            .iter()
            .find(|n| n.name == name)
            .ok_or_else(|| SimError::NationNotFound { name: name.to_string() })
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Result<&mut Nation> {
        self.nations
            .iter_mut()
            .find(|n| n.name == name)
            .ok_or_else(|| SimError::NationNotFound { name: name.to_string() })
    }

    /// Disjoint mutable access to two different nations
    pub fn pair_mut(&mut self, a: NationId, b: NationId) -> Option<(&mut Nation, &mut Nation)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (left, right) = self.nations.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.nations.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    /// Fold `loser` into `winner`: territory value and exclaves move over,
    /// the loser disappears. Returns the territory transferred.
    pub fn absorb(&mut self, winner: NationId, loser: NationId) -> Option<f32> {
        if winner == loser || self.get(winner).is_none() {
            return None;
        }
        let absorbed = self.remove(loser)?;
        let transferred = absorbed.territory.max(0.0);

        let victor = self.get_mut(winner)?;
        victor.territory += transferred;
        victor.exclaves.extend(absorbed.exclaves);

        Some(transferred)
    }

    fn index_of(&self, id: NationId) -> Option<usize> {
        self.nations.iter().position(|n| n.id == id)
    }

    /// Next unused id, wrapping past `u32::MAX` and never yielding 0
    fn next_nation_id(&mut self) -> NationId {
        let mut candidate = self.next_id.max(1);
        while self.get(NationId(candidate)).is_some() {
            candidate = candidate.wrapping_add(1).max(1);
        }
        self.next_id = candidate.wrapping_add(1).max(1);
        NationId(candidate)
    }
}

pub fn generate_exclave<R: Rng>(anchor: Vec2, generation: &GenerationConfig, rng: &mut R) -> Exclave {
    let spread = generation.exclave_spread;
    Exclave {
        x: anchor.x + rng.gen_range(-spread..=spread),
        y: anchor.y + rng.gen_range(-spread..=spread),
    }
}

pub fn spawn_ship<R: Rng>(anchor: Vec2, generation: &GenerationConfig, rng: &mut R) -> Ship {
    let spread = generation.ship_spread;
    let mut ship = Ship::at(Vec2::new(
        anchor.x + rng.gen_range(-spread..=spread),
        anchor.y + rng.gen_range(-spread..=spread),
    ));

    if generation.ship_speed > 0.0 {
        let heading: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
        ship.velocity = Some(Vec2::new(
            heading.cos() * generation.ship_speed,
            heading.sin() * generation.ship_speed,
        ));
    }

    ship
}
