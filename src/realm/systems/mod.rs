//! Simulation systems

pub mod conflict;
mod generation;
mod mobility;
pub mod placement;
mod unrest;

pub use conflict::{resolve_conflict, resolve_conflicts, ConflictOutcome};
pub use generation::{found_nation, generate_nations, random_attributes};
pub use mobility::move_ships;
pub use placement::find_position;
pub use unrest::apply_unrest;
