//! Notifications emitted by the simulation
//!
//! Each notification carries structured data plus a human-readable
//! rendering through `Display`. Delivery and display timing belong to
//! whoever drains the log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::NationId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub year: u32,
    pub kind: NotificationKind,
}

/// What happened to a defeated or collapsing nation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Collapse {
    Eliminated,
    AbsorbedBy { victor: NationId, victor_name: String, territory: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NotificationKind {
    Unrest {
        nation: NationId,
        name: String,
        population_loss: f32,
        territory_loss: f32,
        collapsed: bool,
    },
    Conflict {
        attacker: NationId,
        attacker_name: String,
        defender: NationId,
        defender_name: String,
        attacker_won: bool,
        collapse: Option<Collapse>,
    },
    NationCreated { nation: NationId, name: String },
    NationEdited { nation: NationId, name: String },
    LookupFailed { name: String },
    NoSpace { name: String },
    ModeChanged { active: bool },
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Unrest { name, population_loss, territory_loss, collapsed, .. } => {
                write!(f, "Unrest broke out in {}", name)?;
                if *population_loss > 0.0 {
                    write!(f, "; population fell by {:.1}", population_loss)?;
                }
                if *territory_loss > 0.0 {
                    write!(f, "; territory shrank by {:.2}", territory_loss)?;
                }
                if *collapsed {
                    write!(f, "; {} has collapsed", name)?;
                }
                Ok(())
            }
            NotificationKind::Conflict {
                attacker_name,
                defender_name,
                attacker_won,
                collapse,
                ..
            } => {
                let (winner, loser) = if *attacker_won {
                    (attacker_name, defender_name)
                } else {
                    (defender_name, attacker_name)
                };
                write!(
                    f,
                    "{} went to war with {}; {} prevailed and {} lost strength and population",
                    attacker_name, defender_name, winner, loser
                )?;
                match collapse {
                    Some(Collapse::Eliminated) => write!(f, "; {} was destroyed", loser),
                    Some(Collapse::AbsorbedBy { victor_name, .. }) => {
                        write!(f, "; {} was absorbed by {}", loser, victor_name)
                    }
                    None => Ok(()),
                }
            }
            NotificationKind::NationCreated { name, .. } => write!(f, "{} was founded", name),
            NotificationKind::NationEdited { name, .. } => write!(f, "{} was edited", name),
            NotificationKind::LookupFailed { name } => write!(f, "No nation named {} exists", name),
            NotificationKind::NoSpace { name } => {
                write!(f, "No space left on the map to found {}", name)
            }
            NotificationKind::ModeChanged { active: true } => write!(f, "Simulation resumed"),
            NotificationKind::ModeChanged { active: false } => write!(f, "Simulation paused"),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[year {}] {}", self.year, self.kind)
    }
}

/// Pending notifications awaiting a collaborator
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotificationLog {
    pending: Vec<Notification>,
    next_id: u32,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, year: u32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        tracing::debug!("{}", kind);
        self.pending.push(Notification { id, year, kind });

        id
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Hand every pending notification to the caller
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_sides() {
        let kind = NotificationKind::Conflict {
            attacker: NationId(1),
            attacker_name: "Kasa".to_string(),
            defender: NationId(2),
            defender_name: "Moru".to_string(),
            attacker_won: false,
            collapse: Some(Collapse::Eliminated),
        };
        let text = kind.to_string();
        assert!(text.contains("Kasa"));
        assert!(text.contains("Moru prevailed"));
        assert!(text.ends_with("Kasa was destroyed"));
    }

    #[test]
    fn test_log_drain_empties() {
        let mut log = NotificationLog::new();
        log.push(NotificationKind::LookupFailed { name: "X".into() }, 3);
        log.push(NotificationKind::NationCreated { nation: NationId(4), name: "Y".into() }, 3);

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].id, 1);
        assert!(log.is_empty());
    }
}
