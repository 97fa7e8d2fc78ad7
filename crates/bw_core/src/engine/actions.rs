//! Agent actions and their wire encoding.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::arena::gate;
use super::types::{EntityId, Position};

/// One agent's committed action for the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { to: Position },
    /// Area push of every drone in wind range toward `to`.
    Wind { to: Position },
    /// Temporary immunity on `target` (may be the agent itself).
    Shield { target: EntityId },
    /// Force `target` to walk toward `to`.
    Control { target: EntityId, to: Position },
}

impl Action {
    /// Resource debited when the action commits.
    pub fn cost(&self) -> i32 {
        match self {
            Action::Move { .. } => 0,
            _ => gate::ABILITY_COST,
        }
    }

    pub fn is_cast(&self) -> bool {
        !matches!(self, Action::Move { .. })
    }

    /// Wind and control reopen the caster's engagement window.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Wind { .. } | Action::Control { .. })
    }
}

impl fmt::Display for Action {
    /// Exact wire grammar expected by the host:
    /// `MOVE x y` | `SPELL WIND x y` | `SPELL SHIELD id` | `SPELL CONTROL id x y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { to } => write!(f, "MOVE {} {}", to.x, to.y),
            Action::Wind { to } => write!(f, "SPELL WIND {} {}", to.x, to.y),
            Action::Shield { target } => write!(f, "SPELL SHIELD {}", target),
            Action::Control { target, to } => {
                write!(f, "SPELL CONTROL {} {} {}", target, to.x, to.y)
            }
        }
    }
}

/// One agent's decision for the turn, tagged with the rule that made it.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDecision {
    pub agent_idx: usize,
    pub action: Action,
    /// Name of the cascade rule whose assignment survived.
    pub rule: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let move_ = Action::Move {
            to: Position::new(5000, 4700),
        };
        assert_eq!(move_.to_string(), "MOVE 5000 4700");

        let wind = Action::Wind {
            to: Position::new(17630, 9000),
        };
        assert_eq!(wind.to_string(), "SPELL WIND 17630 9000");

        let shield = Action::Shield { target: 42 };
        assert_eq!(shield.to_string(), "SPELL SHIELD 42");

        let control = Action::Control {
            target: 7,
            to: Position::new(0, 0),
        };
        assert_eq!(control.to_string(), "SPELL CONTROL 7 0 0");
    }

    #[test]
    fn test_costs() {
        assert_eq!(
            Action::Move {
                to: Position::new(0, 0)
            }
            .cost(),
            0
        );
        assert_eq!(Action::Shield { target: 1 }.cost(), gate::ABILITY_COST);
        assert_eq!(
            Action::Wind {
                to: Position::new(0, 0)
            }
            .cost(),
            gate::ABILITY_COST
        );
    }

    #[test]
    fn test_aggression_classification() {
        assert!(Action::Wind {
            to: Position::new(0, 0)
        }
        .is_aggressive());
        assert!(Action::Control {
            target: 1,
            to: Position::new(0, 0)
        }
        .is_aggressive());
        assert!(!Action::Shield { target: 1 }.is_aggressive());
        assert!(!Action::Move {
            to: Position::new(0, 0)
        }
        .is_aggressive());
    }
}
