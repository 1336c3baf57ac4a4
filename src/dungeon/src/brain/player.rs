use combat::SimRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    ActionKind, Actor, Level, Locatable,
    brain::{Brain, BrainKind},
};

/// Symbolic player commands, decoupled from physical keys.
#[derive(
    Debug, Display, EnumString, EnumIter, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InputCode {
    MoveNorth,
    MoveNorthEast,
    MoveEast,
    MoveSouthEast,
    MoveSouth,
    MoveSouthWest,
    MoveWest,
    MoveNorthWest,
    Idle,
    Pickup,
    UseStairs,
}

impl InputCode {
    /// Offset for the eight movement codes.
    pub fn direction(self) -> Option<(i32, i32)> {
        match self {
            InputCode::MoveNorth => Some((0, -1)),
            InputCode::MoveNorthEast => Some((1, -1)),
            InputCode::MoveEast => Some((1, 0)),
            InputCode::MoveSouthEast => Some((1, 1)),
            InputCode::MoveSouth => Some((0, 1)),
            InputCode::MoveSouthWest => Some((-1, 1)),
            InputCode::MoveWest => Some((-1, 0)),
            InputCode::MoveNorthWest => Some((-1, -1)),
            InputCode::Idle | InputCode::Pickup | InputCode::UseStairs => None,
        }
    }
}

/// Turns the pending input code into an action.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerBrain;

impl Brain for PlayerBrain {
    fn kind(&self) -> BrainKind {
        BrainKind::Player
    }

    fn decide(
        &mut self,
        actor: &Actor,
        level: &Level,
        input: Option<InputCode>,
        _rng: &mut SimRng,
    ) -> Option<ActionKind> {
        let code = input?;
        let pos = actor.position();

        if let Some((dx, dy)) = code.direction() {
            let target = pos.offset(dx, dy);
            let map = level.map();
            if map.is_passable(target.x, target.y) {
                return Some(ActionKind::Move { dx, dy });
            }
            if map.cell(target.x, target.y).is_some_and(|c| c.has_actors()) {
                return Some(ActionKind::Attack {
                    x: target.x,
                    y: target.y,
                });
            }
            return None;
        }

        match code {
            InputCode::Idle => Some(ActionKind::Idle),
            InputCode::Pickup => Some(ActionKind::Pickup),
            InputCode::UseStairs => level
                .map()
                .cell(pos.x, pos.y)
                .and_then(|cell| cell.stairs())
                .map(|_| ActionKind::UseStairs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_parse_from_names() {
        assert_eq!(InputCode::from_str("move_north_east"), Ok(InputCode::MoveNorthEast));
        assert_eq!(InputCode::UseStairs.to_string(), "use_stairs");
        assert!(InputCode::from_str("jump").is_err());
    }

    #[test]
    fn test_eight_distinct_directions() {
        let dirs: std::collections::HashSet<_> =
            InputCode::iter().filter_map(InputCode::direction).collect();
        assert_eq!(dirs.len(), 8);
        assert!(!dirs.contains(&(0, 0)));
    }
}
