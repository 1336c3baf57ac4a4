use std::collections::HashSet;

use combat::SimRng;

use crate::{
    ActionKind, Actor, Level, Locatable, Pathfinder, Position,
    brain::{Brain, BrainKind, InputCode},
};

/// Default monster brain: engage, approach, then explore.
#[derive(Debug, Default)]
pub struct RogueBrain {
    /// Cells this brain has already picked as exploration targets.
    explored: HashSet<Position>,
}

impl RogueBrain {
    fn explore(
        &mut self,
        actor: &Actor,
        level: &Level,
        seen: &[Position],
        rng: &mut SimRng,
    ) -> ActionKind {
        let fresh = seen
            .iter()
            .copied()
            .find(|p| level.map().is_passable(p.x, p.y) && !self.explored.contains(p));
        let target = match fresh {
            Some(p) => {
                self.explored.insert(p);
                p
            }
            None => match rng.choose(seen) {
                Some(&p) => p,
                None => return ActionKind::Idle,
            },
        };
        step_towards(actor, level, target).unwrap_or(ActionKind::Idle)
    }
}

impl Brain for RogueBrain {
    fn kind(&self) -> BrainKind {
        BrainKind::Rogue
    }

    fn decide(
        &mut self,
        actor: &Actor,
        level: &Level,
        _input: Option<InputCode>,
        rng: &mut SimRng,
    ) -> Option<ActionKind> {
        let seen = level.map().visible_cells(actor.position(), actor.fov_range);
        if seen.is_empty() {
            return Some(ActionKind::Idle);
        }
        if let Some(action) = pursue_player(actor, level, &seen) {
            return Some(action);
        }
        Some(self.explore(actor, level, &seen, rng))
    }
}

/// Shambles at random until it sees the player; keeps no memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZombieBrain;

impl Brain for ZombieBrain {
    fn kind(&self) -> BrainKind {
        BrainKind::Zombie
    }

    fn decide(
        &mut self,
        actor: &Actor,
        level: &Level,
        _input: Option<InputCode>,
        rng: &mut SimRng,
    ) -> Option<ActionKind> {
        let seen = level.map().visible_cells(actor.position(), actor.fov_range);
        if let Some(action) = pursue_player(actor, level, &seen) {
            return Some(action);
        }
        let action = rng
            .choose(&seen)
            .and_then(|&target| step_towards(actor, level, target));
        Some(action.unwrap_or(ActionKind::Idle))
    }
}

/// Attack a visible player in range, otherwise close in on it.
/// `None` when no player is visible.
fn pursue_player(actor: &Actor, level: &Level, seen: &[Position]) -> Option<ActionKind> {
    let player = seen.iter().copied().find(|p| {
        level.actors_at(p.x, p.y).any(|other| other.is_player() && other.id() != actor.id())
    })?;

    let range = actor.stats.attack_range as usize;
    if Pathfinder::shortest_dist(actor.position(), player) <= range {
        return Some(ActionKind::Attack {
            x: player.x,
            y: player.y,
        });
    }
    Some(step_towards(actor, level, player).unwrap_or(ActionKind::Idle))
}

/// One step along the obstacle-aware path, or `None` if there is none.
fn step_towards(actor: &Actor, level: &Level, target: Position) -> Option<ActionKind> {
    let from = actor.position();
    let path = level.path_for(actor.id(), target);
    let next = path.get(1)?;
    Some(ActionKind::Move {
        dx: next.x - from.x,
        dy: next.y - from.y,
    })
}
