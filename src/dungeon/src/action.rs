//! Actions produced by brains and interpreted by `Level::execute`.

use combat::RollSource;
use events::EventBus;

use crate::StairsLink;

/// Time an ordinary action takes unless configured otherwise.
pub const ACTION_DURATION: u64 = 100;

/// What an action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Step by a relative offset.
    Move { dx: i32, dy: i32 },
    /// Attack whoever stands on the cell.
    Attack { x: i32, y: i32 },
    Pickup,
    UseStairs,
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub duration: u64,
}

impl Action {
    pub fn new(kind: ActionKind, duration: u64) -> Self {
        Self { kind, duration }
    }
}

/// Shared state an action may touch besides the level itself.
pub struct ActionContext<'a> {
    pub bus: &'a mut EventBus,
    /// Source of combat hit rolls.
    pub roll: &'a mut dyn RollSource,
}

/// Result of `Level::execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    /// Nothing changed.
    Failed,
    /// The actor stands on linked stairs; the owner of both levels completes the move.
    Transit(StairsLink),
}
