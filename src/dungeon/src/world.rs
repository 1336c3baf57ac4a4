//! All levels of one game, and the hand-off between them.

use error::report;
use events::GameEvent;

use crate::{
    Action, ActionContext, ActionOutcome, ActorId, LevelId, Locatable, Map, StairsId,
    level::Level,
    stairs::{Stairs, StairsDir, StairsLink},
};

#[derive(Debug, Default)]
pub struct World {
    levels: Vec<Level>,
    next_stairs: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level(&mut self, map: Map) -> LevelId {
        let id = LevelId(self.levels.len());
        self.levels.push(Level::new(id, map));
        id
    }

    pub fn level(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(id.0)
    }

    pub fn level_mut(&mut self, id: LevelId) -> Option<&mut Level> {
        self.levels.get_mut(id.0)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level the actor currently stands on.
    pub fn find_actor(&self, id: ActorId) -> Option<LevelId> {
        self.levels
            .iter()
            .find(|level| level.has_actor(id))
            .map(Level::id)
    }

    /// Create unpaired stairs at (x, y).
    pub fn add_stairs(&mut self, level: LevelId, dir: StairsDir, x: i32, y: i32) -> Option<StairsId> {
        let id = StairsId(self.next_stairs);
        let level = self.levels.get_mut(level.0)?;
        level.add_stairs(Stairs::new(id, dir), x, y).ok()?;
        self.next_stairs += 1;
        Some(id)
    }

    /// Pair two stairs with each other. Both must exist.
    pub fn connect_stairs(&mut self, a: StairsLink, b: StairsLink) -> bool {
        let exists = |link: StairsLink| {
            self.level(link.level)
                .and_then(|level| level.stairs(link.stairs))
                .is_some()
        };
        if !exists(a) || !exists(b) {
            report::contract("World", "connect_stairs", "both stairs must exist");
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(stairs) = self
                .level_mut(from.level)
                .and_then(|level| level.stairs_mut(from.stairs))
            {
                stairs.set_target(to);
            }
        }
        true
    }

    /// Run an action for an actor on `level`. Stairs moves finish here.
    pub fn execute(
        &mut self,
        level: LevelId,
        actor: ActorId,
        action: &Action,
        ctx: &mut ActionContext,
    ) -> bool {
        let Some(current) = self.level_mut(level) else {
            report::contract("World", "execute", format!("missing level {}", level));
            return false;
        };
        match current.execute(actor, action, ctx) {
            ActionOutcome::Done => true,
            ActionOutcome::Failed => false,
            ActionOutcome::Transit(link) => self.use_stairs(level, actor, link, ctx),
        }
    }

    /// Move the actor onto the paired stairs. Nothing changes unless it succeeds.
    fn use_stairs(
        &mut self,
        from: LevelId,
        actor: ActorId,
        link: StairsLink,
        ctx: &mut ActionContext,
    ) -> bool {
        let Some(dest) = self
            .level(link.level)
            .and_then(|level| level.stairs(link.stairs))
            .map(Locatable::position)
        else {
            report::contract("World", "use_stairs", format!("stairs lead to missing {}", link.level));
            return false;
        };
        let free = self
            .level(link.level)
            .is_some_and(|level| level.map().is_passable(dest.x, dest.y));
        if !free {
            return false;
        }

        let Some(moving) = self.level_mut(from).and_then(|level| level.remove_actor(actor)) else {
            return false;
        };
        let origin = moving.position();
        let was_player = moving.is_player();

        let Some(target) = self.level_mut(link.level) else {
            return false;
        };
        match target.add_actor(moving, dest.x, dest.y) {
            Ok(()) => {
                tracing::debug!(actor = %actor, from = %from, to = %link.level, "changed level");
                ctx.bus.publish(GameEvent::LevelChanged {
                    actor: actor.0,
                    from: from.0,
                    to: link.level.0,
                    was_player,
                });
                true
            }
            Err(back) => {
                if let Some(source) = self.level_mut(from) {
                    if let Err(lost) = source.add_actor(back, origin.x, origin.y) {
                        report::invariant(
                            "World",
                            "use_stairs",
                            format!("{} could not return to {}", lost.id(), from),
                        );
                    }
                }
                false
            }
        }
    }
}
