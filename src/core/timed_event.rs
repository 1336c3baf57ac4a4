//! Scheduled effects that are not actors.

use std::fmt;

use combat::Combatant;
use dungeon::{ActorId, World};
use events::{EventBus, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u32);

/// Fires every `interval` time units once scheduled.
pub trait TimedEvent: fmt::Debug + Send {
    fn name(&self) -> &str;

    /// Actor the event belongs to. The event is dropped when that actor dies.
    fn actor(&self) -> Option<ActorId>;

    fn interval(&self) -> u64;

    fn fire(&mut self, world: &mut World, bus: &mut EventBus);
}

/// Heals one HP per firing, never above max HP.
#[derive(Debug, Clone, Copy)]
pub struct Regeneration {
    actor: ActorId,
    interval: u64,
}

impl Regeneration {
    pub fn new(actor: ActorId, interval: u64) -> Self {
        Self { actor, interval }
    }
}

impl TimedEvent for Regeneration {
    fn name(&self) -> &str {
        "Regeneration"
    }

    fn actor(&self) -> Option<ActorId> {
        Some(self.actor)
    }

    fn interval(&self) -> u64 {
        self.interval
    }

    fn fire(&mut self, world: &mut World, bus: &mut EventBus) {
        let Some(actor) = world
            .find_actor(self.actor)
            .and_then(|level| world.level_mut(level))
            .and_then(|level| level.actor_mut(self.actor))
        else {
            return;
        };
        if actor.heal(1) > 0 {
            bus.publish(GameEvent::message(format!("{} regenerates 1 HP.", actor.name)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon::{Actor, ActorKind, BrainKind, Map};

    fn world_with_hero(hp: i32) -> World {
        let mut world = World::new();
        let level = world.add_level(Map::new(3, 3));
        let mut hero = Actor::new(ActorId(1), "Hero", ActorKind::Player, BrainKind::Player.build());
        hero.stats.hp = hp;
        world
            .level_mut(level)
            .unwrap()
            .add_actor(hero, 1, 1)
            .unwrap();
        world
    }

    #[test]
    fn test_regenerates_wounded_actor() {
        let mut world = world_with_hero(10);
        let mut bus = EventBus::new();
        Regeneration::new(ActorId(1), 2000).fire(&mut world, &mut bus);

        let hero = world.levels()[0].actor(ActorId(1)).unwrap();
        assert_eq!(hero.stats.hp, 11);
        assert_eq!(
            bus.full_history(),
            &[GameEvent::message("Hero regenerates 1 HP.")]
        );
    }

    #[test]
    fn test_full_health_stays_quiet() {
        let mut world = world_with_hero(50);
        let mut bus = EventBus::new();
        Regeneration::new(ActorId(1), 2000).fire(&mut world, &mut bus);
        assert_eq!(world.levels()[0].actor(ActorId(1)).unwrap().stats.hp, 50);
        assert!(bus.full_history().is_empty());
    }
}
