//! Builders for small deterministic games.

#![allow(dead_code)]

use combat::CombatStats;
use dungeon::{Actor, ActorId, ActorKind, BrainKind, LevelId, Map, StairsDir, StairsLink};
use rogue_sim::Game;

pub const SEED: u64 = 7;
pub const DURATION: u64 = dungeon::ACTION_DURATION;

pub const ROOM: &[&str] = &[
    "#########", //
    "#.......#", //
    "#.......#", //
    "#.......#", //
    "#########",
];

/// Lays out levels and actors, then hands back a ready `Game`.
pub struct TestGameBuilder {
    game: Game,
    next_id: u32,
}

impl TestGameBuilder {
    pub fn new() -> Self {
        Self {
            game: Game::new(SEED, DURATION),
            next_id: 0,
        }
    }

    pub fn with_level(mut self, rows: &[&str]) -> Self {
        self.game.add_level(Map::from_ascii(rows));
        self
    }

    pub fn with_player(mut self, level: usize, x: i32, y: i32, stats: CombatStats) -> Self {
        let id = self.id();
        let actor = Actor::new(id, "Hero", ActorKind::Player, BrainKind::Player.build())
            .with_stats(stats);
        self.game
            .add_actor_at(actor, LevelId(level), x, y)
            .expect("player cell should be free");
        self
    }

    pub fn with_monster(
        mut self,
        name: &str,
        brain: BrainKind,
        level: usize,
        x: i32,
        y: i32,
        stats: CombatStats,
    ) -> Self {
        let id = self.id();
        let actor = Actor::new(id, name, ActorKind::Monster, brain.build()).with_stats(stats);
        self.game
            .add_actor_at(actor, LevelId(level), x, y)
            .expect("monster cell should be free");
        self
    }

    /// Down stairs on `upper` paired with up stairs on `upper + 1`.
    pub fn with_stairs(mut self, upper: usize, down_at: (i32, i32), up_at: (i32, i32)) -> Self {
        let world = self.game.world_mut();
        let down = world
            .add_stairs(LevelId(upper), StairsDir::Down, down_at.0, down_at.1)
            .expect("down stairs");
        let up = world
            .add_stairs(LevelId(upper + 1), StairsDir::Up, up_at.0, up_at.1)
            .expect("up stairs");
        assert!(world.connect_stairs(
            StairsLink {
                level: LevelId(upper),
                stairs: down,
            },
            StairsLink {
                level: LevelId(upper + 1),
                stairs: up,
            },
        ));
        self
    }

    pub fn build(self) -> Game {
        self.game
    }

    fn id(&mut self) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Stats that always hit: zero agility makes the hit chance 1.
pub fn sure_hitter(hp: i32, attack: i32) -> CombatStats {
    CombatStats {
        attack,
        defense: 0,
        agility: 0,
        ..CombatStats::with_hp(hp)
    }
}
