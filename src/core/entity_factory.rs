use combat::{CombatStats, SimRng};
use dungeon::{
    Actor, ActorId, ActorKind, Brain, BrainKind, LevelId, Map, MapGen, MapKind, StairsDir,
    StairsLink, Trap, TrapKind,
};
use error::SimError;
use items::{Item, ItemId, ItemKind};

use crate::{config::SimConfig, core::Regeneration, game_loop::Game};

/// 各层依次放置的陷阱种类
const TRAP_ROTATION: [TrapKind; 3] = [TrapKind::Dart, TrapKind::Alarm, TrapKind::Teleport];

/// 实体工厂，负责分配 id 并组装游戏
///
/// id 计数器属于工厂实例，不存在全局状态。
#[derive(Debug, Default)]
pub struct EntityFactory {
    next_actor: u32,
    next_item: u32,
    fov_range: Option<u32>,
}

impl EntityFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 之后创建的角色都使用这个视野范围
    pub fn with_fov_range(mut self, range: u32) -> Self {
        self.fov_range = Some(range);
        self
    }

    fn actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor += 1;
        id
    }

    fn build_actor(&mut self, name: &str, kind: ActorKind, brain: Box<dyn Brain>) -> Actor {
        let mut actor = Actor::new(self.actor_id(), name, kind, brain);
        if let Some(range) = self.fov_range {
            actor.fov_range = range;
        }
        actor
    }

    /// 创建玩家
    pub fn create_player(&mut self, name: &str, hp: i32) -> Actor {
        self.build_actor(name, ActorKind::Player, BrainKind::Player.build())
            .with_stats(CombatStats::with_hp(hp))
    }

    /// 创建怪物
    pub fn create_monster(
        &mut self,
        name: &str,
        hp: i32,
        attack: i32,
        defense: i32,
        brain: Box<dyn Brain>,
    ) -> Actor {
        self.build_actor(name, ActorKind::Monster, brain)
            .with_stats(CombatStats {
                attack,
                defense,
                ..CombatStats::with_hp(hp)
            })
    }

    /// 按名称创建怪物大脑，未知名称得到默认的 `RogueBrain`
    pub fn create_brain(name: &str) -> Box<dyn Brain> {
        match name.parse::<BrainKind>() {
            Ok(BrainKind::Zombie) => BrainKind::Zombie.build(),
            _ => BrainKind::Rogue.build(),
        }
    }

    pub fn create_item(&mut self, kind: ItemKind, name: &str) -> Item {
        let id = ItemId(self.next_item);
        self.next_item += 1;
        Item::new(id, kind, name)
    }

    pub fn create_level(kind: MapKind, cols: i32, rows: i32, rng: &mut SimRng) -> Map {
        MapGen::new(kind, cols, rows).generate(rng)
    }

    /// 创建完整的游戏：多层地牢、怪物、物品、成对的楼梯和玩家
    pub fn create_game(&mut self, config: &SimConfig) -> Result<Game, SimError> {
        config.validate()?;
        let kind = config.map_kind()?;
        let mut game = Game::new(config.seed, config.action_duration);
        self.fov_range = Some(config.fov_range);

        let player = self.create_player("Player", config.default_hp);
        game.add_event(Box::new(Regeneration::new(player.id(), config.regen_interval())));
        let mut player = Some(player);

        let mut levels = Vec::with_capacity(config.levels);
        for nl in 0..config.levels {
            let map = Self::create_level(kind, config.cols, config.rows, game.rng_mut());
            let level = game.add_level(map);
            levels.push(level);
            if let Some(player) = player.take() {
                game.add_player(player)?;
            }

            let food = self.create_item(ItemKind::Food, "food");
            let weapon = self.create_item(ItemKind::Weapon, "weapon");
            game.add_item_to_random_cell(food, level)?;
            game.add_item_to_random_cell(weapon, level)?;

            for i in 0..config.monsters {
                let name = format!("CritterL{},{}", nl, i);
                let hp = 10 + 5 * nl as i32;
                let defaults = CombatStats::default();
                let mut monster = self.create_monster(
                    &name,
                    hp,
                    defaults.attack,
                    defaults.defense,
                    BrainKind::Rogue.build(),
                );
                monster.stats.exp_level = nl as u32 + 1;
                game.add_actor_to_random_cell(monster, level)?;
            }

            let trap = Trap::new(TRAP_ROTATION[nl % TRAP_ROTATION.len()]);
            game.add_trap_to_random_cell(trap, level)?;
        }

        self.connect_levels(&mut game, &levels)?;
        tracing::info!(
            levels = config.levels,
            monsters = config.monsters,
            seed = config.seed,
            "game created"
        );
        Ok(game)
    }

    /// 相邻两层之间放一对楼梯：上层的下楼梯连到下层的上楼梯
    fn connect_levels(&mut self, game: &mut Game, levels: &[LevelId]) -> Result<(), SimError> {
        for pair in levels.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            let down = game.add_stairs_to_random_cell(upper, StairsDir::Down)?;
            let up = game.add_stairs_to_random_cell(lower, StairsDir::Up)?;
            let linked = game.world_mut().connect_stairs(
                StairsLink {
                    level: upper,
                    stairs: down,
                },
                StairsLink {
                    level: lower,
                    stairs: up,
                },
            );
            if !linked {
                return Err(SimError::Other(anyhow::anyhow!(
                    "could not pair stairs between {} and {}",
                    upper,
                    lower
                )));
            }
        }
        Ok(())
    }
}
