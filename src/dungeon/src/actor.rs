// src/dungeon/src/actor.rs
use combat::{CombatStats, Combatant};
use items::InvAndEquip;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{ActorId, LevelId, Position, brain::Brain, brain::BrainKind};

/// 默认视野半径
pub const DEFAULT_FOV_RANGE: u32 = 4;

/// 有坐标、属于某个关卡的实体
pub trait Locatable {
    fn position(&self) -> Position;

    /// 所在关卡（非拥有引用）
    fn level(&self) -> Option<LevelId>;
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum ActorKind {
    Player,
    Monster,
}

/// 地图上的角色
///
/// 坐标和所属关卡只能由 `Level` 修改。
#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    pub name: String,
    kind: ActorKind,
    pub stats: CombatStats,
    pub fov_range: u32,
    pub inv_eq: InvAndEquip,
    pos: Position,
    level: Option<LevelId>,
    brain: Option<Box<dyn Brain>>,
}

impl Actor {
    pub fn new(id: ActorId, name: &str, kind: ActorKind, brain: Box<dyn Brain>) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            stats: CombatStats::default(),
            fov_range: DEFAULT_FOV_RANGE,
            inv_eq: InvAndEquip::new(id.0),
            pos: Position::new(0, 0),
            level: None,
            brain: Some(brain),
        }
    }

    pub fn with_stats(mut self, stats: CombatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// 替换大脑
    pub fn set_brain(&mut self, brain: Box<dyn Brain>) {
        self.brain = Some(brain);
    }

    pub fn brain_kind(&self) -> Option<BrainKind> {
        self.brain.as_ref().map(|brain| brain.kind())
    }

    pub(crate) fn take_brain(&mut self) -> Option<Box<dyn Brain>> {
        self.brain.take()
    }

    pub(crate) fn restore_brain(&mut self, brain: Box<dyn Brain>) {
        self.brain = Some(brain);
    }

    pub(crate) fn place(&mut self, level: LevelId, pos: Position) {
        self.level = Some(level);
        self.pos = pos;
    }

    pub(crate) fn detach(&mut self) {
        self.level = None;
    }
}

impl Locatable for Actor {
    fn position(&self) -> Position {
        self.pos
    }

    fn level(&self) -> Option<LevelId> {
        self.level
    }
}

impl Combatant for Actor {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }
}
