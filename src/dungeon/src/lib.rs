//src/dungeon/src/lib.rs
//! 地图、寻路、角色与关卡
//!
//! `Level` 是唯一会修改格子占用和角色坐标的地方；
//! 大脑与战斗结算都通过 `Level::execute` 完成动作。

use serde::{Deserialize, Serialize};

pub mod action;
pub mod actor;
pub mod brain;
pub mod cell;
pub mod level;
pub mod map;
pub mod mapgen;
pub mod path;
pub mod stairs;
pub mod style;
pub mod trap;
pub mod world;

pub use crate::action::{ACTION_DURATION, Action, ActionContext, ActionKind, ActionOutcome};
pub use crate::actor::{Actor, ActorKind, Locatable};
pub use crate::brain::{Brain, BrainKind, InputCode, PlayerBrain, RogueBrain, ZombieBrain};
pub use crate::cell::{Element, MapCell, Terrain};
pub use crate::level::Level;
pub use crate::map::Map;
pub use crate::mapgen::{MapGen, MapKind};
pub use crate::path::{PathMode, Pathfinder};
pub use crate::stairs::{Stairs, StairsDir, StairsLink};
pub use crate::trap::{Trap, TrapKind};
pub use crate::world::World;

/// 地图坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// 8 方向移动下的格数距离
    pub fn chebyshev(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// 角色唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// 关卡标识，即关卡在 `World` 中的下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(pub usize);

/// 楼梯唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StairsId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::fmt::Display for LevelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}
