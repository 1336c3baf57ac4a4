// src/dungeon/src/stairs.rs
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{LevelId, Position, StairsId, actor::Locatable};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum StairsDir {
    Down,
    Up,
}

/// 楼梯另一端：目标关卡上的配对楼梯
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StairsLink {
    pub level: LevelId,
    pub stairs: StairsId,
}

/// 楼梯元素
///
/// 与目标关卡上恰好一个反向楼梯配对：`down.target.target == down`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stairs {
    id: StairsId,
    dir: StairsDir,
    pos: Position,
    level: Option<LevelId>,
    target: Option<StairsLink>,
}

impl Stairs {
    pub fn new(id: StairsId, dir: StairsDir) -> Self {
        Self {
            id,
            dir,
            pos: Position::new(0, 0),
            level: None,
            target: None,
        }
    }

    pub fn id(&self) -> StairsId {
        self.id
    }

    pub fn dir(&self) -> StairsDir {
        self.dir
    }

    pub fn is_down(&self) -> bool {
        self.dir == StairsDir::Down
    }

    pub fn target(&self) -> Option<StairsLink> {
        self.target
    }

    pub fn target_level(&self) -> Option<LevelId> {
        self.target.map(|link| link.level)
    }

    pub(crate) fn set_target(&mut self, link: StairsLink) {
        self.target = Some(link);
    }

    pub(crate) fn place(&mut self, level: LevelId, pos: Position) {
        self.level = Some(level);
        self.pos = pos;
    }
}

impl Locatable for Stairs {
    fn position(&self) -> Position {
        self.pos
    }

    fn level(&self) -> Option<LevelId> {
        self.level
    }
}
