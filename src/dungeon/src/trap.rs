// src/dungeon/src/trap.rs
use serde::{Deserialize, Serialize};
use strum::Display;

/// 表示地牢中的一个陷阱
///
/// 有角色踩上去时显形，目前没有其他效果。
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Trap {
    kind: TrapKind,
    visible: bool, // 是否对玩家可见
}

impl Trap {
    /// 创建一个新的隐藏陷阱
    pub fn new(kind: TrapKind) -> Self {
        Trap {
            kind,
            visible: false,
        }
    }

    /// 使陷阱可见(对玩家显示)
    pub fn reveal(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn kind(&self) -> TrapKind {
        self.kind
    }
}

/// 陷阱类型
#[derive(Eq, PartialEq, Debug, Display, Clone, Copy, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum TrapKind {
    /// 飞镖陷阱
    Dart,
    /// 警报陷阱
    Alarm,
    /// 传送陷阱
    Teleport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trap_reveal() {
        let mut trap = Trap::new(TrapKind::Dart);
        assert!(!trap.is_visible());
        trap.reveal();
        assert!(trap.is_visible());
        assert_eq!(trap.kind().to_string(), "dart");
    }
}
