//! 事件总线系统，用于解耦模块间通信
//!
//! 生产者（战斗结算、楼梯传送）发布事件，消费者（调度器清理、
//! 游戏结束判定、消息日志）订阅事件：
//! - 订阅者模式：`publish` 时立即分发给按优先级排序的处理器
//! - 队列模式：事件同时进入队列，游戏循环通过 `drain` 取出
//! - 历史记录：保留最近的事件用于调试

mod bus;
mod handlers;

pub use bus::EventBus;
pub use handlers::{MessageLog, TracingHandler};

use serde::{Deserialize, Serialize};

/// 事件类别 - 用于事件分组和过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// 战斗相关事件
    Combat,
    /// 移动与传送事件
    Movement,
    /// 物品相关事件
    Items,
    /// 给玩家看的文本
    UI,
    /// 系统事件
    System,
}

/// 游戏事件定义
///
/// 角色以原始 `u32` id 表示，关卡以下标表示。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// 角色在关卡内移动了一格
    ActorMoved {
        actor: u32,
        from: (i32, i32),
        to: (i32, i32),
    },
    /// 角色死亡，已从关卡移除
    ActorKilled {
        actor: u32,
        name: String,
        level: usize,
        was_player: bool,
    },
    /// 角色升级
    ActorLeveledUp { actor: u32, new_level: u32 },
    /// 角色通过楼梯换层
    LevelChanged {
        actor: u32,
        from: usize,
        to: usize,
        was_player: bool,
    },
    /// 拾取物品
    ItemPickedUp { actor: u32, item: u32 },
    /// 给消息日志的文本
    Message { text: String },
    /// 最后一个玩家死亡
    GameOver,
}

impl GameEvent {
    /// 创建消息事件
    pub fn message(text: impl Into<String>) -> Self {
        GameEvent::Message { text: text.into() }
    }

    /// 获取事件类型的字符串表示（用作订阅键）
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::ActorMoved { .. } => "ActorMoved",
            GameEvent::ActorKilled { .. } => "ActorKilled",
            GameEvent::ActorLeveledUp { .. } => "ActorLeveledUp",
            GameEvent::LevelChanged { .. } => "LevelChanged",
            GameEvent::ItemPickedUp { .. } => "ItemPickedUp",
            GameEvent::Message { .. } => "Message",
            GameEvent::GameOver => "GameOver",
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            GameEvent::ActorKilled { .. } | GameEvent::ActorLeveledUp { .. } => {
                EventCategory::Combat
            }
            GameEvent::ActorMoved { .. } | GameEvent::LevelChanged { .. } => {
                EventCategory::Movement
            }
            GameEvent::ItemPickedUp { .. } => EventCategory::Items,
            GameEvent::Message { .. } => EventCategory::UI,
            GameEvent::GameOver => EventCategory::System,
        }
    }
}

/// 事件处理器优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    /// 最高优先级 - 用于关键系统事件
    Critical = 0,
    /// 高优先级 - 用于游戏核心逻辑
    High = 1,
    /// 普通优先级 - 默认优先级
    Normal = 2,
    /// 低优先级 - 用于 UI 更新等
    Low = 3,
    /// 最低优先级 - 用于日志等
    Lowest = 4,
}

/// 事件处理器 trait
pub trait EventHandler: Send + Sync {
    /// 处理事件
    fn handle(&mut self, event: &GameEvent);

    /// 事件处理器的名称（用于调试）
    fn name(&self) -> &str;

    /// 优先级（数字越小优先级越高）
    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// 是否应该处理此事件（事件过滤）
    fn should_handle(&self, _event: &GameEvent) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = GameEvent::ActorKilled {
            actor: 3,
            name: "Critter".into(),
            level: 0,
            was_player: false,
        };
        assert_eq!(event.event_type(), "ActorKilled");
        assert_eq!(event.category(), EventCategory::Combat);
        assert_eq!(GameEvent::message("hi").event_type(), "Message");
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Critical < Priority::Normal);
        assert!(Priority::Low < Priority::Lowest);
    }
}
