//! 游戏装配：实体工厂与定时事件
//!
//! 工厂负责分配 id 并把关卡、角色、楼梯组装成一个 `Game`；
//! 定时事件与角色一起由调度器排队。

pub mod entity_factory;
pub mod timed_event;

pub use entity_factory::EntityFactory;
pub use timed_event::{EventId, Regeneration, TimedEvent};
