//! 回合制网格世界模拟引擎
//!
//! 子 crate 提供地图、寻路、战斗、物品与事件总线；
//! 这里把它们组装成可运行的 `Game`。

pub mod config;
pub mod core;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod scheduler;

pub use crate::config::SimConfig;
pub use crate::core::{EntityFactory, EventId, Regeneration, TimedEvent};
pub use crate::game_loop::{Game, StepOutcome};
pub use crate::scheduler::{Scheduler, TurnTaker};
