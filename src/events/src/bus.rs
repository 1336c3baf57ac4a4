use std::collections::{HashMap, VecDeque};

use crate::{EventHandler, GameEvent, Priority};

/// 事件处理器包装器，包含优先级信息
struct HandlerEntry {
    handler: Box<dyn EventHandler>,
    priority: Priority,
}

/// 事件总线 - 支持订阅模式和队列模式
///
/// 由 `Game` 显式持有，不存在全局实例。
pub struct EventBus {
    /// 等待游戏循环取出的事件
    events: Vec<GameEvent>,
    /// 按事件类型注册的处理器
    handlers: HashMap<&'static str, Vec<HandlerEntry>>,
    /// 全局事件处理器（处理所有事件）
    global_handlers: Vec<HandlerEntry>,
    /// 事件历史（用于调试和回放）
    history: VecDeque<GameEvent>,
    max_history: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_history_size(100)
    }

    /// 创建一个指定历史记录大小的事件总线
    pub fn with_history_size(max_history: usize) -> Self {
        Self {
            events: Vec::new(),
            handlers: HashMap::new(),
            global_handlers: Vec::new(),
            history: VecDeque::new(),
            max_history,
        }
    }

    // ========== 队列模式 API ==========

    /// 发布事件：立即分发给订阅者，并加入队列
    pub fn publish(&mut self, event: GameEvent) {
        self.add_to_history(event.clone());
        self.dispatch_to_handlers(&event);
        self.events.push(event);
    }

    /// 获取所有待处理事件并清空队列
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    // ========== 订阅者模式 API ==========

    /// 注册事件处理器（处理特定类型的事件）
    pub fn subscribe(&mut self, event_type: &'static str, handler: Box<dyn EventHandler>) {
        let priority = handler.priority();
        let handlers = self.handlers.entry(event_type).or_default();
        handlers.push(HandlerEntry { handler, priority });
        handlers.sort_by(|a, b| a.priority.cmp(&b.priority));
    }

    /// 注册全局事件处理器（处理所有事件）
    pub fn subscribe_all(&mut self, handler: Box<dyn EventHandler>) {
        let priority = handler.priority();
        self.global_handlers.push(HandlerEntry { handler, priority });
        self.global_handlers
            .sort_by(|a, b| a.priority.cmp(&b.priority));
    }

    /// 分发事件给所有订阅者
    fn dispatch_to_handlers(&mut self, event: &GameEvent) {
        // 先处理全局处理器
        for entry in &mut self.global_handlers {
            if entry.handler.should_handle(event) {
                entry.handler.handle(event);
            }
        }

        if let Some(handlers) = self.handlers.get_mut(event.event_type()) {
            for entry in handlers {
                if entry.handler.should_handle(event) {
                    entry.handler.handle(event);
                }
            }
        }
    }

    // ========== 历史记录和调试 API ==========

    fn add_to_history(&mut self, event: GameEvent) {
        if self.max_history == 0 {
            return;
        }
        if self.history.len() >= self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// 最近的事件，从旧到新
    pub fn full_history(&self) -> &VecDeque<GameEvent> {
        &self.history
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
