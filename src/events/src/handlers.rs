//! 内置事件处理器

use std::sync::{Arc, Mutex};

use crate::{EventHandler, GameEvent, Priority};

/// 消息日志 - 收集 `Message` 事件的文本
///
/// 共享的 `Arc<Mutex<Vec<String>>>` 由游戏循环读取。
pub struct MessageLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    pub fn new(messages: Arc<Mutex<Vec<String>>>) -> Self {
        Self { messages }
    }
}

impl EventHandler for MessageLog {
    fn handle(&mut self, event: &GameEvent) {
        if let GameEvent::Message { text } = event {
            if let Ok(mut logs) = self.messages.lock() {
                logs.push(text.clone());
            }
        }
    }

    fn name(&self) -> &str {
        "MessageLog"
    }

    fn priority(&self) -> Priority {
        Priority::Lowest
    }

    fn should_handle(&self, event: &GameEvent) -> bool {
        matches!(event, GameEvent::Message { .. })
    }
}

/// 把每个事件写入 tracing 日志
pub struct TracingHandler;

impl EventHandler for TracingHandler {
    fn handle(&mut self, event: &GameEvent) {
        tracing::debug!(
            event_type = event.event_type(),
            category = ?event.category(),
            ?event,
            "event published"
        );
    }

    fn name(&self) -> &str {
        "TracingHandler"
    }

    fn priority(&self) -> Priority {
        Priority::Lowest
    }
}
