//! tracing 日志初始化

use tracing_subscriber::{EnvFilter, fmt};

/// 安装全局订阅者，写到 stderr。`RUST_LOG` 优先于 `default_filter`。
///
/// 重复调用不会出错，第二次之后什么也不做。
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let result = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if result.is_ok() {
        tracing::debug!(filter = default_filter, "logging initialised");
    }
}
