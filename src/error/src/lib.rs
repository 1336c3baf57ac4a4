//! 模拟引擎错误处理模块
//!
//! 三类错误：
//! - 契约错误（缺失关卡、缺失持有者）：记录诊断日志，不中断
//! - 操作失败（格子被占、越界）：由调用方以 `false` / no-op 表达，不经过这里
//! - 不变量破坏（无法移除已死亡的角色）：以 error 级别记录，模拟继续
//!
//! 只有启动阶段（配置、地图生成）会以 `SimError` 向上传播。

use thiserror::Error;

pub mod report;

/// 启动和配置阶段可能出现的错误类型
#[derive(Debug, Error)]
pub enum SimError {
    /// IO操作错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// 配置值无效
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 未知的地图生成器
    #[error("Unknown map generator `{0}`")]
    UnknownGenerator(String),

    /// 游戏中没有任何关卡
    #[error("No levels have been added")]
    NoLevels,

    /// 关卡中没有空闲格子
    #[error("No free cell left on level {0}")]
    NoFreeCell(usize),

    /// 关卡不存在
    #[error("Level {0} does not exist")]
    UnknownLevel(usize),

    /// 指定格子无法放置角色
    #[error("Cell ({x}, {y}) on level {level} cannot hold an actor")]
    CellBlocked { level: usize, x: i32, y: i32 },

    /// 其他错误
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 背包与装备错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("item {0} is not in the inventory")]
    NotInInventory(u32),

    #[error("equipment slot `{0}` is full")]
    SlotFull(String),

    #[error("nothing equipped in `{slot}` at index {index}")]
    NothingEquipped { slot: String, index: usize },
}

/// 将错误转换为面向玩家的简短说明
pub fn describe(error: &SimError) -> String {
    match error {
        SimError::Io(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "configuration file not found".to_string(),
            std::io::ErrorKind::PermissionDenied => {
                "no permission to read the configuration file".to_string()
            }
            _ => format!("IO error: {}", e),
        },
        SimError::ConfigParse(e) => format!("malformed configuration (line {})", e.line()),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_not_found() {
        let err = SimError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "x"));
        assert_eq!(describe(&err), "configuration file not found");
    }

    #[test]
    fn test_describe_parse_error_reports_line() {
        let parse = serde_json::from_str::<serde_json::Value>("{\n\"a\": }").unwrap_err();
        let err = SimError::from(parse);
        assert!(describe(&err).contains("line 2"));
    }

    #[test]
    fn test_inventory_error_messages() {
        let err = InventoryError::NothingEquipped {
            slot: "hand".to_string(),
            index: 1,
        };
        assert_eq!(err.to_string(), "nothing equipped in `hand` at index 1");
        assert_eq!(
            InventoryError::SlotFull("head".into()).to_string(),
            "equipment slot `head` is full"
        );
    }
}
