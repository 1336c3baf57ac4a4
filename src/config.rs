//! 模拟配置，从 JSON 文件读取

use std::{fs, path::Path};

use dungeon::{ACTION_DURATION, MapKind};
use error::SimError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub cols: i32,
    pub rows: i32,
    /// 关卡数量
    pub levels: usize,
    /// 每层怪物数量
    pub monsters: usize,
    /// 地图生成器名称
    pub map_kind: String,
    pub fov_range: u32,
    /// 一次普通动作的耗时
    pub action_duration: u64,
    pub default_hp: i32,
    /// 回复间隔，以动作数计
    pub regen_every: u64,
    pub seed: u64,
    /// 最多执行的回合数
    pub turn_limit: usize,
    /// `RUST_LOG` 未设置时使用的过滤器
    pub log_filter: String,
    /// 玩家按键脚本，例如 `"ddds."`
    pub input_script: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cols: 40,
            rows: 20,
            levels: 3,
            monsters: 4,
            map_kind: "cellular".to_string(),
            fov_range: 4,
            action_duration: ACTION_DURATION,
            default_hp: 50,
            regen_every: 20,
            seed: 0,
            turn_limit: 1000,
            log_filter: "info".to_string(),
            input_script: None,
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        let config: SimConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.cols <= 0 || self.rows <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "map size {}x{} must be positive",
                self.cols, self.rows
            )));
        }
        if self.levels == 0 {
            return Err(SimError::InvalidConfig("at least one level is required".into()));
        }
        if self.cols.checked_mul(self.rows).is_none() {
            return Err(SimError::InvalidConfig(format!(
                "map size {}x{} is too large",
                self.cols, self.rows
            )));
        }
        if self.action_duration == 0 {
            return Err(SimError::InvalidConfig("action_duration must be positive".into()));
        }
        if self.regen_every.checked_mul(self.action_duration).is_none() {
            return Err(SimError::InvalidConfig(format!(
                "regen_every {} times action_duration {} overflows",
                self.regen_every, self.action_duration
            )));
        }
        self.map_kind()?;
        Ok(())
    }

    pub fn map_kind(&self) -> Result<MapKind, SimError> {
        self.map_kind
            .parse()
            .map_err(|_| SimError::UnknownGenerator(self.map_kind.clone()))
    }

    /// 回复事件的间隔时间
    pub fn regen_interval(&self) -> u64 {
        self.regen_every.saturating_mul(self.action_duration)
    }
}
