// src/combat/src/combatant.rs

use serde::{Deserialize, Serialize};

/// 战斗属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatStats {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    /// 命中
    pub accuracy: i32,
    /// 闪避
    pub agility: i32,
    /// 攻击距离（8 方向格数）
    pub attack_range: u32,
    /// 累计经验
    pub exp: u32,
    /// 经验等级，从 1 开始
    pub exp_level: u32,
}

impl CombatStats {
    pub const DEFAULT_HP: i32 = 50;

    /// 指定生命值，其余属性取默认值
    pub fn with_hp(hp: i32) -> Self {
        Self {
            hp,
            max_hp: hp,
            ..Self::default()
        }
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            hp: Self::DEFAULT_HP,
            max_hp: Self::DEFAULT_HP,
            attack: 10,
            defense: 5,
            accuracy: 10,
            agility: 5,
            attack_range: 1,
            exp: 0,
            exp_level: 1,
        }
    }
}

/// 表示可以参加战斗的活体
pub trait Combatant {
    /// 获取名称
    fn name(&self) -> &str;

    fn stats(&self) -> &CombatStats;

    fn stats_mut(&mut self) -> &mut CombatStats;

    /// 是否存活
    fn is_alive(&self) -> bool {
        self.stats().hp > 0
    }

    /// 造成伤害，生命值可以降到 0 以下
    fn take_damage(&mut self, amount: i32) {
        self.stats_mut().hp -= amount;
    }

    /// 治疗，不超过最大生命值；返回实际恢复量
    fn heal(&mut self, amount: i32) -> i32 {
        let stats = self.stats_mut();
        let before = stats.hp;
        stats.hp = (stats.hp + amount).min(stats.max_hp).max(before);
        stats.hp - before
    }
}
