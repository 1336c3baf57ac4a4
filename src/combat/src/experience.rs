//! Experience and level progression.

use crate::Combatant;

pub const LEVEL_UP_HP: i32 = 5;
pub const LEVEL_UP_ATTACK: i32 = 1;
pub const LEVEL_UP_DEFENSE: i32 = 1;

/// Total experience needed to reach `level`: `10 + 20 + ... + 10 * level`.
pub fn required_exp(level: u32) -> u32 {
    (1..=level).map(|i| i * 10).sum()
}

/// Add experience and run one level-up check. Returns the new level on success.
pub fn award<C: Combatant + ?Sized>(combatant: &mut C, exp: u32) -> Option<u32> {
    combatant.stats_mut().exp += exp;
    check_level_up(combatant)
}

/// Advance at most one level if the accumulated experience allows it.
pub fn check_level_up<C: Combatant + ?Sized>(combatant: &mut C) -> Option<u32> {
    let stats = combatant.stats_mut();
    let next_level = stats.exp_level + 1;
    if stats.exp < required_exp(next_level) {
        return None;
    }

    stats.exp_level = next_level;
    stats.max_hp += LEVEL_UP_HP;
    stats.hp += LEVEL_UP_HP;
    stats.attack += LEVEL_UP_ATTACK;
    stats.defense += LEVEL_UP_DEFENSE;
    tracing::debug!(name = combatant.name(), level = next_level, "level up");
    Some(next_level)
}
