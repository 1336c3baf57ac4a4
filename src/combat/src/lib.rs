// src/combat/src/lib.rs

pub mod combatant;
pub mod experience;
pub mod rng;
pub mod vision;

pub use crate::combatant::{CombatStats, Combatant};
pub use crate::rng::{FixedRoll, RollSource, SimRng};
pub use crate::vision::VisionSystem;

/// Handles combat interactions between entities
pub struct Combat;

impl Combat {
    /// Chance that `attacker` lands a blow on `defender`.
    pub fn hit_chance<T: Combatant + ?Sized, U: Combatant + ?Sized>(
        attacker: &T,
        defender: &U,
    ) -> f64 {
        let accuracy = attacker.stats().accuracy.max(0) as f64;
        let agility = defender.stats().agility.max(0) as f64;
        if accuracy + agility <= 0.0 {
            return 0.0;
        }
        accuracy / (accuracy + agility)
    }

    /// Resolve a single attack and apply its damage to the defender.
    ///
    /// The roll is only drawn when the attack could do damage at all, so an
    /// attacker weaker than the defender's armor never consumes randomness.
    /// Removing a defeated defender from the world is the caller's job.
    pub fn resolve_attack<T, U, R>(attacker: &T, defender: &mut U, roll: &mut R) -> CombatResult
    where
        T: Combatant + ?Sized,
        U: Combatant + ?Sized,
        R: RollSource + ?Sized,
    {
        let mut result = CombatResult::new();
        result.log(format!("{} attacks {}.", attacker.name(), defender.name()));

        let diff = attacker.stats().attack - defender.stats().defense;
        if diff <= 0 {
            result.log(format!(
                "{} failed to damage {}.",
                attacker.name(),
                defender.name()
            ));
            return result;
        }

        let hit_chance = Self::hit_chance(attacker, &*defender);
        if roll.roll() >= hit_chance {
            result.log(format!("{} misses {}.", attacker.name(), defender.name()));
            return result;
        }

        defender.take_damage(diff);
        result.hit = true;
        result.damage = diff;
        result.log(format!("{} got {} damage.", defender.name(), diff));
        tracing::debug!(
            attacker = attacker.name(),
            defender = defender.name(),
            damage = diff,
            hp_left = defender.stats().hp,
            "attack landed"
        );

        if !defender.is_alive() {
            result.defeated = true;
        }
        result
    }
}

/// Outcome of a single attack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatResult {
    pub logs: Vec<String>, // Combat messages for the message log
    pub hit: bool,
    pub damage: i32,
    pub defeated: bool, // Whether the defender dropped to 0 HP or below
}

impl CombatResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: String) {
        self.logs.push(message);
    }
}
