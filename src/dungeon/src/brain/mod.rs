//! Decision making: one brain per actor, swappable at runtime.

use std::fmt;

use combat::SimRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{ActionKind, Actor, Level};

mod player;
mod rogue;

pub use player::{InputCode, PlayerBrain};
pub use rogue::{RogueBrain, ZombieBrain};

#[derive(Debug, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum BrainKind {
    Player,
    Rogue,
    Zombie,
}

impl BrainKind {
    pub fn build(self) -> Box<dyn Brain> {
        match self {
            BrainKind::Player => Box::new(PlayerBrain),
            BrainKind::Rogue => Box::new(RogueBrain::default()),
            BrainKind::Zombie => Box::new(ZombieBrain),
        }
    }
}

/// Chooses the next action for the actor that owns it.
///
/// Brains only read the level. Everything they decide is carried out by
/// `Level::execute`. `None` means no action: the turn is not consumed.
pub trait Brain: fmt::Debug + Send {
    fn kind(&self) -> BrainKind;

    fn decide(
        &mut self,
        actor: &Actor,
        level: &Level,
        input: Option<InputCode>,
        rng: &mut SimRng,
    ) -> Option<ActionKind>;
}
