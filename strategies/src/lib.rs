pub mod input_strategy;

use rand::{rngs::ThreadRng, Rng};
use types::{Pairing, PlayerId, Standing, Strategy};

pub use crate::input_strategy::InputStrategy;

/// Coin flip.
#[derive(Debug, Default)]
pub struct RandomStrategy {
    rng: ThreadRng,
}

impl Strategy for RandomStrategy {
    fn select_winner(&mut self, pairing: &Pairing, _standings: &[Standing]) -> Option<PlayerId> {
        if self.rng.gen_bool(0.5) {
            Some(pairing.id1)
        } else {
            Some(pairing.id2)
        }
    }
}

/// The favourite always wins: the player with more wins, or the lower id
/// (the earlier registration, treated as the higher seed) when level.
#[derive(Debug, Default)]
pub struct DefaultStrategy {}

impl Strategy for DefaultStrategy {
    fn select_winner(&mut self, pairing: &Pairing, standings: &[Standing]) -> Option<PlayerId> {
        let wins = |id: PlayerId| {
            standings
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.wins)
                .unwrap_or_default()
        };
        if wins(pairing.id2) > wins(pairing.id1) {
            Some(pairing.id2)
        } else {
            Some(pairing.id1)
        }
    }
}
