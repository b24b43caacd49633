use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::PlayerId;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(i64);

impl MatchId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant's result in a match, stored as a score of 1 or 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn score(self) -> i64 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => 0,
        }
    }

    pub fn from_score(score: i64) -> Option<Self> {
        match score {
            1 => Some(Outcome::Win),
            0 => Some(Outcome::Loss),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

/// A row of the match log. Each reported match yields two records sharing
/// a `match_id`: the winner's `Win` and the loser's `Loss`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub outcome: Outcome,
}

impl MatchRecord {
    pub fn pair(match_id: MatchId, winner: PlayerId, loser: PlayerId) -> [MatchRecord; 2] {
        [
            MatchRecord {
                match_id,
                player_id: winner,
                outcome: Outcome::Win,
            },
            MatchRecord {
                match_id,
                player_id: loser,
                outcome: Outcome::Loss,
            },
        ]
    }
}
