use std::cmp::Reverse;
use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{PlayerId, Standing};

/// Two players scheduled to meet in the next round. `id1` is always the
/// lower id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: PlayerId,
    pub name1: String,
    pub id2: PlayerId,
    pub name2: String,
}

impl Pairing {
    pub fn new(first: &Standing, second: &Standing) -> Self {
        let (first, second) = if first.id <= second.id {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            id1: first.id,
            name1: first.name.clone(),
            id2: second.id,
            name2: second.name.clone(),
        }
    }

    pub fn players(&self) -> [PlayerId; 2] {
        [self.id1, self.id2]
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.id1 == id || self.id2 == id
    }

    pub fn opponent_of(&self, id: PlayerId) -> Option<PlayerId> {
        if id == self.id1 {
            Some(self.id2)
        } else if id == self.id2 {
            Some(self.id1)
        } else {
            None
        }
    }
}

impl Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (#{}) vs {} (#{})",
            self.name1, self.id1, self.name2, self.id2
        )
    }
}

/// Number of pairings a round can hold: one per two players.
pub fn pair_limit(player_count: usize) -> usize {
    player_count / 2
}

/// True when no wins have been recorded for anyone yet.
pub fn is_first_round(standings: &[Standing]) -> bool {
    standings.iter().map(|s| s.wins).sum::<u32>() == 0
}

/// Pairs players for the next round.
///
/// Players are grouped by their `(wins, matches)` signature. In the opening
/// round every win count is zero, so players only need equal matches played.
/// Inside a group players are sorted by id and paired with their neighbour:
/// first with second, third with fourth. A player left over in an odd-sized
/// group is not paired. Groups are visited by wins descending then matches
/// ascending, and the result never exceeds [`pair_limit`].
pub fn swiss_pairings(standings: &[Standing]) -> Vec<Pairing> {
    let limit = pair_limit(standings.len());
    if is_first_round(standings) {
        log::debug!(
            "Opening round: pairing {} players by matches played",
            standings.len()
        );
    }

    let groups = standings
        .iter()
        .sorted_by_key(|s| (Reverse(s.wins), s.matches, s.id))
        .group_by(|s| (s.wins, s.matches));

    let mut pairings = Vec::with_capacity(limit);
    for ((wins, matches), group) in &groups {
        let members: Vec<&Standing> = group.collect();
        let pairs = members.chunks_exact(2);
        if let [unpaired] = pairs.remainder() {
            log::debug!(
                "No opponent for {} (#{}) with {wins} wins in {matches} matches",
                unpaired.name,
                unpaired.id
            );
        }
        pairings.extend(pairs.map(|pair| Pairing::new(pair[0], pair[1])));
    }

    pairings.truncate(limit);
    pairings
}
