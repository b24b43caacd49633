use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{MatchRecord, Outcome, Player, PlayerId};

/// A player's record: wins and matches played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub matches: u32,
}

impl Standing {
    pub fn losses(&self) -> u32 {
        self.matches - self.wins
    }
}

impl Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>4}  {:<24} {:>3}-{:<3}",
            self.id.as_i64(),
            self.name,
            self.wins,
            self.losses()
        )
    }
}

/// Orders standings the way every store reports them: wins descending, then
/// ascending id.
pub fn sort_standings(standings: &mut [Standing]) {
    standings.sort_by_key(|s| (Reverse(s.wins), s.id));
}

/// Aggregates the match log per player. Every player appears exactly once,
/// players without records get zero wins and zero matches. Records for
/// unknown players are ignored.
pub fn compute_standings(players: &[Player], records: &[MatchRecord]) -> Vec<Standing> {
    let mut tallies: HashMap<PlayerId, (u32, u32)> = HashMap::new();
    for record in records {
        let tally = tallies.entry(record.player_id).or_default();
        if record.outcome == Outcome::Win {
            tally.0 += 1;
        }
        tally.1 += 1;
    }

    let mut standings: Vec<Standing> = players
        .iter()
        .map(|player| {
            let (wins, matches) = tallies.get(&player.id).copied().unwrap_or_default();
            Standing {
                id: player.id,
                name: player.name.clone(),
                wins,
                matches,
            }
        })
        .collect();
    sort_standings(&mut standings);
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchId;

    fn players(names: &[&str]) -> Vec<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as i64 + 1), name))
            .collect()
    }

    #[test]
    fn test_players_without_matches_have_zero_record() {
        let standings = compute_standings(&players(&["Alice", "Bob"]), &[]);
        assert_eq!(standings.len(), 2);
        assert!(standings.iter().all(|s| s.wins == 0 && s.matches == 0));
        assert_eq!(standings[0].id, PlayerId::new(1));
        assert_eq!(standings[1].id, PlayerId::new(2));
    }

    #[test]
    fn test_sorted_by_wins_descending() {
        let roster = players(&["Alice", "Bob", "Charlie", "Dana"]);
        let mut records = Vec::new();
        records.extend(MatchRecord::pair(MatchId::new(1), PlayerId::new(4), PlayerId::new(1)));
        records.extend(MatchRecord::pair(MatchId::new(2), PlayerId::new(3), PlayerId::new(2)));
        records.extend(MatchRecord::pair(MatchId::new(3), PlayerId::new(4), PlayerId::new(3)));

        let standings = compute_standings(&roster, &records);
        let order: Vec<i64> = standings.iter().map(|s| s.id.as_i64()).collect();
        assert_eq!(order, vec![4, 3, 1, 2]);
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[0].matches, 2);
        assert_eq!(standings[1].losses(), 1);

        let total_matches: u32 = standings.iter().map(|s| s.matches).sum();
        assert_eq!(total_matches, 6);
    }

    #[test]
    fn test_records_for_unknown_players_ignored() {
        let roster = players(&["Alice"]);
        let records = MatchRecord::pair(MatchId::new(1), PlayerId::new(1), PlayerId::new(99));
        let standings = compute_standings(&roster, &records);
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].wins, 1);
        assert_eq!(standings[0].matches, 1);
    }
}
