use super::traits::{check_distinct, TournamentStore};
use crate::DatabaseError;
use types::{compute_standings, MatchId, MatchRecord, Player, PlayerId, Standing};

/// Keeps both tables in process. Ids follow the same rules as the SQLite
/// store: player ids are never reused and match ids are the current maximum
/// plus one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    records: Vec<MatchRecord>,
    last_player_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_registered(&self, id: PlayerId) -> bool {
        self.players.iter().any(|player| player.id == id)
    }
}

#[async_trait::async_trait]
impl TournamentStore for MemoryStore {
    async fn register_player(&mut self, name: &str) -> Result<PlayerId, DatabaseError> {
        self.last_player_id += 1;
        let player_id = PlayerId::new(self.last_player_id);
        self.players.push(Player::new(player_id, name));
        Ok(player_id)
    }

    async fn count_players(&mut self) -> Result<usize, DatabaseError> {
        Ok(self.players.len())
    }

    async fn delete_players(&mut self) -> Result<(), DatabaseError> {
        self.records.clear();
        self.players.clear();
        Ok(())
    }

    async fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchId, DatabaseError> {
        check_distinct(winner, loser)?;
        for id in [winner, loser] {
            if !self.is_registered(id) {
                return Err(DatabaseError::Constraint(format!(
                    "player {id} is not registered"
                )));
            }
        }

        let match_id = self
            .records
            .iter()
            .map(|record| record.match_id)
            .max()
            .unwrap_or(MatchId::new(0))
            .next();
        self.records.extend(MatchRecord::pair(match_id, winner, loser));
        Ok(match_id)
    }

    async fn delete_matches(&mut self) -> Result<(), DatabaseError> {
        self.records.clear();
        Ok(())
    }

    async fn match_records(&mut self) -> Result<Vec<MatchRecord>, DatabaseError> {
        Ok(self.records.clone())
    }

    async fn player_standings(&mut self) -> Result<Vec<Standing>, DatabaseError> {
        Ok(compute_standings(&self.players, &self.records))
    }
}
