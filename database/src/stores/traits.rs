use async_trait::async_trait;
use types::{MatchId, MatchRecord, Pairing, PlayerId, Standing};

use super::super::DatabaseError;

/// Tournament operations over the player registry and the match log.
///
/// Every call is self-contained: implementations keep no state between
/// calls beyond what they persist, and writes are all-or-nothing.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    /// Registers a player under a fresh id. Names need not be unique.
    async fn register_player(&mut self, name: &str) -> Result<PlayerId, DatabaseError>;

    async fn count_players(&mut self) -> Result<usize, DatabaseError>;

    /// Removes every player together with every match they played.
    async fn delete_players(&mut self) -> Result<(), DatabaseError>;

    /// Records a decided match under the next match id.
    async fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchId, DatabaseError>;

    async fn delete_matches(&mut self) -> Result<(), DatabaseError>;

    /// The full match log ordered by match id, winner first.
    async fn match_records(&mut self) -> Result<Vec<MatchRecord>, DatabaseError>;

    /// Wins and matches played for every registered player, wins descending.
    async fn player_standings(&mut self) -> Result<Vec<Standing>, DatabaseError>;

    /// Pairings for the next round, computed from the current standings.
    async fn swiss_pairings(&mut self) -> Result<Vec<Pairing>, DatabaseError> {
        let standings = self.player_standings().await?;
        Ok(types::swiss_pairings(&standings))
    }
}

pub(crate) fn check_distinct(winner: PlayerId, loser: PlayerId) -> Result<(), DatabaseError> {
    if winner == loser {
        return Err(DatabaseError::InvalidMatch(format!(
            "player {winner} cannot play themselves"
        )));
    }
    Ok(())
}
