//! Conversions from SQLite rows into the tournament types.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use types::{MatchId, MatchRecord, Outcome, PlayerId, Standing};

use crate::DatabaseError;

pub fn standing_from_row(row: &SqliteRow) -> Result<Standing, DatabaseError> {
    Ok(Standing {
        id: PlayerId::new(row.try_get("id").map_err(DatabaseError::query)?),
        name: row.try_get("name").map_err(DatabaseError::query)?,
        wins: row.try_get("wins").map_err(DatabaseError::query)?,
        matches: row.try_get("matches").map_err(DatabaseError::query)?,
    })
}

pub fn match_record_from_row(row: &SqliteRow) -> Result<MatchRecord, DatabaseError> {
    let score: i64 = row.try_get("score").map_err(DatabaseError::query)?;
    let outcome = Outcome::from_score(score)
        .ok_or_else(|| DatabaseError::Query(format!("invalid score {score} in match log")))?;

    Ok(MatchRecord {
        match_id: MatchId::new(row.try_get("match_id").map_err(DatabaseError::query)?),
        player_id: PlayerId::new(row.try_get("player_id").map_err(DatabaseError::query)?),
        outcome,
    })
}
