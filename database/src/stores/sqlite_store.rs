use super::traits::{check_distinct, TournamentStore};
use crate::models::{match_record_from_row, standing_from_row};
use crate::DatabaseError;
use sqlx::{Row, SqlitePool};
use types::{MatchId, MatchRecord, PlayerId, Standing};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Tournament schema is up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl TournamentStore for SqliteStore {
    async fn register_player(&mut self, name: &str) -> Result<PlayerId, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::connection)?;

        let result = sqlx::query("INSERT INTO players (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::query)?;

        tx.commit().await.map_err(DatabaseError::transaction)?;

        let player_id = PlayerId::new(result.last_insert_rowid());
        tracing::debug!("Registered player {} as #{}", name, player_id);
        Ok(player_id)
    }

    async fn count_players(&mut self) -> Result<usize, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::connection)?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM players")
            .fetch_one(&mut *conn)
            .await
            .map_err(DatabaseError::query)?;

        Ok(count as usize)
    }

    async fn delete_players(&mut self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::connection)?;

        let matches = sqlx::query("DELETE FROM matches")
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::query)?;
        let players = sqlx::query("DELETE FROM players")
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::query)?;

        tx.commit().await.map_err(DatabaseError::transaction)?;

        tracing::debug!(
            "Deleted {} players and {} match rows",
            players.rows_affected(),
            matches.rows_affected()
        );
        Ok(())
    }

    async fn report_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchId, DatabaseError> {
        check_distinct(winner, loser)?;

        let mut tx = self.pool.begin().await.map_err(DatabaseError::connection)?;

        // Allocating the id and writing the winner in one statement keeps the
        // id private to this transaction.
        let row = sqlx::query(
            "INSERT INTO matches (match_id, player_id, score)
             SELECT COALESCE(MAX(match_id), 0) + 1, ?, 1 FROM matches
             RETURNING match_id",
        )
        .bind(winner.as_i64())
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::query)?;
        let match_id = MatchId::new(row.try_get("match_id").map_err(DatabaseError::query)?);

        sqlx::query("INSERT INTO matches (match_id, player_id, score) VALUES (?, ?, 0)")
            .bind(match_id.as_i64())
            .bind(loser.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::query)?;

        tx.commit().await.map_err(DatabaseError::transaction)?;

        tracing::debug!("Match {}: #{} beat #{}", match_id, winner, loser);
        Ok(match_id)
    }

    async fn delete_matches(&mut self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::connection)?;

        let result = sqlx::query("DELETE FROM matches")
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::query)?;

        tx.commit().await.map_err(DatabaseError::transaction)?;

        tracing::debug!("Deleted {} match rows", result.rows_affected());
        Ok(())
    }

    async fn match_records(&mut self) -> Result<Vec<MatchRecord>, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::connection)?;

        let rows = sqlx::query(
            "SELECT match_id, player_id, score FROM matches ORDER BY match_id ASC, score DESC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::query)?;

        rows.iter().map(match_record_from_row).collect()
    }

    async fn player_standings(&mut self) -> Result<Vec<Standing>, DatabaseError> {
        let mut conn = self.pool.acquire().await.map_err(DatabaseError::connection)?;

        let rows = sqlx::query(
            "SELECT id, name, wins, matches FROM standings ORDER BY wins DESC, id ASC",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(DatabaseError::query)?;

        rows.iter().map(standing_from_row).collect()
    }
}
