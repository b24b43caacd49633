use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid match: {0}")]
    InvalidMatch(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl DatabaseError {
    /// Sorts a failed statement into constraint, connection or query errors.
    pub fn query(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation()
                    || db.is_unique_violation()
                    || db.is_check_violation() =>
            {
                DatabaseError::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DatabaseError::Connection(err.to_string()),
            _ => DatabaseError::Query(err.to_string()),
        }
    }

    pub fn connection(err: sqlx::Error) -> Self {
        DatabaseError::Connection(err.to_string())
    }

    pub fn transaction(err: sqlx::Error) -> Self {
        DatabaseError::Transaction(err.to_string())
    }
}
