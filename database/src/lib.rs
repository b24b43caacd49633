pub mod config;
pub mod error;
pub mod models;
pub mod stores;


pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use stores::{MemoryStore, SqliteStore, TournamentStore};
