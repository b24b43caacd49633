//! Integration tests for TournamentStore implementations
//!
//! Most scenarios run against both the SQLite store (migrated in-memory
//! database) and the in-process MemoryStore; the two must agree. Concurrent
//! writers are exercised on a SQLite database file.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use database::{DatabaseConfig, DatabaseError, MemoryStore, SqliteStore, TournamentStore};
use types::{MatchId, MatchRecord, Outcome, PlayerId};

async fn sqlite_store() -> SqliteStore {
    let pool = DatabaseConfig::new("sqlite::memory:")
        .create_pool()
        .await
        .expect("Failed to connect");
    let store = SqliteStore::new(pool);
    store.run_migrations().await.expect("Failed to migrate");
    store
}

async fn stores() -> Vec<Box<dyn TournamentStore>> {
    vec![Box::new(sqlite_store().await), Box::new(MemoryStore::new())]
}

async fn register_all(store: &mut dyn TournamentStore, names: &[&str]) -> Vec<PlayerId> {
    let mut ids = Vec::new();
    for name in names {
        ids.push(store.register_player(name).await.expect("Failed to register"));
    }
    ids
}

/// Registering, deleting and counting players
#[tokio::test]
async fn test_player_registry() {
    for mut store in stores().await {
        store.delete_matches().await.unwrap();
        store.delete_players().await.unwrap();
        assert_eq!(store.count_players().await.unwrap(), 0);

        register_all(store.as_mut(), &["Chandra Nalaar", "Jace Beleren", "Jace Beleren"]).await;
        assert_eq!(store.count_players().await.unwrap(), 3);

        store.delete_players().await.unwrap();
        assert_eq!(store.count_players().await.unwrap(), 0);
    }
}

/// Each reported match yields one Win and one Loss row under a new id
#[tokio::test]
async fn test_report_match_rows() {
    for mut store in stores().await {
        let ids = register_all(store.as_mut(), &["Bruno", "Boots", "Cathy", "Diane"]).await;

        let first = store.report_match(ids[0], ids[1]).await.unwrap();
        let second = store.report_match(ids[2], ids[3]).await.unwrap();
        assert_eq!(first, MatchId::new(1));
        assert_eq!(second, MatchId::new(2));

        let records = store.match_records().await.unwrap();
        assert_eq!(records.len(), 4);
        for match_id in [first, second] {
            let rows: Vec<_> = records.iter().filter(|r| r.match_id == match_id).collect();
            assert_eq!(rows.len(), 2);
            assert_ne!(rows[0].player_id, rows[1].player_id);
            assert_eq!(rows[0].outcome, Outcome::Win);
            assert_eq!(rows[1].outcome, Outcome::Loss);
        }
    }
}

/// Malformed and dangling match reports are rejected without writes
#[tokio::test]
async fn test_report_match_failures() {
    for mut store in stores().await {
        let ids = register_all(store.as_mut(), &["Alice", "Bob"]).await;

        let err = store.report_match(ids[0], ids[0]).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidMatch(_)));

        let err = store
            .report_match(PlayerId::new(77), ids[1])
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Constraint(_)));

        assert!(store.match_records().await.unwrap().is_empty());
    }
}

/// Standings are ordered by wins and account for every match twice
#[tokio::test]
async fn test_standings_consistency() {
    for mut store in stores().await {
        let ids = register_all(store.as_mut(), &["A", "B", "C", "D", "E", "F"]).await;
        store.report_match(ids[5], ids[0]).await.unwrap();
        store.report_match(ids[4], ids[1]).await.unwrap();
        store.report_match(ids[3], ids[2]).await.unwrap();
        store.report_match(ids[5], ids[4]).await.unwrap();

        let standings = store.player_standings().await.unwrap();
        assert_eq!(standings.len(), 6);
        assert!(standings.windows(2).all(|w| w[0].wins >= w[1].wins));
        let total: u32 = standings.iter().map(|s| s.matches).sum();
        assert_eq!(total, 2 * 4);
        assert_eq!(standings[0].id, ids[5]);
        assert_eq!(standings[0].wins, 2);

        assert_eq!(standings, store.player_standings().await.unwrap());
    }
}

/// Both stores report identical standings and pairings for the same history
#[tokio::test]
async fn test_stores_agree() {
    let mut sqlite = sqlite_store().await;
    let mut memory = MemoryStore::new();
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];

    for store in [&mut sqlite as &mut dyn TournamentStore, &mut memory] {
        let ids = register_all(store, &names).await;
        store.report_match(ids[1], ids[0]).await.unwrap();
        store.report_match(ids[2], ids[3]).await.unwrap();
        store.report_match(ids[5], ids[4]).await.unwrap();
        store.report_match(ids[6], ids[7]).await.unwrap();
    }

    assert_eq!(
        sqlite.player_standings().await.unwrap(),
        memory.player_standings().await.unwrap()
    );
    assert_eq!(
        sqlite.swiss_pairings().await.unwrap(),
        memory.swiss_pairings().await.unwrap()
    );
}

/// Pairings never cross win groups once results exist
#[tokio::test]
async fn test_pairings_by_win_group() {
    for mut store in stores().await {
        let ids = register_all(store.as_mut(), &["A", "B", "C", "D", "E", "F", "G", "H"]).await;

        let round_one = store.swiss_pairings().await.unwrap();
        assert_eq!(round_one.len(), 4);
        for (pairing, pair) in round_one.iter().zip(ids.chunks(2)) {
            assert_eq!((pairing.id1, pairing.id2), (pair[0], pair[1]));
        }

        for pairing in &round_one {
            store.report_match(pairing.id2, pairing.id1).await.unwrap();
        }

        let standings = store.player_standings().await.unwrap();
        let round_two = store.swiss_pairings().await.unwrap();
        assert_eq!(round_two.len(), 4);
        for pairing in &round_two {
            let wins = |id: PlayerId| standings.iter().find(|s| s.id == id).map(|s| s.wins);
            assert_eq!(wins(pairing.id1), wins(pairing.id2));
        }
        assert_eq!((round_two[0].id1, round_two[0].id2), (ids[1], ids[3]));
        assert_eq!((round_two[2].id1, round_two[2].id2), (ids[0], ids[2]));
    }
}

/// Two stores writing to one database file never hand out the same match id
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reports_get_distinct_match_ids() {
    const ROUNDS: usize = 100;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "tournament-concurrent-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    let url = format!("sqlite:{}", db_path.display());

    let mut first = SqliteStore::new(
        DatabaseConfig::new(&url)
            .create_pool()
            .await
            .expect("Failed to connect"),
    );
    first.run_migrations().await.expect("Failed to migrate");
    let mut second = SqliteStore::new(
        DatabaseConfig::new(&url)
            .create_pool()
            .await
            .expect("Failed to connect"),
    );

    let ids = register_all(&mut first, &["Alice", "Bob", "Charlie", "Dana"]).await;
    for _ in 0..ROUNDS {
        let (left, right) = tokio::join!(
            first.report_match(ids[0], ids[1]),
            second.report_match(ids[2], ids[3])
        );
        let left = left.expect("Failed to report first match");
        let right = right.expect("Failed to report second match");
        assert_ne!(left, right);
    }

    let records = first.match_records().await.unwrap();
    assert_eq!(records.len(), 4 * ROUNDS);
    let mut by_match: HashMap<MatchId, Vec<&MatchRecord>> = HashMap::new();
    for record in &records {
        by_match.entry(record.match_id).or_default().push(record);
    }
    assert_eq!(by_match.len(), 2 * ROUNDS);
    for rows in by_match.values() {
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].player_id, rows[1].player_id);
        let wins = rows.iter().filter(|r| r.outcome == Outcome::Win).count();
        assert_eq!(wins, 1);
    }

    let distinct: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT match_id) FROM matches")
        .fetch_one(second.pool())
        .await
        .unwrap();
    assert_eq!(distinct as usize, 2 * ROUNDS);

    first.pool().close().await;
    second.pool().close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", db_path.display()));
    }
}

/// Store trait objects can be boxed
#[tokio::test]
async fn test_store_trait_object() {
    let pool = DatabaseConfig::new("sqlite::memory:")
        .create_pool()
        .await
        .expect("Failed to connect");

    let _sqlite: Box<dyn TournamentStore> = Box::new(SqliteStore::new(pool));
    let _memory: Box<dyn TournamentStore> = Box::new(MemoryStore::new());
}
