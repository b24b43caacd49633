pub mod config;

use database::{DatabaseError, TournamentStore};
use types::{MatchId, Standing, Strategy};

pub use config::{ConfigError, StrategyKind, TournamentConfig};

/// Rounds needed to separate a single winner: `ceil(log2(players))`.
pub fn recommended_rounds(players: usize) -> usize {
    if players < 2 {
        return 0;
    }
    (usize::BITS - (players - 1).leading_zeros()) as usize
}

/// Pairs the current standings and reports one result per pairing.
pub async fn run_round(
    store: &mut dyn TournamentStore,
    strategy: &mut dyn Strategy,
) -> Result<Vec<MatchId>, DatabaseError> {
    let standings = store.player_standings().await?;
    let pairings = types::swiss_pairings(&standings);

    let mut reported = Vec::with_capacity(pairings.len());
    for pairing in &pairings {
        let Some(winner) = strategy.select_winner(pairing, &standings) else {
            log::warn!("No result for {pairing}");
            continue;
        };
        let Some(loser) = pairing.opponent_of(winner) else {
            return Err(DatabaseError::InvalidMatch(format!(
                "#{winner} is not part of {pairing}"
            )));
        };
        let match_id = store.report_match(winner, loser).await?;
        log::info!("Match {match_id}: {pairing}, winner #{winner}");
        reported.push(match_id);
    }
    Ok(reported)
}

/// Plays `rounds` rounds, stopping early once no pairing is possible, and
/// returns the final standings.
pub async fn run_tournament(
    store: &mut dyn TournamentStore,
    strategy: &mut dyn Strategy,
    rounds: usize,
) -> Result<Vec<Standing>, DatabaseError> {
    for round in 1..=rounds {
        log::info!("Round {round} of {rounds}");
        let reported = run_round(store, strategy).await?;
        if reported.is_empty() {
            log::warn!("Nothing reported in round {round}, stopping");
            break;
        }
    }
    store.player_standings().await
}
