use std::path::PathBuf;

use clap::Parser;
use database::{DatabaseConfig, SqliteStore, TournamentStore};
use tournament::{recommended_rounds, run_tournament, StrategyKind, TournamentConfig};

#[derive(Parser, Debug)]
struct Params {
    /// Player to register; repeat for more players
    #[arg(short, long)]
    player: Vec<String>,

    /// YAML tournament config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Database URL, overrides DATABASE_URL and the config file
    #[arg(short, long)]
    database: Option<String>,

    /// Rounds to play, defaults to enough rounds to find a single winner
    #[arg(short, long)]
    rounds: Option<usize>,

    #[arg(short, long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Delete all players and matches before registering
    #[arg(long)]
    reset: bool,

    /// Print standings and pairings as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    if let Err(err) = run(args).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Params) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => TournamentConfig::from_path(path)?,
        None => TournamentConfig::default(),
    };

    let db_config = DatabaseConfig::from_cli_or_env_or_yaml(args.database, config.database_url);
    let mut store = SqliteStore::new(db_config.create_pool().await?);
    store.run_migrations().await?;

    if args.reset {
        store.delete_matches().await?;
        store.delete_players().await?;
    }

    for name in config.players.iter().chain(args.player.iter()) {
        let player_id = store.register_player(name).await?;
        log::info!("Registered {name} as #{player_id}");
    }

    let player_count = store.count_players().await?;
    let rounds = args
        .rounds
        .or(config.rounds)
        .unwrap_or_else(|| recommended_rounds(player_count));
    let mut strategy = args.strategy.or(config.strategy).unwrap_or_default().build();
    log::info!("{player_count} players, {rounds} rounds, strategy {strategy:?}");

    let standings = run_tournament(&mut store, strategy.as_mut(), rounds).await?;
    let next_round = store.swiss_pairings().await?;

    if args.json {
        let output = serde_json::json!({
            "standings": standings,
            "next_round": next_round,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("# Standings");
        for (place, standing) in standings.iter().enumerate() {
            println!("{:>3}. {standing}", place + 1);
        }
        println!("# Next round");
        for pairing in &next_round {
            println!("  {pairing}");
        }
    }

    Ok(())
}
