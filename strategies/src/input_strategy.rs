use std::io::{self, Write};

use regex::Regex;
use types::{Pairing, PlayerId, Standing, Strategy};

/// Asks the tournament director on stdin who won each pairing.
#[derive(Debug, Default)]
pub struct InputStrategy {}

impl Strategy for InputStrategy {
    fn select_winner(&mut self, pairing: &Pairing, standings: &[Standing]) -> Option<PlayerId> {
        print_pairing(pairing, standings);

        let mut buf = String::new();
        loop {
            print!("Winner? (1, 2, #id or name) >> ");
            let _ = io::stdout().flush();
            buf.clear();
            match io::stdin().read_line(&mut buf) {
                Ok(0) => {
                    log::warn!("stdin closed, leaving {pairing} unreported");
                    return None;
                }
                Ok(_) => match select_winner_from_str(&buf, pairing) {
                    Ok(winner) => return Some(winner),
                    Err(err) => log::error!("Error parsing winner from stdin: {err}"),
                },
                Err(err) => {
                    log::error!("Error reading line from stdin: {err}");
                    return None;
                }
            }
        }
    }
}

fn print_pairing(pairing: &Pairing, standings: &[Standing]) {
    for (seat, id) in pairing.players().iter().enumerate() {
        if let Some(standing) = standings.iter().find(|s| s.id == *id) {
            println!(
                "[{}] {} (#{}) {}-{}",
                seat + 1,
                standing.name,
                standing.id,
                standing.wins,
                standing.losses()
            );
        }
    }
}

/// Accepts a seat number (`1` or `2`), a player id (`#12`) or a
/// case-insensitive player name.
pub fn select_winner_from_str(input: &str, pairing: &Pairing) -> Result<PlayerId, String> {
    let input = input.trim();
    let re = Regex::new(r"^(?:(?<seat>[12])|#(?<id>\d+))$").expect("Valid winner regex");

    if let Some(caps) = re.captures(input) {
        log::debug!("Captured: {caps:?}");
        if let Some(seat) = caps.name("seat") {
            return Ok(if seat.as_str() == "1" {
                pairing.id1
            } else {
                pairing.id2
            });
        }
        if let Some(id) = caps.name("id") {
            let id = id
                .as_str()
                .parse::<i64>()
                .map(PlayerId::new)
                .map_err(|err| format!("Invalid player id {input:?}: {err}"))?;
            return if pairing.contains(id) {
                Ok(id)
            } else {
                Err(format!("Player #{id} is not in this pairing"))
            };
        }
    }

    let lowered = input.to_lowercase();
    match (
        pairing.name1.to_lowercase() == lowered,
        pairing.name2.to_lowercase() == lowered,
    ) {
        (true, false) => Ok(pairing.id1),
        (false, true) => Ok(pairing.id2),
        (true, true) => Err(format!(
            "Both players are named {input:?}, use the seat number or id instead"
        )),
        (false, false) => Err(format!("Unable to parse a winner from string: {input:?}")),
    }
}
