pub mod match_record;
pub mod pairing;
pub mod player;
pub mod standing;

pub use match_record::{MatchId, MatchRecord, Outcome};
pub use pairing::{is_first_round, pair_limit, swiss_pairings, Pairing};
pub use player::{Player, PlayerId, Strategy};
pub use standing::{compute_standings, sort_standings, Standing};
