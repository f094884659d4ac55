//! Bundled offline scoreboards, used when a fetch fails and no cached payload
//! exists. Stored in ESPN wire format and run through the exact same
//! `normalize` path as live payloads.

use football_api::client::normalize;
use football_api::espn::ScoreboardResponse;
use football_api::{Game, League};

const SAMPLE_NFL_JSON: &str = include_str!("../data/sample_nfl.json");
const SAMPLE_COLLEGE_JSON: &str = include_str!("../data/sample_college_football.json");

pub fn sample_games(league: League) -> Result<Vec<Game>, serde_json::Error> {
    let json = match league {
        League::Nfl => SAMPLE_NFL_JSON,
        League::CollegeFootball => SAMPLE_COLLEGE_JSON,
    };
    let raw: ScoreboardResponse = serde_json::from_str(json)?;
    Ok(normalize(raw, league))
}
