/// ESPN API raw wire types — serde shapes for deserializing scoreboard
/// responses. These map to our clean domain types via `client::normalize`.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

/// `events` is deliberately required: a payload without it is malformed and
/// must surface as a parse error to the poller, not an empty scoreboard.
#[derive(Debug, Deserialize, Clone)]
pub struct ScoreboardResponse {
    pub events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub state: Option<String>, // "pre" | "in" | "post"
    pub completed: Option<bool>,
    pub detail: Option<String>,
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub situation: Option<EspnSituation>,
    pub venue: Option<EspnVenue>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub timeouts: Option<u8>,
    #[serde(rename = "curatedRank")]
    pub curated_rank: Option<EspnRank>,
    pub rank: Option<u8>,
    pub records: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub color: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRank {
    pub current: Option<u8>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    pub summary: Option<String>,
}

/// Live-play context. `possession` is a team identifier whose format is not
/// stable upstream — sometimes an abbreviation, sometimes an internal id.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituation {
    pub down: Option<u8>,
    pub distance: Option<u8>,
    #[serde(rename = "yardLine")]
    pub yard_line: Option<u8>,
    pub possession: Option<String>,
    #[serde(rename = "lastPlay")]
    pub last_play: Option<EspnLastPlay>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLastPlay {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAddress {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcast {
    pub names: Option<Vec<String>>,
    pub market: Option<String>,
}
