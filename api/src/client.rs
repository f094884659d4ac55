use crate::espn::{
    EspnBroadcast, EspnCompetition, EspnCompetitor, EspnEvent, EspnSituation, EspnStatus,
    EspnTeam, EspnVenue, ScoreboardResponse,
};
use crate::{
    Broadcast, Competition, Competitor, Game, GameStatus, League, Situation, Team, TeamRecord,
    Venue,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_API_BASE: &str = "https://site.api.espn.com/apis/site/v2/sports/football";

/// Fallback branding when ESPN omits a team color.
pub const DEFAULT_TEAM_COLOR: &str = "#000000";
/// Both football rule sets grant three timeouts per half.
pub const DEFAULT_TIMEOUTS: u8 = 3;

/// Football scoreboard client backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct FootballApi {
    client: Client,
    base: String,
    timeout: Duration,
}

impl Default for FootballApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("bigboard/0.1 (scoreboard dashboard)")
                .build()
                .unwrap_or_default(),
            base: ESPN_API_BASE.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FootballApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client pointed at an alternate base URL (tests, proxies).
    pub fn with_base(base: impl Into<String>) -> Self {
        Self { base: base.into(), ..Self::default() }
    }

    /// Fetch and normalize the current scoreboard for one league.
    pub async fn fetch_scoreboard(&self, league: League) -> ApiResult<Vec<Game>> {
        let url = format!("{}/{}/scoreboard", self.base, league.api_path());
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(normalize(raw, league))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        // Any non-2xx is the error path; stale data handling is the caller's job.
        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// Shape a raw scoreboard payload into tagged `Game` snapshots. Pure: no
/// network or storage side effects, and absent optional fields become safe
/// defaults rather than errors.
pub fn normalize(raw: ScoreboardResponse, league: League) -> Vec<Game> {
    raw.events.iter().map(|e| map_event(e, league)).collect()
}

/// Parse a wire score string. `""`, garbage, and absent values coerce to 0.
pub fn team_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

fn map_event(event: &EspnEvent, league: League) -> Game {
    let kickoff = event.date.as_deref().and_then(parse_kickoff);

    Game {
        id: event.id.clone().unwrap_or_default(),
        kickoff,
        status: map_status(event.status.as_ref()),
        league,
        competitions: event
            .competitions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_competition)
            .collect(),
    }
}

/// ESPN event dates come in minute precision ("2025-12-07T18:00Z"), which is
/// not valid RFC 3339; accept both that and the full form.
fn parse_kickoff(date: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

fn map_status(status: Option<&EspnStatus>) -> GameStatus {
    let Some(status) = status else {
        return GameStatus::default();
    };
    let kind = status.status_type.as_ref();
    match kind.and_then(|t| t.state.as_deref()) {
        Some("in") => GameStatus::In {
            period: status.period.unwrap_or(1),
            clock: status.display_clock.clone().unwrap_or_default(),
        },
        Some("post") => GameStatus::Post,
        _ => GameStatus::Pre {
            detail: kind
                .and_then(|t| t.short_detail.clone().or_else(|| t.detail.clone()))
                .unwrap_or_else(|| "Upcoming".to_owned()),
        },
    }
}

fn map_competition(comp: &EspnCompetition) -> Competition {
    Competition {
        id: comp.id.clone().unwrap_or_default(),
        competitors: comp
            .competitors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_competitor)
            .collect(),
        situation: comp.situation.as_ref().map(map_situation),
        venue: comp.venue.as_ref().and_then(map_venue),
        broadcasts: comp
            .broadcasts
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(map_broadcast)
            .collect(),
    }
}

fn map_competitor(c: &EspnCompetitor) -> Competitor {
    Competitor {
        id: c.id.clone().unwrap_or_default(),
        team: c.team.as_ref().map(map_team).unwrap_or_default(),
        score: team_score(c.score.as_deref()),
        timeouts: c.timeouts.unwrap_or(DEFAULT_TIMEOUTS),
        records: c
            .records
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|r| TeamRecord {
                summary: r.summary.clone().unwrap_or_default(),
                record_type: r.record_type.clone().unwrap_or_default(),
            })
            .collect(),
        curated_rank: c.curated_rank.as_ref().and_then(|r| r.current),
        rank: c.rank,
    }
}

fn map_team(t: &EspnTeam) -> Team {
    let display_name = t
        .display_name
        .clone()
        .or_else(|| t.name.clone())
        .unwrap_or_default();
    Team {
        id: t.id.clone().unwrap_or_default(),
        name: t.name.clone().unwrap_or_else(|| display_name.clone()),
        abbreviation: t.abbreviation.clone().unwrap_or_default(),
        display_name,
        color: t.color.clone().unwrap_or_else(|| DEFAULT_TEAM_COLOR.to_owned()),
        logo: t.logo.clone().unwrap_or_default(),
    }
}

fn map_situation(s: &EspnSituation) -> Situation {
    Situation {
        down: s.down,
        distance: s.distance,
        yard_line: s.yard_line,
        possession: s.possession.clone(),
        last_play: s.last_play.as_ref().and_then(|p| p.text.clone()),
    }
}

fn map_venue(v: &EspnVenue) -> Option<Venue> {
    let full_name = v.full_name.clone()?;
    Some(Venue {
        full_name,
        city: v.address.as_ref().and_then(|a| a.city.clone()),
        state: v.address.as_ref().and_then(|a| a.state.clone()),
    })
}

fn map_broadcast(b: &EspnBroadcast) -> Broadcast {
    Broadcast {
        names: b.names.clone().unwrap_or_default(),
        market: b.market.clone(),
    }
}
