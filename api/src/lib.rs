pub mod client;
pub mod espn;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// The two supported competition types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum League {
    Nfl,
    CollegeFootball,
}

impl League {
    pub const ALL: [League; 2] = [League::Nfl, League::CollegeFootball];

    /// Path segment in the scoreboard URL.
    pub fn api_path(self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::CollegeFootball => "college-football",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            League::Nfl => "NFL",
            League::CollegeFootball => "College Football",
        }
    }

    /// Store key for the last successfully fetched scoreboard.
    pub fn cache_key(self) -> &'static str {
        match self {
            League::Nfl => "last-nfl-games",
            League::CollegeFootball => "last-ncaaf-games",
        }
    }

    /// Store key under which the bundled sample data gets seeded.
    pub fn sample_key(self) -> &'static str {
        match self {
            League::Nfl => "sample-nfl-games",
            League::CollegeFootball => "sample-ncaaf-games",
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_path())
    }
}

/// Game lifecycle state. The variant is the single source of truth for which
/// display bucket a game belongs to; period/clock are presentation-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum GameStatus {
    /// Not started. `detail` is ESPN's human-readable kickoff blurb.
    Pre { detail: String },
    /// Live.
    In { period: u8, clock: String },
    /// Final.
    Post,
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::Pre { detail: "Upcoming".to_owned() }
    }
}

impl GameStatus {
    pub fn is_live(&self) -> bool {
        matches!(self, GameStatus::In { .. })
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(self, GameStatus::Pre { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, GameStatus::Post)
    }

    /// Short status line: kickoff blurb, "2nd 8:45", or "Final".
    pub fn label(&self) -> String {
        match self {
            GameStatus::Pre { detail } if detail.is_empty() => "Upcoming".to_owned(),
            GameStatus::Pre { detail } => detail.clone(),
            GameStatus::In { period, clock } => {
                format!("{} {clock}", quarter_label(*period)).trim_end().to_owned()
            }
            GameStatus::Post => "Final".to_owned(),
        }
    }
}

fn quarter_label(period: u8) -> String {
    match period {
        0 | 1 => "1st".to_owned(),
        2 => "2nd".to_owned(),
        3 => "3rd".to_owned(),
        4 => "4th".to_owned(),
        n => format!("OT{}", n - 4),
    }
}

/// One polled game snapshot. Created fresh on every poll tick — a new value
/// replaces the old one wholesale, never merged in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub kickoff: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: GameStatus,
    pub league: League,
    pub competitions: Vec<Competition>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// The primary (practically always the only) competition.
    pub fn competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }

    /// A game whose competition has fewer than two competitors is incomplete
    /// data and must not be rendered.
    pub fn is_renderable(&self) -> bool {
        self.competition().is_some_and(Competition::is_complete)
    }

    /// True when any competitor carries a rank of 25 or better.
    pub fn has_top25_competitor(&self) -> bool {
        self.competition()
            .is_some_and(|c| c.competitors.iter().any(Competitor::is_ranked_top25))
    }
}

/// A matchup between exactly two competitors. By upstream convention index 0
/// is the away side and index 1 the home side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Competition {
    pub id: String,
    pub competitors: Vec<Competitor>,
    pub situation: Option<Situation>,
    pub venue: Option<Venue>,
    pub broadcasts: Vec<Broadcast>,
}

impl Competition {
    pub fn is_complete(&self) -> bool {
        self.competitors.len() >= 2
    }

    pub fn away(&self) -> Option<&Competitor> {
        self.competitors.first()
    }

    pub fn home(&self) -> Option<&Competitor> {
        self.competitors.get(1)
    }

    /// Resolve the current possession identifier to a competitor index.
    ///
    /// The upstream possession field flips between team abbreviations and
    /// internal ids, so it is matched against each competitor's full
    /// identifier set rather than compared as a single exact string. Returns
    /// `None` when there is no situation, no possession value, or the value
    /// matches neither competitor.
    pub fn possession_holder(&self) -> Option<usize> {
        let possession = self.situation.as_ref()?.possession.as_deref()?;
        if possession.trim().is_empty() {
            return None;
        }
        self.competitors
            .iter()
            .position(|c| c.matches_identifier(possession))
    }
}

/// One of the two teams in a competition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub team: Team,
    /// Non-negative once normalized; unparseable wire scores coerce to 0.
    pub score: u32,
    pub timeouts: u8,
    pub records: Vec<TeamRecord>,
    pub curated_rank: Option<u8>,
    pub rank: Option<u8>,
}

impl Competitor {
    /// Case-insensitive match against every identifier this competitor is
    /// known by: competitor id, team id, and team abbreviation.
    pub fn matches_identifier(&self, ident: &str) -> bool {
        let ident = ident.trim();
        if ident.is_empty() {
            return false;
        }
        [
            self.id.as_str(),
            self.team.id.as_str(),
            self.team.abbreviation.as_str(),
        ]
        .iter()
        .any(|known| !known.is_empty() && known.eq_ignore_ascii_case(ident))
    }

    pub fn is_ranked_top25(&self) -> bool {
        self.curated_rank.is_some_and(|r| (1..=25).contains(&r))
            || self.rank.is_some_and(|r| (1..=25).contains(&r))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,         // "Chiefs"
    pub abbreviation: String, // "KC"
    pub display_name: String, // "Kansas City Chiefs"
    pub color: String,        // hex, defaulted when absent
    pub logo: String,         // URL, empty when absent
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    pub summary: String, // "11-1"
    pub record_type: String,
}

/// Live in-game context, only meaningful while a game is in progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Situation {
    pub down: Option<u8>,
    pub distance: Option<u8>,
    pub yard_line: Option<u8>,
    pub possession: Option<String>,
    pub last_play: Option<String>,
}

impl Situation {
    /// "1st & 10" style summary, empty when down/distance are absent.
    pub fn down_and_distance(&self) -> String {
        match (self.down, self.distance) {
            (Some(down @ 1..=4), Some(distance)) => {
                let ordinal = match down {
                    1 => "1st",
                    2 => "2nd",
                    3 => "3rd",
                    _ => "4th",
                };
                format!("{ordinal} & {distance}")
            }
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Venue {
    pub full_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Broadcast {
    pub names: Vec<String>,
    pub market: Option<String>,
}

impl Default for League {
    fn default() -> Self {
        League::Nfl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor(id: &str, team_id: &str, abbrev: &str, score: u32) -> Competitor {
        Competitor {
            id: id.to_owned(),
            team: Team {
                id: team_id.to_owned(),
                abbreviation: abbrev.to_owned(),
                ..Team::default()
            },
            score,
            timeouts: 3,
            ..Competitor::default()
        }
    }

    fn competition_with_possession(possession: Option<&str>) -> Competition {
        Competition {
            id: "comp-1".to_owned(),
            competitors: vec![
                competitor("team-1", "22", "BUF", 10),
                competitor("team-2", "12", "KC", 14),
            ],
            situation: Some(Situation {
                possession: possession.map(str::to_owned),
                ..Situation::default()
            }),
            ..Competition::default()
        }
    }

    #[test]
    fn possession_resolves_by_abbreviation() {
        let comp = competition_with_possession(Some("KC"));
        assert_eq!(comp.possession_holder(), Some(1));
    }

    #[test]
    fn possession_resolves_by_internal_id() {
        let comp = competition_with_possession(Some("22"));
        assert_eq!(comp.possession_holder(), Some(0));
    }

    #[test]
    fn possession_match_is_case_insensitive() {
        let comp = competition_with_possession(Some("buf"));
        assert_eq!(comp.possession_holder(), Some(0));
    }

    #[test]
    fn unknown_or_empty_possession_resolves_to_none() {
        assert_eq!(competition_with_possession(Some("SEA")).possession_holder(), None);
        assert_eq!(competition_with_possession(Some("")).possession_holder(), None);
        assert_eq!(competition_with_possession(None).possession_holder(), None);

        let no_situation = Competition {
            competitors: vec![competitor("a", "1", "A", 0), competitor("b", "2", "B", 0)],
            ..Competition::default()
        };
        assert_eq!(no_situation.possession_holder(), None);
    }

    #[test]
    fn status_variants_partition_buckets() {
        let pre = GameStatus::Pre { detail: "Sun 1:00 PM".into() };
        let live = GameStatus::In { period: 2, clock: "8:45".into() };
        let done = GameStatus::Post;

        assert!(pre.is_upcoming() && !pre.is_live() && !pre.is_completed());
        assert!(live.is_live() && !live.is_upcoming() && !live.is_completed());
        assert!(done.is_completed() && !done.is_live() && !done.is_upcoming());
    }

    #[test]
    fn status_labels() {
        assert_eq!(GameStatus::Pre { detail: "Sun 1:00 PM".into() }.label(), "Sun 1:00 PM");
        assert_eq!(GameStatus::Pre { detail: String::new() }.label(), "Upcoming");
        assert_eq!(GameStatus::In { period: 2, clock: "8:45".into() }.label(), "2nd 8:45");
        assert_eq!(GameStatus::In { period: 5, clock: "3:12".into() }.label(), "OT1 3:12");
        assert_eq!(GameStatus::In { period: 1, clock: String::new() }.label(), "1st");
        assert_eq!(GameStatus::Post.label(), "Final");
    }

    #[test]
    fn status_survives_json_round_trip() {
        let live = GameStatus::In { period: 3, clock: "0:19".into() };
        let json = serde_json::to_string(&live).unwrap();
        assert!(json.contains("\"state\":\"in\""));
        assert_eq!(serde_json::from_str::<GameStatus>(&json).unwrap(), live);

        let done: GameStatus = serde_json::from_str(r#"{"state":"post"}"#).unwrap();
        assert_eq!(done, GameStatus::Post);
    }

    #[test]
    fn top25_checks_both_rank_fields() {
        let mut c = competitor("a", "1", "A", 0);
        assert!(!c.is_ranked_top25());
        c.curated_rank = Some(25);
        assert!(c.is_ranked_top25());
        c.curated_rank = Some(26);
        assert!(!c.is_ranked_top25());
        c.rank = Some(7);
        assert!(c.is_ranked_top25());
        // 0 is ESPN's "unranked" sentinel on curatedRank.
        c.rank = None;
        c.curated_rank = Some(0);
        assert!(!c.is_ranked_top25());
    }

    #[test]
    fn incomplete_competition_is_not_renderable() {
        let game = Game {
            id: "g1".into(),
            competitions: vec![Competition {
                competitors: vec![competitor("only", "1", "A", 3)],
                ..Competition::default()
            }],
            ..Game::default()
        };
        assert!(!game.is_renderable());
        let empty = Game::default();
        assert!(!empty.is_renderable());
    }

    #[test]
    fn down_and_distance_formats() {
        let s = Situation { down: Some(3), distance: Some(7), ..Situation::default() };
        assert_eq!(s.down_and_distance(), "3rd & 7");
        let missing = Situation::default();
        assert_eq!(missing.down_and_distance(), "");
    }
}
