//! Shared fixtures for the state-machine tests: canned games with a known
//! competitor layout and stub scoreboard sources.

use crate::poller::ScoreboardSource;
use async_trait::async_trait;
use football_api::client::{ApiError, ApiResult};
use football_api::{Competition, Competitor, Game, GameStatus, League, Situation, Team};

fn competitor(id: &str, team_id: &str, abbrev: &str, score: u32) -> Competitor {
    Competitor {
        id: id.to_owned(),
        team: Team {
            id: team_id.to_owned(),
            name: abbrev.to_owned(),
            abbreviation: abbrev.to_owned(),
            display_name: format!("Team {abbrev}"),
            ..Team::default()
        },
        score,
        timeouts: 3,
        ..Competitor::default()
    }
}

/// Two-competitor game: away side answers to `c1`/`1`/`A`, home side to
/// `c2`/`2`/`B`.
pub fn game(id: &str, league: League, status: GameStatus) -> Game {
    Game {
        id: id.to_owned(),
        league,
        status,
        competitions: vec![Competition {
            id: format!("comp-{id}"),
            competitors: vec![competitor("c1", "1", "A", 0), competitor("c2", "2", "B", 0)],
            ..Competition::default()
        }],
        ..Game::default()
    }
}

pub fn game_with_scores(
    id: &str,
    league: League,
    status: GameStatus,
    away: u32,
    home: u32,
) -> Game {
    let mut game = game(id, league, status);
    game.competitions[0].competitors[0].score = away;
    game.competitions[0].competitors[1].score = home;
    game
}

pub fn set_possession(game: &mut Game, ident: &str) {
    let situation = game.competitions[0]
        .situation
        .get_or_insert_with(Situation::default);
    situation.possession = Some(ident.to_owned());
}

pub fn set_curated_rank(game: &mut Game, competitor: usize, rank: u8) {
    game.competitions[0].competitors[competitor].curated_rank = Some(rank);
}

/// Serves fixed per-league fixtures without touching the network.
pub struct FixtureSource {
    nfl: Vec<Game>,
    college: Vec<Game>,
}

impl FixtureSource {
    pub fn new(nfl: Vec<Game>, college: Vec<Game>) -> Self {
        Self { nfl, college }
    }

    pub fn nfl_only(nfl: Vec<Game>) -> Self {
        Self::new(nfl, Vec::new())
    }
}

#[async_trait]
impl ScoreboardSource for FixtureSource {
    async fn fetch_scoreboard(&self, league: League) -> ApiResult<Vec<Game>> {
        let games = match league {
            League::Nfl => &self.nfl,
            League::CollegeFootball => &self.college,
        };
        Ok(games.clone())
    }
}

/// Fails every fetch, for exercising the fallback chain.
pub struct FailingSource;

#[async_trait]
impl ScoreboardSource for FailingSource {
    async fn fetch_scoreboard(&self, _league: League) -> ApiResult<Vec<Game>> {
        Err(ApiError::Other("network down".to_owned()))
    }
}
