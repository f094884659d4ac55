//! Combined NFL + college football scoreboard: refreshes both league pollers
//! together and presents one filtered view over their games.

use crate::poller::{LeaguePoller, ScoreboardSource};
use crate::store::FallbackStore;
use chrono::{DateTime, Utc};
use football_api::{Game, League};
use std::sync::Arc;
use tracing::info;

/// Which slice of the combined board is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Only in-progress games, across both leagues.
    Live,
    /// Everything, across both leagues.
    #[default]
    All,
    /// One league, all of its buckets.
    League(League),
}

impl ViewMode {
    /// Parse a mode name as given on the command line or in the environment.
    pub fn parse(value: &str) -> Option<ViewMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => Some(ViewMode::Live),
            "all" => Some(ViewMode::All),
            "nfl" => Some(ViewMode::League(League::Nfl)),
            "college" | "college-football" | "ncaaf" => {
                Some(ViewMode::League(League::CollegeFootball))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Live => f.write_str("live"),
            ViewMode::All => f.write_str("all"),
            ViewMode::League(league) => f.write_str(league.api_path()),
        }
    }
}

/// The three display buckets, already filtered for the active view.
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    pub live: Vec<Game>,
    pub upcoming: Vec<Game>,
    pub completed: Vec<Game>,
}

impl Buckets {
    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.upcoming.is_empty() && self.completed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.completed.len()
    }
}

/// Aggregates both league pollers behind a single view.
///
/// Starts in [`ViewMode::All`] and switches itself to [`ViewMode::Live`]
/// whenever the mode lands on `All` while any in-progress game exists; the
/// nudge is re-evaluated after every refresh and on every mode change. A
/// single-league mode is never overridden.
pub struct CombinedScoreboard {
    nfl: LeaguePoller,
    college: LeaguePoller,
    view_mode: ViewMode,
    top25_only: bool,
}

impl CombinedScoreboard {
    pub fn new(source: Arc<dyn ScoreboardSource>, store: Arc<dyn FallbackStore>) -> Self {
        Self {
            nfl: LeaguePoller::new(League::Nfl, source.clone(), store.clone()),
            college: LeaguePoller::new(League::CollegeFootball, source, store),
            view_mode: ViewMode::default(),
            top25_only: false,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.nudge_to_live();
    }

    pub fn top25_only(&self) -> bool {
        self.top25_only
    }

    pub fn set_top25_only(&mut self, enabled: bool) {
        self.top25_only = enabled;
    }

    pub fn nfl(&self) -> &LeaguePoller {
        &self.nfl
    }

    pub fn college(&self) -> &LeaguePoller {
        &self.college
    }

    /// Refresh both leagues concurrently, then apply the live auto-switch.
    pub async fn refresh(&mut self) {
        let (nfl, college) = (&mut self.nfl, &mut self.college);
        tokio::join!(nfl.refresh(), college.refresh());
        self.nudge_to_live();
    }

    fn nudge_to_live(&mut self) {
        if matches!(self.view_mode, ViewMode::All) && self.has_live_games() {
            info!("live games found, switching view to live");
            self.view_mode = ViewMode::Live;
        }
    }

    pub fn has_live_games(&self) -> bool {
        self.nfl.has_live_games() || self.college.has_live_games()
    }

    /// True while either league is mid-fetch.
    pub fn loading(&self) -> bool {
        self.nfl.loading() || self.college.loading()
    }

    /// First error across the leagues, NFL checked first.
    pub fn error(&self) -> Option<&str> {
        self.nfl.error().or_else(|| self.college.error())
    }

    /// Most recent update instant across both leagues.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        match (self.nfl.last_updated(), self.college.last_updated()) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    fn pollers(&self) -> [&LeaguePoller; 2] {
        [&self.nfl, &self.college]
    }

    /// Build the display buckets for the active view mode.
    ///
    /// NFL ordering comes before college within each bucket. Games whose
    /// competition has fewer than two competitors are incomplete data and are
    /// dropped here, so consumers never see a one-sided matchup. When the
    /// top-25 filter is on, unranked college matchups are dropped from the
    /// live and completed buckets; upcoming games are kept so the full slate
    /// stays visible, and NFL games are never rank-filtered.
    pub fn buckets(&self) -> Buckets {
        let mut buckets = Buckets::default();
        for poller in self.pollers() {
            let included = match self.view_mode {
                ViewMode::Live | ViewMode::All => true,
                ViewMode::League(league) => poller.league() == league,
            };
            if !included {
                continue;
            }
            buckets
                .live
                .extend(poller.live_games().into_iter().cloned());
            if !matches!(self.view_mode, ViewMode::Live) {
                buckets
                    .upcoming
                    .extend(poller.upcoming_games().into_iter().cloned());
                buckets
                    .completed
                    .extend(poller.completed_games().into_iter().cloned());
            }
        }

        for bucket in [&mut buckets.live, &mut buckets.upcoming, &mut buckets.completed] {
            bucket.retain(Game::is_renderable);
        }

        if self.top25_only {
            let keep = |g: &Game| g.league != League::CollegeFootball || g.has_top25_competitor();
            buckets.live.retain(keep);
            buckets.completed.retain(keep);
        }

        buckets
    }
}
