//! Game-state change detection: compares successive polled snapshots of a
//! single game to infer score changes and turnovers.

use football_api::Game;

/// Result of comparing one snapshot against the previously observed one.
/// Scores are `(team1, team2)` in competitor order (away, home).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameChanges {
    pub score_changed: bool,
    pub turnover_detected: bool,
    pub possession_changed: bool,
    pub previous_scores: Option<(u32, u32)>,
    pub current_scores: Option<(u32, u32)>,
}

/// One-slot comparison memory for a single logical game.
///
/// The caller owns one detector per tracked game id and feeds it every polled
/// snapshot. Passing `None` resets the memory to the initial empty state.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    previous: Option<Game>,
    last: GameChanges,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `game` against the stored previous snapshot and remember it
    /// for the next call.
    ///
    /// A snapshot with fewer than two competitors is incomplete data: the
    /// call is a no-op and the previously computed changes are returned
    /// unchanged.
    pub fn observe(&mut self, game: Option<&Game>) -> GameChanges {
        let Some(game) = game else {
            self.previous = None;
            self.last = GameChanges::default();
            return self.last.clone();
        };

        let Some(comp) = game.competition().filter(|c| c.is_complete()) else {
            return self.last.clone();
        };
        let current_scores = (comp.competitors[0].score, comp.competitors[1].score);
        let current_possession = comp.possession_holder();

        let mut changes = GameChanges {
            current_scores: Some(current_scores),
            ..GameChanges::default()
        };

        let previous_comp = self
            .previous
            .as_ref()
            .and_then(Game::competition)
            .filter(|c| c.is_complete());
        if let Some(prev) = previous_comp {
            let previous_scores = (prev.competitors[0].score, prev.competitors[1].score);
            changes.previous_scores = Some(previous_scores);
            changes.score_changed = current_scores != previous_scores;

            // Possession is compared by resolved competitor slot, not raw
            // string: the upstream identifier format is unstable, and an
            // unresolvable value must not fake a turnover.
            if let (Some(prev_holder), Some(holder)) = (prev.possession_holder(), current_possession)
                && prev_holder != holder
            {
                changes.possession_changed = true;
                // A possession flip with simultaneous scoring (pick-six,
                // fumble return TD) classifies as a score event, not a
                // turnover.
                changes.turnover_detected = !changes.score_changed;
            }
        }

        self.last = changes.clone();
        self.previous = Some(game.clone());
        changes
    }

    pub fn reset(&mut self) {
        self.observe(None);
    }
}

type ScoreCallback = Box<dyn FnMut(u32, u32) + Send>;
type TurnoverCallback = Box<dyn FnMut() + Send>;

/// Edge-triggered wrapper around [`ChangeDetector`]: registered callbacks
/// fire only on the false→true transition between consecutive computations,
/// not on every tick where the condition still holds.
#[derive(Default)]
pub struct GameChangeNotifier {
    detector: ChangeDetector,
    previous: GameChanges,
    on_score_change: Option<ScoreCallback>,
    on_turnover: Option<TurnoverCallback>,
}

impl GameChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_score_change(mut self, callback: impl FnMut(u32, u32) + Send + 'static) -> Self {
        self.on_score_change = Some(Box::new(callback));
        self
    }

    pub fn on_turnover(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_turnover = Some(Box::new(callback));
        self
    }

    pub fn observe(&mut self, game: Option<&Game>) -> GameChanges {
        let changes = self.detector.observe(game);

        if changes.score_changed
            && !self.previous.score_changed
            && let Some((team1, team2)) = changes.current_scores
            && let Some(callback) = self.on_score_change.as_mut()
        {
            callback(team1, team2);
        }

        if changes.turnover_detected
            && !self.previous.turnover_detected
            && let Some(callback) = self.on_turnover.as_mut()
        {
            callback();
        }

        self.previous = changes.clone();
        changes
    }
}
