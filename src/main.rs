use bigboard::board::{CombinedScoreboard, ViewMode};
use bigboard::changes::GameChangeNotifier;
use bigboard::poller::ScoreboardSource;
use bigboard::refresher::{DEFAULT_POLL_PERIOD, PeriodicRefresher};
use bigboard::store::JsonFileStore;
use bigboard::Game;
use football_api::client::FootballApi;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let api = match std::env::var("BIGBOARD_API_BASE") {
        Ok(base) => FootballApi::with_base(base),
        Err(_) => FootballApi::new(),
    };
    let source: Arc<dyn ScoreboardSource> = Arc::new(api);

    let cache_dir = std::env::var("BIGBOARD_CACHE_DIR")
        .unwrap_or_else(|_| ".bigboard-cache".to_owned());
    let store = Arc::new(JsonFileStore::new(cache_dir));

    let mut board = CombinedScoreboard::new(source, store);
    if let Ok(mode) = std::env::var("BIGBOARD_VIEW") {
        match ViewMode::parse(&mode) {
            Some(mode) => board.set_view_mode(mode),
            None => warn!("ignoring unknown BIGBOARD_VIEW value: {mode}"),
        }
    }
    if let Ok(flag) = std::env::var("BIGBOARD_TOP25") {
        board.set_top25_only(matches!(flag.as_str(), "1" | "true" | "yes"));
    }

    let period = poll_period();
    let (tick_tx, mut tick_rx) = mpsc::channel::<()>(1);
    let refresher_task = tokio::spawn(PeriodicRefresher::new(tick_tx, period).run());

    info!(period_secs = period.as_secs(), "starting scoreboard poll loop");
    let mut notifiers: HashMap<String, GameChangeNotifier> = HashMap::new();

    board.refresh().await;
    report(&board, &mut notifiers);

    loop {
        tokio::select! {
            Some(()) = tick_rx.recv() => {
                board.refresh().await;
                report(&board, &mut notifiers);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    refresher_task.abort();
    Ok(())
}

fn poll_period() -> Duration {
    match std::env::var("BIGBOARD_POLL_SECS") {
        Ok(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!("ignoring invalid BIGBOARD_POLL_SECS value: {value}");
                DEFAULT_POLL_PERIOD
            }
        },
        Err(_) => DEFAULT_POLL_PERIOD,
    }
}

/// Log the current board and run every live game through its change
/// notifier. Notifiers for games that left the live bucket are dropped, so
/// a game showing up live again later starts from a clean comparison.
fn report(board: &CombinedScoreboard, notifiers: &mut HashMap<String, GameChangeNotifier>) {
    if let Some(error) = board.error() {
        warn!("board refresh degraded: {error}");
    }

    let buckets = board.buckets();
    info!(
        view = %board.view_mode(),
        live = buckets.live.len(),
        upcoming = buckets.upcoming.len(),
        completed = buckets.completed.len(),
        "scoreboard updated"
    );

    for game in &buckets.live {
        info!("  {}", scoreline(game));
        let notifier = notifiers
            .entry(game.id.clone())
            .or_insert_with(|| notifier_for(game));
        notifier.observe(Some(game));
    }

    let live_ids: Vec<&str> = buckets.live.iter().map(|g| g.id.as_str()).collect();
    notifiers.retain(|id, _| live_ids.contains(&id.as_str()));
}

fn notifier_for(game: &Game) -> GameChangeNotifier {
    let (away, home) = team_names(game);
    let turnover_label = format!("{away} vs {home}");
    let score_label = turnover_label.clone();
    GameChangeNotifier::new()
        .on_score_change(move |team1, team2| {
            info!("score change: {score_label} is now {team1}-{team2}");
        })
        .on_turnover(move || {
            info!("turnover in {turnover_label}");
        })
}

fn team_names(game: &Game) -> (String, String) {
    match game.competition() {
        Some(comp) => {
            let label = |idx: usize| {
                comp.competitors
                    .get(idx)
                    .map(|c| c.team.abbreviation.clone())
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| "???".to_owned())
            };
            (label(0), label(1))
        }
        None => ("???".to_owned(), "???".to_owned()),
    }
}

fn scoreline(game: &Game) -> String {
    let Some(comp) = game.competition() else {
        return format!("{} ({})", game.id, game.status.label());
    };
    let (away, home) = team_names(game);
    let away_score = comp.away().map(|c| c.score).unwrap_or(0);
    let home_score = comp.home().map(|c| c.score).unwrap_or(0);
    let mut line = format!(
        "[{}] {away} {away_score} - {home} {home_score} ({})",
        game.league.label(),
        game.status.label()
    );
    if let Some(situation) = comp.situation.as_ref() {
        let dd = situation.down_and_distance();
        if !dd.is_empty() {
            line.push_str(&format!(", {dd}"));
        }
    }
    line
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("bigboard {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "bigboard - NFL + college football scoreboard poller

Usage:
  bigboard
  bigboard --help
  bigboard --version

Environment:
  BIGBOARD_API_BASE    Scoreboard API base URL override
  BIGBOARD_POLL_SECS   Poll period in seconds (default 15)
  BIGBOARD_VIEW        Initial view: live, all, nfl, college (default all)
  BIGBOARD_TOP25       Show only ranked college matchups (1/true/yes)
  BIGBOARD_CACHE_DIR   Fallback cache directory (default .bigboard-cache)
  RUST_LOG             Log filter (default info)"
}
