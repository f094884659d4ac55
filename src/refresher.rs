use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(15);

/// Sends a refresh tick on a fixed cadence — every 15 seconds by default.
/// The tick itself carries no data; the receiver decides what to refresh.
pub struct PeriodicRefresher {
    ticks: mpsc::Sender<()>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(ticks: mpsc::Sender<()>, period: Duration) -> Self {
        Self { ticks, period }
    }

    pub async fn run(self) {
        let mut refresh_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            if self.ticks.send(()).await.is_err() {
                break;
            }
        }
    }
}
