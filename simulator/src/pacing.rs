use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::config::PacingMode;

/// Stand-in deadline for intervals too long to represent as an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Spaces rounds so the simulation approaches the configured submission rate.
#[derive(Debug, Clone)]
pub struct Pacer {
    mode: PacingMode,
    interval: Duration,
    /// Deadline of the previous round, only tracked in `Deadline` mode
    last_deadline: Option<Instant>,
}

impl Pacer {
    pub fn new(mode: PacingMode, interval: Duration) -> Self {
        Self {
            mode,
            interval,
            last_deadline: None,
        }
    }

    /// Anchors the deadline schedule at `start` instead of the end of the first round.
    pub fn start_at(&mut self, start: Instant) {
        self.last_deadline = Some(start);
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time to wait when the current round's work finished at `now`.
    pub fn delay_from(&mut self, now: Instant) -> Duration {
        match self.mode {
            PacingMode::Fixed => self.interval,
            PacingMode::Deadline => {
                let previous = self.last_deadline.unwrap_or(now);
                // A round that overran its slot starts the next one immediately
                let deadline = previous
                    .checked_add(self.interval)
                    .unwrap_or_else(|| now + FAR_FUTURE)
                    .max(now);
                self.last_deadline = Some(deadline);
                deadline - now
            }
        }
    }

    /// Sleeps until the next round is due. Returns `false` if cancelled while waiting.
    pub async fn wait(&mut self, cancel: &CancellationToken) -> bool {
        let delay = self.delay_from(Instant::now());
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }
}
