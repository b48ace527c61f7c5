//! Finds the first block height at which two explorer services disagree.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use crate::rpc::{BlockExplorer, RpcError};

pub mod config;
pub mod diff;

pub use config::{ExplorerConfigError, ExplorerDiffConfig};
pub use diff::{diff_json, Difference, DifferenceKind};


/// First height at which both services returned a block and the blocks differ
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    pub height: u64,
    pub differences: Vec<Difference>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WatchOutcome {
    Diverged(Divergence),
    /// Every height up to and including `last_height` matched
    Exhausted { last_height: u64 },
    Cancelled { next_height: u64 },
}

/// Walks block heights upwards, comparing the detailed block from two explorers.
///
/// A height that either side rejects (typically not produced yet) is retried after
/// `poll_interval`. Transport and decoding failures stop the walk.
pub struct DivergenceWatcher<L, R> {
    left: L,
    right: R,
    start_height: u64,
    end_height: Option<u64>,
    poll_interval: Duration,
}

impl<L: BlockExplorer, R: BlockExplorer> DivergenceWatcher<L, R> {
    pub fn new(left: L, right: R, start_height: u64, poll_interval: Duration) -> Self {
        Self {
            left,
            right,
            start_height,
            end_height: None,
            poll_interval,
        }
    }

    /// Stops the walk after `end_height` instead of polling forever.
    pub fn with_end_height(mut self, end_height: u64) -> Self {
        self.end_height = Some(end_height);
        self
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<WatchOutcome, RpcError> {
        let mut height = self.start_height;
        loop {
            if let Some(end) = self.end_height {
                if height > end {
                    return Ok(WatchOutcome::Exhausted { last_height: end });
                }
            }
            if cancel.is_cancelled() {
                return Ok(WatchOutcome::Cancelled { next_height: height });
            }

            let (left, right) = futures::join!(
                self.left.block_detailed(height),
                self.right.block_detailed(height)
            );
            match (left, right) {
                (Ok(left), Ok(right)) => {
                    let differences = diff_json(&left, &right);
                    if !differences.is_empty() {
                        return Ok(WatchOutcome::Diverged(Divergence {
                            height,
                            differences,
                        }));
                    }
                    tracing::debug!(height, "Blocks match");
                    height += 1;
                }
                (Err(e), _) | (_, Err(e)) => {
                    if !e.is_service_rejection() {
                        return Err(e);
                    }
                    tracing::debug!(height, error = %e, "Block not available yet");
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            return Ok(WatchOutcome::Cancelled { next_height: height });
                        }
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
            }
        }
    }
}
