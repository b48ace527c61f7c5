//! Round statistics tracking for the wallet simulator.
//! Counts submitted, rejected and skipped rounds and reports them when the run ends.

use std::time::Instant;
use walletsim::types::TransactionKind;
use crate::simulation::RoundOutcome;

// ------------------------------------------------------------------------------------------------
// Statistics Tracking
// ------------------------------------------------------------------------------------------------

/// Tracks what happened to every round of a simulation run
#[derive(Debug, Clone)]
pub struct SimulatorStats {
    /// Rounds completed, whatever their outcome
    rounds: usize,
    /// Standard transactions accepted by a wallet
    standard_submitted: usize,
    /// Fusion transactions accepted by a wallet
    fusion_submitted: usize,
    /// Submissions the wallet service refused
    rejected: usize,
    /// Standard rounds skipped because the sender could not cover the cost
    skipped: usize,
    /// When the simulation started, used to calculate the submission rate
    start_time: Instant,
}

impl Default for SimulatorStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorStats {
    pub fn new() -> Self {
        Self {
            rounds: 0,
            standard_submitted: 0,
            fusion_submitted: 0,
            rejected: 0,
            skipped: 0,
            start_time: Instant::now(),
        }
    }

    /// Records the outcome of one round
    pub fn record(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        match outcome {
            RoundOutcome::Submitted { kind, .. } => match kind {
                TransactionKind::Standard => self.standard_submitted += 1,
                TransactionKind::Fusion => self.fusion_submitted += 1,
            },
            RoundOutcome::Rejected { .. } => self.rejected += 1,
            RoundOutcome::Skipped(_) => self.skipped += 1,
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn standard_submitted(&self) -> usize {
        self.standard_submitted
    }

    pub fn fusion_submitted(&self) -> usize {
        self.fusion_submitted
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn submitted(&self) -> usize {
        self.standard_submitted + self.fusion_submitted
    }

    /// Prints the final statistics including totals and rates
    pub fn print_final_stats(&self) {
        let duration = self.start_time.elapsed();
        let per_minute = if duration.as_secs_f64() > 0.0 {
            self.submitted() as f64 * 60.0 / duration.as_secs_f64()
        } else {
            0.0
        };
        let rejection_rate = if self.rounds > 0 {
            (self.rejected as f64 / self.rounds as f64) * 100.0
        } else {
            0.0
        };

        println!("\n=== Final Statistics ===");
        println!("Duration: {:.2}s", duration.as_secs_f64());
        println!("Rounds: {}", self.rounds);
        println!("Transactions Sent: {}", self.standard_submitted);
        println!("Fusion Transactions Sent: {}", self.fusion_submitted);
        println!("Rejected: {} ({:.1}%)", self.rejected, rejection_rate);
        println!("Skipped (not enough balance): {}", self.skipped);
        println!("Average Transactions Per Minute: {:.2}", per_minute);
    }
}
