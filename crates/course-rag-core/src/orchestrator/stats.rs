//! Per-orchestrator call statistics

use serde::{Deserialize, Serialize};

/// Counters describing how queries used the round budget
///
/// Owned by one `RoundOrchestrator`; never reset automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStatistics {
    /// Every `generate_response` call, whatever its outcome
    pub total_queries: u64,
    /// Queries that used more than one round
    pub multi_round_queries: u64,
    /// Queries in which at least one tool dispatch failed
    pub tool_failures: u64,
    /// Queries finalized with the whole round budget spent
    pub max_rounds_reached: u64,
}

impl CallStatistics {
    pub(crate) fn record_start(&mut self) {
        self.total_queries += 1;
    }

    pub(crate) fn record_outcome(&mut self, rounds_used: usize, had_tool_errors: bool, reached_max: bool) {
        if rounds_used > 1 {
            self.multi_round_queries += 1;
        }
        if had_tool_errors {
            self.tool_failures += 1;
        }
        if reached_max {
            self.max_rounds_reached += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_and_recorded_stats() {
        let mut stats = CallStatistics::default();
        assert_eq!(stats.total_queries, 0);

        stats.record_start();
        stats.record_outcome(2, true, true);
        stats.record_start();
        stats.record_outcome(1, false, false);

        assert_eq!(
            stats,
            CallStatistics {
                total_queries: 2,
                multi_round_queries: 1,
                tool_failures: 1,
                max_rounds_reached: 1,
            }
        );
    }
}
