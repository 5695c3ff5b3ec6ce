use std::time::Duration;

/// Shared time/queue/depth budget passed to every strategy. One struct
/// rather than a positional tuple of per-strategy limits, so the
/// coordinator can hand every worker the same value and each strategy
/// reads only the fields it needs.
#[derive(Clone, Copy, Debug)]
pub struct SearchBudget {
    pub max_steps: u32,
    pub max_queue_size: usize,
    pub timeout: Duration,
    /// Seed for strategies that consume randomness (MCTS). Fixed so test
    /// runs are reproducible.
    pub mcts_seed: u64,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget {
            max_steps: 100,
            max_queue_size: 100_000,
            timeout: Duration::from_secs(60),
            mcts_seed: 0xC0FFEE,
        }
    }
}
