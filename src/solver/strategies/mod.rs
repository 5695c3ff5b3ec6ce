pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod gbfs;
pub mod idastar;
pub mod mcts;

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Error};

use crate::board::Board;
use crate::solver::budget::SearchBudget;

/// Cooperative cancellation flag. Workers poll this at each expansion step;
/// the coordinator flips it once enough solutions have arrived. This stands
/// in for forceful worker termination, since Rust threads cannot be killed
/// from the outside.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A single search strategy over the click-induced state graph.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Searches from `initial` within `budget`, polling `cancel` between
    /// expansions. Returns the best (or only) solved board found, if any.
    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board>;
}

/// Enumerates the seven strategy families, used by the CLI to select which
/// strategies the coordinator should run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Dfs,
    Bfs,
    Gbfs,
    AStar,
    EnhancedAStar,
    IdaStar,
    Mcts,
}

impl StrategyKind {
    pub fn all() -> Vec<StrategyKind> {
        vec![
            StrategyKind::Dfs,
            StrategyKind::Bfs,
            StrategyKind::Gbfs,
            StrategyKind::AStar,
            StrategyKind::EnhancedAStar,
            StrategyKind::IdaStar,
            StrategyKind::Mcts,
        ]
    }

    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Dfs => Box::new(dfs::Dfs),
            StrategyKind::Bfs => Box::new(bfs::Bfs),
            StrategyKind::Gbfs => Box::new(gbfs::Gbfs),
            StrategyKind::AStar => Box::new(astar::AStar::wrong()),
            StrategyKind::EnhancedAStar => Box::new(astar::AStar::enhanced()),
            StrategyKind::IdaStar => Box::new(idastar::IdaStar),
            StrategyKind::Mcts => Box::new(mcts::Mcts),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" => Ok(StrategyKind::Dfs),
            "bfs" => Ok(StrategyKind::Bfs),
            "gbfs" => Ok(StrategyKind::Gbfs),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            "enhanced-astar" | "ea*" => Ok(StrategyKind::EnhancedAStar),
            "idastar" | "ida*" => Ok(StrategyKind::IdaStar),
            "mcts" => Ok(StrategyKind::Mcts),
            _ => Err(anyhow!("unrecognized strategy {s}")),
        }
    }
}
