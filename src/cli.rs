use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::levels::LevelFile;
use crate::render;
use crate::solver::{coordinator, CoordinatorConfig, SearchBudget, StrategyKind};
use crate::utils::prelude::*;

/// Either a single level number or "N+" meaning N and every level after it.
#[derive(Clone, Debug)]
pub enum LevelSelector {
    Single(u32),
    From(u32),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid level selector `{0}`, expected a number or \"N+\"")]
pub struct LevelSelectorError(String);

impl std::str::FromStr for LevelSelector {
    type Err = LevelSelectorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.strip_suffix('+') {
            Some(prefix) => {
                prefix.parse::<u32>().map(LevelSelector::From).map_err(|_| LevelSelectorError(s.to_string()))
            }
            None => s.parse::<u32>().map(LevelSelector::Single).map_err(|_| LevelSelectorError(s.to_string())),
        }
    }
}

impl LevelSelector {
    fn matches(&self, number: u32) -> bool {
        match self {
            LevelSelector::Single(n) => *n == number,
            LevelSelector::From(n) => number >= *n,
        }
    }
}

/// Solves levels from a level file, parsed in `main` as a
/// `clap::Parser` derive struct.
#[derive(Parser, Debug)]
#[command(name = "clickgrid", about = "Solves colored-grid click puzzles")]
pub struct Cli {
    /// Path to a `<levels>` XML file.
    pub levels_file: PathBuf,

    /// A single level number, or "N+" for N onward.
    pub level: LevelSelector,

    /// Strategies to race; defaults to all seven.
    #[arg(long, value_delimiter = ',')]
    pub strategies: Vec<StrategyKind>,

    /// Number of solutions to collect before cancelling the rest.
    #[arg(long, default_value_t = 2)]
    pub k: usize,

    #[arg(long)]
    pub max_steps: Option<u32>,

    #[arg(long)]
    pub max_queue_size: Option<usize>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the board before and after solving each level.
    #[arg(long)]
    pub render: bool,

    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Cli {
    fn search_budget(&self) -> SearchBudget {
        let defaults = SearchBudget::default();
        SearchBudget {
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            max_queue_size: self.max_queue_size.unwrap_or(defaults.max_queue_size),
            timeout: self.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
            mcts_seed: defaults.mcts_seed,
        }
    }

    fn coordinator_config(&self) -> CoordinatorConfig {
        let strategies = if self.strategies.is_empty() { StrategyKind::all() } else { self.strategies.clone() };
        CoordinatorConfig { strategies, k: self.k.max(1) }
    }
}

/// Iterates the selected levels, races the coordinator on each, and writes
/// the shortest solution found back into the level file. Per-level failures
/// are logged and skipped rather than aborting the whole run.
pub fn run(cli: &Cli) -> Result<()> {
    let mut file = LevelFile::parse(&cli.levels_file).context("parsing level file")?;
    let budget = cli.search_budget();
    let config = cli.coordinator_config();

    let selected: Vec<usize> =
        file.levels.iter().enumerate().filter(|(_, level)| cli.level.matches(level.number)).map(|(i, _)| i).collect();

    if selected.is_empty() {
        log::warn!("no levels in {} matched the given selector", cli.levels_file.display());
    }

    for idx in selected {
        let number = file.levels[idx].number;
        let initial = file.levels[idx].board.clone();

        if cli.render {
            println!("level {number}:\n{}", render::render(&initial));
        }

        match coordinator::solve(&initial, &budget, &config) {
            Some(solved) => {
                let prior_len = file.levels[idx].solution.as_ref().map(|s| s.len());
                if prior_len.is_none_or(|n| solved.moves().len() < n) {
                    log::info!("level {number}: solved in {} moves ({})", solved.moves().len(), solved.moves().notate());
                    if cli.render {
                        println!("{}", render::render(&solved));
                    }
                    file.levels[idx].solution = Some(solved.moves().clone());
                } else {
                    log::info!("level {number}: found a solution, but not shorter than the one already stored");
                }
            }
            None => {
                log::warn!("level {number}: no strategy solved the board within budget");
            }
        }
    }

    file.write(&cli.levels_file).context("writing level file")?;
    Ok(())
}
