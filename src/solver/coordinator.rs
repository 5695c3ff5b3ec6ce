use std::panic;
use std::sync::mpsc;
use std::time::Duration;

use crate::board::Board;
use crate::solver::budget::SearchBudget;
use crate::solver::strategies::{CancelToken, StrategyKind};

/// Which strategies to race and how many solutions to collect before
/// cancelling the rest.
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    pub strategies: Vec<StrategyKind>,
    pub k: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig { strategies: StrategyKind::all(), k: 1 }
    }
}

/// Runs every configured strategy concurrently on its own clone of `initial`,
/// collects solved boards as they complete, and cancels the remaining
/// workers once `k` solutions have arrived. Returns the shortest of the
/// collected solutions, or `None` if no strategy solved the board before its
/// budget ran out.
///
/// A worker that panics is caught rather than poisoning the race: its result
/// is simply dropped, the same way the rest of the crate prefers a graceful
/// `Result`/`Option` path over letting a thread panic bring anything else
/// down.
pub fn solve(initial: &Board, budget: &SearchBudget, config: &CoordinatorConfig) -> Option<Board> {
    if config.strategies.is_empty() || config.k == 0 {
        return None;
    }

    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();

    std::thread::scope(|scope| {
        for kind in &config.strategies {
            let tx = tx.clone();
            let cancel = cancel.clone();
            let budget = *budget;
            let initial = initial.clone();
            let kind = *kind;

            scope.spawn(move || {
                let strategy = kind.build();
                let name = strategy.name();
                let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| strategy.solve(&initial, &budget, &cancel)));
                match outcome {
                    Ok(result) => {
                        let _ = tx.send(result);
                    }
                    Err(_) => {
                        log::warn!("strategy {name} panicked; treating as no solution");
                        let _ = tx.send(None);
                    }
                }
            });
        }
        drop(tx);

        let mut solutions: Vec<Board> = Vec::new();
        let mut remaining = config.strategies.len();

        while remaining > 0 {
            match rx.recv_timeout(budget.timeout + Duration::from_millis(250)) {
                Ok(Some(board)) => {
                    solutions.push(board);
                    if solutions.len() >= config.k {
                        cancel.cancel();
                    }
                }
                Ok(None) => {}
                Err(_) => break,
            }
            remaining -= 1;
        }

        solutions.into_iter().min_by_key(|b| b.moves().len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color, Direction, Modifier};

    #[test]
    fn races_all_strategies_and_returns_shortest_solution() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let config = CoordinatorConfig { strategies: vec![StrategyKind::Dfs, StrategyKind::Bfs], k: 1 };
        let solved = solve(&board, &SearchBudget::default(), &config).unwrap();
        assert_eq!(solved.moves().notate(), "A1");
    }

    #[test]
    fn empty_strategy_list_yields_none() {
        let cells = vec![Cell::new(Color::None, Modifier::Wall)];
        let board = Board::new(1, 1, cells).unwrap();
        let config = CoordinatorConfig { strategies: vec![], k: 1 };
        assert!(solve(&board, &SearchBudget::default(), &config).is_none());
    }

    #[test]
    fn unsolvable_board_returns_none_without_hanging() {
        let cells = vec![Cell::new(Color::Red, Modifier::Wall)];
        let board = Board::new(1, 1, cells).unwrap();
        let config = CoordinatorConfig { strategies: vec![StrategyKind::Dfs, StrategyKind::Bfs], k: 1 };
        assert!(solve(&board, &SearchBudget::default(), &config).is_none());
    }
}
