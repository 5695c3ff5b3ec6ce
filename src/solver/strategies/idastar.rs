use std::collections::HashSet;
use std::time::Instant;

use super::{CancelToken, Strategy};
use crate::board::Board;
use crate::solver::budget::SearchBudget;
use crate::solver::heuristics::h_wrong;

/// Iterative-deepening A*. Each iteration is a depth-first search bounded by
/// an f-cost threshold; nodes with `f = g + h > bound` are pruned, and the
/// smallest such overflowing `f` becomes next iteration's bound. Dedup is by
/// the set of state hashes on the *current DFS path only* (a path set, not a
/// global visited set), which allows revisiting a state across different
/// branches while still preventing cycles.
pub struct IdaStar;

enum Outcome {
    Found(Board),
    NotFound(u64),
    TimedOut,
}

impl Strategy for IdaStar {
    fn name(&self) -> &'static str {
        "idastar"
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        let deadline = Instant::now() + budget.timeout;
        let mut bound = h_wrong(initial) as u64;

        loop {
            if bound > budget.max_steps as u64 {
                return None;
            }
            let mut path = HashSet::new();
            path.insert(initial.state_hash());
            match search(initial, 0, bound, budget.max_steps, &mut path, &deadline, cancel) {
                Outcome::Found(board) => return Some(board),
                Outcome::TimedOut => return None,
                Outcome::NotFound(next_bound) => {
                    if next_bound == u64::MAX {
                        return None;
                    }
                    bound = next_bound;
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn search(
    board: &Board,
    g: u32,
    bound: u64,
    max_steps: u32,
    path: &mut HashSet<u64>,
    deadline: &Instant,
    cancel: &CancelToken,
) -> Outcome {
    if Instant::now() > *deadline || cancel.is_cancelled() {
        return Outcome::TimedOut;
    }
    let f = g as u64 + h_wrong(board) as u64;
    if f > bound || g > max_steps {
        return Outcome::NotFound(f);
    }
    if board.is_solved() {
        return Outcome::Found(board.clone());
    }

    let mut min_exceeded = u64::MAX;
    for pos in board.legal_moves() {
        let mut next = board.clone();
        if !next.click(pos.row, pos.col) {
            continue;
        }
        let next_hash = next.state_hash();
        if path.contains(&next_hash) {
            continue;
        }
        path.insert(next_hash);
        let outcome = search(&next, g + 1, bound, max_steps, path, deadline, cancel);
        path.remove(&next_hash);

        match outcome {
            Outcome::Found(solved) => return Outcome::Found(solved),
            Outcome::TimedOut => return Outcome::TimedOut,
            Outcome::NotFound(next_f) => {
                min_exceeded = min_exceeded.min(next_f);
            }
        }
    }
    Outcome::NotFound(min_exceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color, Direction, Modifier};
    use crate::solver::budget::SearchBudget;

    #[test]
    fn solves_single_arrow_board() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let solved = IdaStar.solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().notate(), "A1");
    }

    #[test]
    fn bound_exceeding_max_steps_returns_none() {
        let cells = vec![Cell::new(Color::Red, Modifier::Empty)];
        let board = Board::new(1, 1, cells).unwrap();
        let budget = SearchBudget { max_steps: 0, ..SearchBudget::default() };
        assert!(IdaStar.solve(&board, &budget, &CancelToken::new()).is_none());
    }

    #[test]
    fn cancellation_yields_none_instead_of_hanging() {
        let cells = vec![Cell::new(Color::Red, Modifier::Empty)];
        let board = Board::new(1, 1, cells).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(IdaStar.solve(&board, &SearchBudget::default(), &cancel).is_none());
    }
}
