use std::collections::{HashSet, VecDeque};

use super::{CancelToken, Strategy};
use crate::board::Board;
use crate::solver::budget::SearchBudget;

/// FIFO frontier keyed by `(state_hash, depth)`, so a state may be revisited
/// at a shallower depth than it was first seen. The queue is capped at
/// `max_queue_size`; once full, the oldest (front) element is discarded on
/// every push — a lossy cap traded for bounded memory.
pub struct Bfs;

impl Strategy for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();
        visited.insert(initial.depth_keyed_hash());
        queue.push_back(initial.clone());

        while let Some(board) = queue.pop_front() {
            if cancel.is_cancelled() {
                return None;
            }
            if board.is_solved() {
                return Some(board);
            }
            if board.moves().len() as u32 >= budget.max_steps {
                continue;
            }
            for pos in board.legal_moves() {
                let mut next = board.clone();
                if !next.click(pos.row, pos.col) {
                    continue;
                }
                let key = next.depth_keyed_hash();
                if !visited.insert(key) {
                    continue;
                }
                queue.push_back(next);
                if queue.len() > budget.max_queue_size {
                    queue.pop_front();
                }
            }
        }
        None
    }
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
        let solved = Bfs.solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().notate(), "A1");
    }

    #[test]
    fn already_solved_board_returns_immediately() {
        let cells = vec![Cell::new(Color::None, Modifier::Wall)];
        let board = Board::new(1, 1, cells).unwrap();
        let solved = Bfs.solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().len(), 0);
    }

    #[test]
    fn tiny_queue_cap_still_terminates() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let budget = SearchBudget { max_queue_size: 1, ..SearchBudget::default() };
        // should not hang even with a pathologically small cap
        let _ = Bfs.solve(&board, &budget, &CancelToken::new());
    }
}
