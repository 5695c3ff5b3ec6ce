use std::collections::{BTreeSet, HashSet};

use super::gbfs::Entry;
use super::{CancelToken, Strategy};
use crate::board::Board;
use crate::solver::budget::SearchBudget;
use crate::solver::heuristics::Heuristic;

/// Branch-and-bound priority search ordered by `g + h`, where `g` is the
/// number of moves so far and `h` is either `h_wrong` (plain A*) or
/// `h_enhanced` (Enhanced A*). Dedup and eviction policy match
/// [`super::gbfs::Gbfs`].
pub struct AStar {
    heuristic: Heuristic,
    label: &'static str,
}

impl AStar {
    pub fn wrong() -> AStar {
        AStar { heuristic: Heuristic::Wrong, label: "astar" }
    }

    pub fn enhanced() -> AStar {
        AStar { heuristic: Heuristic::Enhanced, label: "enhanced-astar" }
    }
}

impl Strategy for AStar {
    fn name(&self) -> &'static str {
        self.label
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        let mut frontier: BTreeSet<Entry> = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut seq = 0u64;

        visited.insert(initial.depth_keyed_hash());
        let initial_priority = initial.moves().len() as u32 + self.heuristic.evaluate(initial);
        frontier.insert(Entry { priority: initial_priority, seq, board: initial.clone() });
        seq += 1;

        while let Some(entry) = frontier.pop_first() {
            if cancel.is_cancelled() {
                return None;
            }
            let board = entry.board;
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
                let priority = next.moves().len() as u32 + self.heuristic.evaluate(&next);
                frontier.insert(Entry { priority, seq, board: next });
                seq += 1;
                if frontier.len() > budget.max_queue_size {
                    frontier.pop_last();
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
    fn plain_astar_solves_single_arrow_board() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let solved = AStar::wrong().solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().notate(), "A1");
    }

    #[test]
    fn enhanced_astar_solves_bomb_board() {
        let mut cells = vec![Cell::new(Color::Orange, Modifier::Empty); 9];
        cells[4] = Cell::new(Color::Orange, Modifier::Bomb);
        let board = Board::new(3, 3, cells).unwrap();
        let solved = AStar::enhanced().solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().notate(), "B2");
    }
}
