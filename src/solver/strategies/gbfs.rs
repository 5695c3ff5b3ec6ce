use std::collections::{BTreeSet, HashSet};

use super::{CancelToken, Strategy};
use crate::board::Board;
use crate::solver::budget::SearchBudget;
use crate::solver::heuristics::h_wrong;

/// An entry in a priority frontier, ordered by `priority` then by insertion
/// order (`seq`) as a deterministic tie-break, so the same initial board
/// always expands moves in the same order.
#[derive(Clone)]
pub(super) struct Entry {
    pub priority: u32,
    pub seq: u64,
    pub board: Board,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}
impl Eq for Entry {}
impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cmp(&other.priority).then(self.seq.cmp(&other.seq))
    }
}

/// Priority queue ordered by `h(b)` alone (no path cost). Same
/// `(hash, depth)` dedup as BFS; over-cap insertion evicts the
/// worst-priority (highest `h`) entry rather than the oldest one.
pub struct Gbfs;

impl Strategy for Gbfs {
    fn name(&self) -> &'static str {
        "gbfs"
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        let mut frontier: BTreeSet<Entry> = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut seq = 0u64;

        visited.insert(initial.depth_keyed_hash());
        frontier.insert(Entry { priority: h_wrong(initial), seq, board: initial.clone() });
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
                let priority = h_wrong(&next);
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
    fn solves_single_arrow_board() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::StaticArrow(Direction::Right)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        let solved = Gbfs.solve(&board, &SearchBudget::default(), &CancelToken::new()).unwrap();
        assert_eq!(solved.moves().notate(), "A1");
    }

    #[test]
    fn worst_priority_eviction_keeps_the_search_bounded() {
        let cells = vec![
            Cell::new(Color::Green, Modifier::Bomb),
            Cell::new(Color::Green, Modifier::Empty),
            Cell::new(Color::Green, Modifier::StaticArrow(Direction::Left)),
        ];
        let board = Board::new(1, 3, cells).unwrap();
        let budget = SearchBudget { max_queue_size: 1, ..SearchBudget::default() };
        let _ = Gbfs.solve(&board, &budget, &CancelToken::new());
    }
}
