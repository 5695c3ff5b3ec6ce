use std::collections::HashSet;

use super::{CancelToken, Strategy};
use crate::board::Board;
use crate::solver::budget::SearchBudget;

/// Recursive exploration, pruning past `max_steps`, deduplicating on a plain
/// (depth-agnostic) visited set, and tracking the best solve seen across the
/// whole tree rather than stopping at the first one. No-op clicks
/// (`changed? = false`) are skipped rather than recursed into, so the move
/// counter never advances on a wasted click.
pub struct Dfs;

impl Strategy for Dfs {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn solve(&self, initial: &Board, budget: &SearchBudget, cancel: &CancelToken) -> Option<Board> {
        let mut visited = HashSet::new();
        let mut best: Option<Board> = None;
        recurse(initial, budget, cancel, &mut visited, &mut best);
        best
    }
}

fn recurse(board: &Board, budget: &SearchBudget, cancel: &CancelToken, visited: &mut HashSet<u64>, best: &mut Option<Board>) {
    if cancel.is_cancelled() {
        return;
    }
    if board.moves().len() as u32 > budget.max_steps {
        return;
    }
    if board.is_solved() {
        if best.as_ref().is_none_or(|b| board.moves().len() < b.moves().len()) {
            *best = Some(board.clone());
        }
        return;
    }
    if !visited.insert(board.state_hash()) {
        return;
    }
    for pos in board.legal_moves() {
        if cancel.is_cancelled() {
            return;
        }
        let mut next = board.clone();
        if !next.click(pos.row, pos.col) {
            continue;
        }
        recurse(&next, budget, cancel, visited, best);
    }
}
