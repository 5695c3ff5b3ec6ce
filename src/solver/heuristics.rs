use crate::board::{Board, Position};

/// Count of incorrect cells. Admissible only in the weak sense: not a true
/// lower bound on remaining clicks under all modifier mixes, so A* built on
/// this heuristic is an approximation rather than a guarantee of optimality.
pub fn h_wrong(board: &Board) -> u32 {
    board.incorrect_cell_count()
}

/// `sum over incorrect cells of 1 + 2*is_bomb + manhattan_to_target`, where
/// `is_bomb`/`target_position` come from optional per-cell hints; a cell with
/// no hint contributes only the base `1`.
pub fn h_enhanced(board: &Board) -> u32 {
    let mut total = 0u32;
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let cell = board.cell(pos);
            if cell.is_correct() {
                continue;
            }
            let mut contribution = 1u32;
            if let Some(hint) = board.hint(pos) {
                if hint.is_bomb {
                    contribution += 2;
                }
                if let Some(target) = hint.target_position {
                    let dr = (pos.row as i32 - target.row as i32).unsigned_abs();
                    let dc = (pos.col as i32 - target.col as i32).unsigned_abs();
                    contribution += dr + dc;
                }
            }
            total += contribution;
        }
    }
    total
}

/// Which heuristic a strategy consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Wrong,
    Enhanced,
}

impl Heuristic {
    pub fn evaluate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::Wrong => h_wrong(board),
            Heuristic::Enhanced => h_enhanced(board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color, Modifier};

    #[test]
    fn h_wrong_counts_incorrect_cells() {
        let cells = vec![
            Cell::new(Color::Red, Modifier::Painted(Color::Red)),
            Cell::new(Color::Red, Modifier::Empty),
        ];
        let board = Board::new(1, 2, cells).unwrap();
        assert_eq!(h_wrong(&board), 1);
    }

    #[test]
    fn h_enhanced_without_hints_matches_base_penalty() {
        let cells = vec![Cell::new(Color::Red, Modifier::Empty); 2];
        let board = Board::new(1, 2, cells).unwrap();
        assert_eq!(h_enhanced(&board), 2);
    }

    #[test]
    fn h_enhanced_adds_bomb_and_distance_hints() {
        use crate::board::CellHint;
        use crate::board::Position;

        let cells = vec![Cell::new(Color::Red, Modifier::Empty); 2];
        let board = Board::new(1, 2, cells)
            .unwrap()
            .with_hints(vec![
                CellHint { is_bomb: true, target_position: Some(Position::new(0, 0)) },
                CellHint::default(),
            ])
            .unwrap();
        // cell 0: incorrect, hint bomb (+2), distance to self (0) => 1 + 2 + 0 = 3
        // cell 1: incorrect, no hint => 1
        assert_eq!(h_enhanced(&board), 4);
    }
}
