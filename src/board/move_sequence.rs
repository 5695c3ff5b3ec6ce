use itertools::Itertools;

use super::position::Position;

/// The append-only log of clicks played on a board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSequence {
    moves: Vec<Position>,
}

impl MoveSequence {
    pub fn new() -> MoveSequence {
        MoveSequence::default()
    }

    pub fn push(&mut self, pos: Position) {
        self.moves.push(pos);
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.moves
    }

    /// Canonical move-string form: `<letter><row+1>` per move, comma-joined.
    pub fn notate(&self) -> String {
        self.moves.iter().map(|p| p.to_string()).join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_advances_len_and_preserves_order() {
        let mut seq = MoveSequence::new();
        seq.push(Position::new(0, 0));
        seq.push(Position::new(1, 2));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.as_slice(), &[Position::new(0, 0), Position::new(1, 2)]);
    }

    #[test]
    fn notate_joins_with_commas() {
        let mut seq = MoveSequence::new();
        seq.push(Position::new(2, 1)); // B3
        seq.push(Position::new(0, 0)); // A1
        seq.push(Position::new(1, 3)); // D2
        assert_eq!(seq.notate(), "B3,A1,D2");
    }
}
