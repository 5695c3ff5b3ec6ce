use anyhow::{anyhow, Error};
use std::str::FromStr;

use super::position::Position;

/// A cell's paintable color. `None` is the "no color" value `0` from the level format.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    None = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Orange = 4,
    Dark = 5,
}

impl Color {
    pub fn is_playable(&self) -> bool {
        *self != Color::None
    }

    pub fn notate(&self) -> char {
        match self {
            Color::None => '0',
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Orange => 'o',
            Color::Dark => 'd',
        }
    }
}

impl FromStr for Color {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Color::None),
            "r" => Ok(Color::Red),
            "g" => Ok(Color::Green),
            "b" => Ok(Color::Blue),
            "o" => Ok(Color::Orange),
            "d" => Ok(Color::Dark),
            _ => Err(anyhow!("invalid notation {s} for Color")),
        }
    }
}

/// One of the four directions a static or rotating arrow can fire.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// `(dr, dc)` step for one advance in this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Rotation cycle for rotating arrows: `w -> x -> s -> a -> w`, i.e.
    /// `Up -> Right -> Down -> Left -> Up`.
    pub fn rotated(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// The behavioral type of a grid cell. A single mutable field: clicks can
/// overwrite it with a different variant (a bomb can paint over an arrow, a
/// ray can paint or erase a plain cell), so this is not fixed for the
/// lifetime of a cell the way `color` is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    /// `0` - empty, paintable.
    Empty,
    /// `X` - inert, never mutated by any rule.
    Wall,
    /// a color letter - already painted with that color.
    Painted(Color),
    /// `U|D|L|R` - clickable, shoots a static ray.
    StaticArrow(Direction),
    /// `B` - clickable, paints its 3x3 neighborhood.
    Bomb,
    /// `F` - clickable, toggles a 4-connected region.
    Flood,
    /// `w|s|a|x` - clickable, fires like the corresponding static arrow then rotates.
    RotatingArrow(Direction),
}

impl Modifier {
    /// The clickable set is `{L,R,U,D,w,s,a,x,F,B}`.
    pub fn is_clickable(&self) -> bool {
        matches!(
            self,
            Modifier::StaticArrow(_) | Modifier::Bomb | Modifier::Flood | Modifier::RotatingArrow(_)
        )
    }

    pub fn notate(&self) -> char {
        match self {
            Modifier::Empty => '0',
            Modifier::Wall => 'X',
            Modifier::Painted(c) => c.notate(),
            Modifier::StaticArrow(Direction::Up) => 'U',
            Modifier::StaticArrow(Direction::Down) => 'D',
            Modifier::StaticArrow(Direction::Left) => 'L',
            Modifier::StaticArrow(Direction::Right) => 'R',
            Modifier::Bomb => 'B',
            Modifier::Flood => 'F',
            Modifier::RotatingArrow(Direction::Up) => 'w',
            Modifier::RotatingArrow(Direction::Down) => 's',
            Modifier::RotatingArrow(Direction::Left) => 'a',
            Modifier::RotatingArrow(Direction::Right) => 'x',
        }
    }
}

impl FromStr for Modifier {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Modifier::Empty),
            "X" => Ok(Modifier::Wall),
            "r" => Ok(Modifier::Painted(Color::Red)),
            "g" => Ok(Modifier::Painted(Color::Green)),
            "b" => Ok(Modifier::Painted(Color::Blue)),
            "o" => Ok(Modifier::Painted(Color::Orange)),
            "d" => Ok(Modifier::Painted(Color::Dark)),
            "U" => Ok(Modifier::StaticArrow(Direction::Up)),
            "D" => Ok(Modifier::StaticArrow(Direction::Down)),
            "L" => Ok(Modifier::StaticArrow(Direction::Left)),
            "R" => Ok(Modifier::StaticArrow(Direction::Right)),
            "B" => Ok(Modifier::Bomb),
            "F" => Ok(Modifier::Flood),
            "w" => Ok(Modifier::RotatingArrow(Direction::Up)),
            "s" => Ok(Modifier::RotatingArrow(Direction::Down)),
            "a" => Ok(Modifier::RotatingArrow(Direction::Left)),
            "x" => Ok(Modifier::RotatingArrow(Direction::Right)),
            _ => Err(anyhow!("invalid notation {s} for Modifier")),
        }
    }
}

/// A single grid cell: a color attribute (the correctness target, and the
/// paint color a clickable cell shoots) plus a mutable modifier and an
/// optional reachability constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    pub modifier: Modifier,
    pub only_reachable_from: Position,
}

impl Cell {
    pub fn new(color: Color, modifier: Modifier) -> Cell {
        Cell { color, modifier, only_reachable_from: super::position::NONE_POS }
    }

    /// Whether this cell satisfies its correctness predicate: unplayable
    /// colors are always correct, otherwise the cell must be painted its
    /// own color.
    pub fn is_correct(&self) -> bool {
        if !self.color.is_playable() {
            return true;
        }
        match self.modifier {
            Modifier::Painted(c) => c == self.color,
            _ => self.modifier != Modifier::Empty,
        }
    }

    pub fn is_clickable_at(&self, coord: Position) -> bool {
        self.modifier.is_clickable() && (self.only_reachable_from.is_none() || self.only_reachable_from == coord)
    }
}

/// Optional heuristic hints for a cell, used only by [`crate::solver::heuristics::h_enhanced`].
/// Absent hints contribute nothing beyond the base `1` per incorrect cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellHint {
    pub is_bomb: bool,
    pub target_position: Option<Position>,
}
