use std::collections::HashSet;

use super::cell::{Color, Direction, Modifier};
use super::position::Position;
use super::Board;

const ORTHOGONAL_OFFSETS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The pure board transition function invoked by a click. Appends `(r, c)` to
/// the move sequence regardless of outcome, then dispatches on the clicked
/// cell's modifier. Returns whether the click changed any cell.
pub fn apply_click(board: &mut Board, r: u8, c: u8) -> bool {
    let pos = Position::new(r, c);
    board.moves.push(pos);

    if !pos.in_bounds(board.rows, board.cols) {
        log::warn!("apply_click: ({r}, {c}) is out of bounds for a {}x{} board", board.rows, board.cols);
        return false;
    }

    let clicked = *board.cell(pos);
    match clicked.modifier {
        Modifier::StaticArrow(dir) => fire_ray(board, pos, clicked.color, dir),
        Modifier::RotatingArrow(dir) => {
            fire_ray(board, pos, clicked.color, dir);
            let idx = board.index(pos);
            board.cells[idx].modifier = Modifier::RotatingArrow(dir.rotated());
            true
        }
        Modifier::Bomb => {
            paint_bomb(board, pos, clicked.color);
            true
        }
        Modifier::Flood => flood(board, pos, clicked.color),
        _ => {
            log::debug!("apply_click: ({r}, {c}) has no clickable modifier, no-op");
            false
        }
    }
}

/// Directional ray: reads the target cell's modifier to decide whether the
/// ray paints (`0 -> color`) or erases (`color -> 0`), then overwrites every
/// contiguous cell in that direction still holding the starting value.
fn fire_ray(board: &mut Board, origin: Position, color: Color, dir: Direction) -> bool {
    let (dr, dc) = dir.delta();
    let Some(target) = origin.offset(dr, dc) else { return false };
    if !target.in_bounds(board.rows, board.cols) {
        return false;
    }

    let target_mod = board.cell(target).modifier;
    let (from, to) = if target_mod == Modifier::Painted(color) {
        (Modifier::Painted(color), Modifier::Empty)
    } else if target_mod == Modifier::Empty {
        (Modifier::Empty, Modifier::Painted(color))
    } else {
        return false;
    };

    let mut cur = target;
    let mut wrote = false;
    loop {
        if !cur.in_bounds(board.rows, board.cols) || board.cell(cur).modifier != from {
            break;
        }
        board.set_modifier(cur, to);
        wrote = true;
        match cur.offset(dr, dc) {
            Some(next) => cur = next,
            None => break,
        }
    }
    wrote
}

/// Paints every non-wall cell in the 3x3 neighborhood centered at `origin`.
fn paint_bomb(board: &mut Board, origin: Position, color: Color) {
    for dr in -1..=1i8 {
        for dc in -1..=1i8 {
            let Some(target) = origin.offset(dr, dc) else { continue };
            if !target.in_bounds(board.rows, board.cols) {
                continue;
            }
            if board.cell(target).modifier != Modifier::Wall {
                board.set_modifier(target, Modifier::Painted(color));
            }
        }
    }
}

/// Flood-fills outward from each orthogonal neighbor of `origin`, painting
/// `0 -> color`. If nothing was painted, falls back to erasing `color -> 0`.
/// The clicked cell itself is never repainted.
fn flood(board: &mut Board, origin: Position, color: Color) -> bool {
    let neighbors: Vec<Position> = ORTHOGONAL_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| origin.offset(dr, dc))
        .filter(|p| p.in_bounds(board.rows, board.cols))
        .collect();

    if flood_fill(board, neighbors.clone(), Modifier::Empty, Modifier::Painted(color)) {
        true
    } else {
        flood_fill(board, neighbors, Modifier::Painted(color), Modifier::Empty)
    }
}

fn flood_fill(board: &mut Board, starts: Vec<Position>, from: Modifier, to: Modifier) -> bool {
    let mut stack = starts;
    let mut visited = HashSet::new();
    let mut wrote = false;

    while let Some(p) = stack.pop() {
        if !p.in_bounds(board.rows, board.cols) || !visited.insert(p) {
            continue;
        }
        if board.cell(p).modifier != from {
            continue;
        }
        board.set_modifier(p, to);
        wrote = true;
        for &(dr, dc) in ORTHOGONAL_OFFSETS.iter() {
            if let Some(next) = p.offset(dr, dc) {
                stack.push(next);
            }
        }
    }
    wrote
}
