use colored::{Color as AnsiColor, Colorize};

use crate::board::{Board, Color, Modifier, Position};

/// Renders a board as an ANSI-colorized grid: one character per cell, its
/// color from [`Board`]'s current paint state, using the cell's modifier
/// glyph as the printed character. Walls print dim.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let cell = board.cell(Position::new(row, col));
            let glyph = cell.modifier.notate().to_string();
            out.push_str(&colorize(&glyph, cell.modifier, cell.color));
        }
        out.push('\n');
    }
    out
}

fn colorize(glyph: &str, modifier: Modifier, color: Color) -> String {
    if modifier == Modifier::Wall {
        return glyph.dimmed().to_string();
    }
    match to_ansi(color) {
        Some(ansi) => glyph.color(ansi).bold().to_string(),
        None => glyph.normal().to_string(),
    }
}

fn to_ansi(color: Color) -> Option<AnsiColor> {
    match color {
        Color::None => None,
        Color::Red => Some(AnsiColor::Red),
        Color::Green => Some(AnsiColor::Green),
        Color::Blue => Some(AnsiColor::Blue),
        Color::Orange => Some(AnsiColor::Yellow),
        Color::Dark => Some(AnsiColor::BrightBlack),
    }
}
