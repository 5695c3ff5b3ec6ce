mod error;

use std::path::Path;

use quick_xml::events::{attributes::Attribute, BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

pub use error::LevelParseError;

use crate::board::{Board, Cell, Color, Modifier, MoveSequence, Position};

/// One `<level>` entry: its board and a possibly-stale stored solution.
#[derive(Clone, Debug)]
pub struct Level {
    pub number: u32,
    pub board: Board,
    pub solution: Option<MoveSequence>,
}

impl Level {
    /// Replays the stored solution on a fresh copy of the board. A stored
    /// solution referencing an out-of-bounds move, or one that does not end
    /// in a solved board, is discarded rather than trusted.
    pub fn validated_solution(&self) -> Option<Board> {
        let solution = self.solution.as_ref()?;
        let mut board = self.board.clone();
        for pos in solution.as_slice() {
            if !pos.in_bounds(board.rows(), board.cols()) {
                log::warn!("level {}: stored solution references out-of-bounds move {pos}", self.number);
                return None;
            }
            board.click(pos.row, pos.col);
        }
        if board.is_solved() {
            Some(board)
        } else {
            log::warn!("level {}: stored solution does not solve the board, discarding", self.number);
            None
        }
    }

    fn color_grid_string(&self) -> String {
        (0..self.board.rows())
            .map(|r| {
                (0..self.board.cols())
                    .map(|c| self.board.cell(Position::new(r, c)).color.notate())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn modifier_grid_string(&self) -> String {
        (0..self.board.rows())
            .map(|r| {
                (0..self.board.cols())
                    .map(|c| self.board.cell(Position::new(r, c)).modifier.notate())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A parsed `<levels>` document.
#[derive(Clone, Debug, Default)]
pub struct LevelFile {
    pub levels: Vec<Level>,
}

impl LevelFile {
    /// Parses a level file: whitespace in `color`/`modifier` is stripped
    /// before indexing, rows/cols come from the longest line, and any index
    /// past either grid's extent becomes an inert wall.
    pub fn parse(path: &Path) -> Result<LevelFile, LevelParseError> {
        let mut reader = Reader::from_file(path)?;
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();
        let mut levels = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"level" => {
                    levels.push(parse_level(&e)?);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(LevelFile { levels })
    }

    /// Writes the document back out, re-deriving each level's `color` and
    /// `modifier` grids from its current board state and updating
    /// `solution` in place.
    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("levels")))?;

        for level in &self.levels {
            let mut elem = BytesStart::new("level");
            elem.push_attribute(("number", level.number.to_string().as_str()));
            elem.push_attribute(("color", level.color_grid_string().as_str()));
            elem.push_attribute(("modifier", level.modifier_grid_string().as_str()));
            if let Some(solution) = &level.solution {
                elem.push_attribute(("solution", solution.notate().as_str()));
            }
            writer.write_event(Event::Empty(elem))?;
        }

        writer.write_event(Event::End(BytesEnd::new("levels")))?;
        std::fs::write(path, buf)?;
        Ok(())
    }
}

fn attr_value(e: &BytesStart, name: &str) -> Result<Option<String>, LevelParseError> {
    for attribute in e.attributes() {
        let attribute: Attribute = attribute?;
        if attribute.key.as_ref() == name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_level(e: &BytesStart) -> Result<Level, LevelParseError> {
    let number_raw = attr_value(e, "number")?.ok_or(LevelParseError::MissingAttribute("number"))?;
    let number = number_raw
        .parse::<u32>()
        .map_err(|_| LevelParseError::InvalidAttribute { name: "number", value: number_raw })?;

    let color_raw = attr_value(e, "color")?.ok_or(LevelParseError::MissingAttribute("color"))?;
    let modifier_raw = attr_value(e, "modifier")?.ok_or(LevelParseError::MissingAttribute("modifier"))?;
    let solution_raw = attr_value(e, "solution")?;

    let board = build_board(&color_raw, &modifier_raw)?;
    let solution = solution_raw.map(|raw| parse_solution(&raw)).transpose()?;

    Ok(Level { number, board, solution })
}

fn build_board(color_raw: &str, modifier_raw: &str) -> Result<Board, LevelParseError> {
    let color_rows: Vec<&str> = color_raw.split_whitespace().collect();
    let modifier_rows: Vec<&str> = modifier_raw.split_whitespace().collect();

    let rows = color_rows.len().max(modifier_rows.len()).max(1) as u8;
    let cols = color_rows
        .iter()
        .chain(modifier_rows.iter())
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(1)
        .max(1) as u8;

    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for r in 0..rows as usize {
        let color_row = color_rows.get(r).copied().unwrap_or("");
        let modifier_row = modifier_rows.get(r).copied().unwrap_or("");
        for c in 0..cols as usize {
            let cell = match (color_row.chars().nth(c), modifier_row.chars().nth(c)) {
                (Some(cc), Some(mc)) => {
                    let color = cc
                        .to_string()
                        .parse::<Color>()
                        .map_err(|_| LevelParseError::InvalidAttribute { name: "color", value: cc.to_string() })?;
                    let modifier = mc
                        .to_string()
                        .parse::<Modifier>()
                        .map_err(|_| LevelParseError::InvalidAttribute { name: "modifier", value: mc.to_string() })?;
                    Cell::new(color, modifier)
                }
                // out-of-range for at least one of the two grids: inert wall
                _ => Cell::new(Color::None, Modifier::Wall),
            };
            cells.push(cell);
        }
    }
    Board::new(rows, cols, cells).map_err(LevelParseError::Board)
}

fn parse_solution(raw: &str) -> Result<MoveSequence, LevelParseError> {
    let mut seq = MoveSequence::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seq.push(parse_move_notation(token)?);
    }
    Ok(seq)
}

fn parse_move_notation(token: &str) -> Result<Position, LevelParseError> {
    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(|| LevelParseError::InvalidMove(token.to_string()))?;
    if !letter.is_ascii_uppercase() {
        return Err(LevelParseError::InvalidMove(token.to_string()));
    }
    let col = letter as u8 - b'A';
    let row_num: u32 =
        chars.as_str().parse().map_err(|_| LevelParseError::InvalidMove(token.to_string()))?;
    if row_num == 0 {
        return Err(LevelParseError::InvalidMove(token.to_string()));
    }
    Ok(Position::new((row_num - 1) as u8, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile_path::TempPath {
        tempfile_path::TempPath::with_contents(contents)
    }

    /// Minimal scratch-file helper: this crate has no `tempfile` dependency,
    /// so tests write into a process-unique path under the OS temp dir and
    /// clean it up on drop.
    mod tempfile_path {
        use std::fs;
        use std::path::{Path, PathBuf};

        pub struct TempPath(PathBuf);

        impl TempPath {
            pub fn with_contents(contents: &str) -> TempPath {
                let mut path = std::env::temp_dir();
                path.push(format!("clickgrid-test-{}-{:?}.xml", std::process::id(), std::thread::current().id()));
                fs::write(&path, contents).unwrap();
                TempPath(path)
            }

            pub fn path(&self) -> &Path {
                &self.0
            }
        }

        impl Drop for TempPath {
            fn drop(&mut self) {
                let _ = fs::remove_file(&self.0);
            }
        }
    }

    #[test]
    fn parses_a_single_level_with_solution() {
        let xml = r#"<?xml version='1.0' encoding='utf-8'?>
<levels>
  <level number="1" color="rr" modifier="R0" solution="A1"/>
</levels>
"#;
        let temp = write_temp(xml);
        let file = LevelFile::parse(temp.path()).unwrap();
        assert_eq!(file.levels.len(), 1);
        let level = &file.levels[0];
        assert_eq!(level.number, 1);
        assert_eq!(level.board.rows(), 1);
        assert_eq!(level.board.cols(), 2);
        let solved = level.validated_solution().unwrap();
        assert!(solved.is_solved());
    }

    #[test]
    fn short_rows_pad_to_inert_walls() {
        let xml = r#"<levels>
  <level number="2" color="rrr
r" modifier="000
0"/>
</levels>
"#;
        let temp = write_temp(xml);
        let file = LevelFile::parse(temp.path()).unwrap();
        let board = &file.levels[0].board;
        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.cell(Position::new(1, 1)).modifier, Modifier::Wall);
        assert_eq!(board.cell(Position::new(1, 1)).color, Color::None);
    }

    #[test]
    fn invalid_stored_solution_is_discarded() {
        let xml = r#"<levels>
  <level number="3" color="rr" modifier="R0" solution="B9"/>
</levels>
"#;
        let temp = write_temp(xml);
        let file = LevelFile::parse(temp.path()).unwrap();
        assert!(file.levels[0].validated_solution().is_none());
    }

    #[test]
    fn round_trips_through_write() {
        let xml = r#"<levels>
  <level number="1" color="rr" modifier="R0"/>
</levels>
"#;
        let temp = write_temp(xml);
        let mut file = LevelFile::parse(temp.path()).unwrap();
        file.levels[0].board.click(0, 0);
        file.levels[0].solution = Some(file.levels[0].board.moves().clone());

        let out_path = std::env::temp_dir().join(format!("clickgrid-roundtrip-{}.xml", std::process::id()));
        file.write(&out_path).unwrap();
        let reparsed = LevelFile::parse(&out_path).unwrap();
        std::fs::remove_file(&out_path).ok();

        assert_eq!(reparsed.levels[0].solution.as_ref().unwrap().notate(), "A1");
        assert!(reparsed.levels[0].validated_solution().unwrap().is_solved());
    }
}
