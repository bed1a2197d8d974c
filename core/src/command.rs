use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

const SEPARATORS: [char; 2] = [',', ' '];
const FLAG_KEYWORD: &str = "flag";
const EXIT_KEYWORD: &str = "exit";
/// Two row digits, a separator, a column letter, a separator and the flag keyword.
const MAX_MOVE_LEN: usize = 9;

/// A single player command, with 0-based coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub row: Coord,
    pub col: Coord,
    /// Toggle a flag instead of revealing.
    pub flag: bool,
}

impl Move {
    pub const fn reveal((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            flag: false,
        }
    }

    pub const fn toggle_flag((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            flag: true,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Canonical text form, `7,C` or `12,Q,flag`, which [`decode`] accepts.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", u16::from(self.row) + 1, column_label(self.col))?;
        if self.flag {
            write!(f, ",{}", FLAG_KEYWORD)?;
        }
        Ok(())
    }
}

/// Letter naming a 0-based column, `A` for the first.
pub fn column_label(col: Coord) -> char {
    char::from(b'A'.saturating_add(col))
}

/// Parses `row,col[,flag]` where the row is `1` to `18` and the column a letter `A` to `Y`.
///
/// Either separator may be a comma or a single space, and the column letter and the `flag` keyword are case
/// insensitive. Problems are reported in a fixed order: the shape of the text first, then the row, then the column.
/// A case insensitive `exit` that does not look like a move yields [`DecodeError::ExitRequested`].
pub fn decode(text: &str) -> core::result::Result<Move, DecodeError> {
    match decode_move(text) {
        Err(DecodeError::InvalidFormat) if text.eq_ignore_ascii_case(EXIT_KEYWORD) => {
            Err(DecodeError::ExitRequested)
        }
        result => result,
    }
}

fn decode_move(text: &str) -> core::result::Result<Move, DecodeError> {
    use DecodeError::*;

    let mut buf = ['\0'; MAX_MOVE_LEN];
    let mut len = 0;
    for ch in text.chars() {
        if len == MAX_MOVE_LEN {
            return Err(InvalidFormat);
        }
        buf[len] = ch;
        len += 1;
    }
    let chars = &buf[..len];

    let (row_len, flag) = match len {
        3 => (1, false),
        4 => (2, false),
        8 => (1, true),
        9 => (2, true),
        _ => return Err(InvalidFormat),
    };
    let col_at = row_len + 1;

    if !SEPARATORS.contains(&chars[row_len]) {
        return Err(InvalidFormat);
    }
    if flag {
        if !SEPARATORS.contains(&chars[col_at + 1]) {
            return Err(InvalidFormat);
        }
        let keyword_matches = chars[col_at + 2..]
            .iter()
            .zip(FLAG_KEYWORD.chars())
            .all(|(ch, expected)| ch.eq_ignore_ascii_case(&expected));
        if !keyword_matches {
            return Err(InvalidFormat);
        }
    }

    let row = parse_row(&chars[..row_len]).ok_or(RowOutOfRange)?;
    let col = parse_col(chars[col_at]).ok_or(ColOutOfRange)?;

    Ok(Move { row, col, flag })
}

/// Row exactly as a player writes it, without leading zeros.
fn parse_row(digits: &[char]) -> Option<Coord> {
    if digits.first() == Some(&'0') {
        return None;
    }

    let mut value: u16 = 0;
    for ch in digits {
        value = value * 10 + u16::try_from(ch.to_digit(10)?).ok()?;
    }

    if (1..=u16::from(ROWS)).contains(&value) {
        Coord::try_from(value - 1).ok()
    } else {
        None
    }
}

fn parse_col(letter: char) -> Option<Coord> {
    let index = u32::from(letter.to_ascii_uppercase()).checked_sub(u32::from('A'))?;
    if index < u32::from(COLS) {
        Coord::try_from(index).ok()
    } else {
        None
    }
}
