//! Square and move notation
//!
//! Squares are a file letter (`a` for column 0) followed by a rank digit
//! counted from White's home row (`1` for row 7). Moves print as
//! `a1-a4`, passes as `pass@a1`. The engine itself only works with
//! zero-based coordinates; this module is for boundary layers.

use std::fmt;

use crate::board::{Coord, Move, BOARD_SIZE};
use crate::error::{KamisadoError, Result};

const PASS_PREFIX: &str = "pass@";

/// Name of a square, e.g. `Coord::new(7, 0)` is `"a1"`.
#[must_use]
pub fn coord_to_square(coord: Coord) -> String {
    debug_assert!(coord.is_placed(), "unplaced coordinate has no name");
    let file = char::from(b'a' + coord.col);
    let rank = BOARD_SIZE as u8 - coord.row;
    format!("{file}{rank}")
}

/// Parse a square name such as `"e4"`. Case-insensitive.
///
/// # Errors
///
/// [`KamisadoError::InvalidSquare`] unless the input is exactly one file
/// letter `a`-`h` followed by one rank digit `1`-`8`.
pub fn parse_square(text: &str) -> Result<Coord> {
    let invalid = || KamisadoError::InvalidSquare(text.to_string());

    let bytes = text.trim().as_bytes();
    let [file, rank] = bytes else {
        return Err(invalid());
    };

    let col = file.to_ascii_lowercase().wrapping_sub(b'a');
    let rank = rank.wrapping_sub(b'0');
    if usize::from(col) >= BOARD_SIZE || rank == 0 || usize::from(rank) > BOARD_SIZE {
        return Err(invalid());
    }

    Ok(Coord::new(BOARD_SIZE as u8 - rank, col))
}

/// Parse a move in the notation produced by `Display for Move`.
///
/// # Errors
///
/// [`KamisadoError::InvalidSquare`] if either square fails to parse or the
/// separator is missing.
pub fn parse_move(text: &str) -> Result<Move> {
    let text = text.trim();
    if let Some(at) = text.strip_prefix(PASS_PREFIX) {
        return Ok(Move::pass(parse_square(at)?));
    }
    let (from, to) = text
        .split_once('-')
        .ok_or_else(|| KamisadoError::InvalidSquare(text.to_string()))?;
    Ok(Move::new(parse_square(from)?, parse_square(to)?))
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placed() {
            f.write_str(&coord_to_square(*self))
        } else {
            f.write_str("--")
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass {
            write!(f, "{PASS_PREFIX}{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(coord_to_square(Coord::new(7, 0)), "a1");
        assert_eq!(coord_to_square(Coord::new(0, 7)), "h8");
        assert_eq!(coord_to_square(Coord::new(4, 3)), "d4");
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(parse_square("a1").unwrap(), Coord::new(7, 0));
        assert_eq!(parse_square("H8").unwrap(), Coord::new(0, 7));
        assert_eq!(parse_square(" d4 ").unwrap(), Coord::new(4, 3));

        for bad in ["", "a", "a0", "a9", "i1", "11", "a10", "é1"] {
            assert_eq!(
                parse_square(bad),
                Err(KamisadoError::InvalidSquare(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_every_square_round_trips() {
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            let coord = Coord::from_index(idx);
            assert_eq!(parse_square(&coord_to_square(coord)).unwrap(), coord);
        }
    }

    #[test]
    fn test_move_text() {
        let mv = Move::new(Coord::new(7, 0), Coord::new(4, 0));
        assert_eq!(mv.to_string(), "a1-a4");
        assert_eq!(parse_move("a1-a4").unwrap(), mv);

        let pass = Move::pass(Coord::new(7, 0));
        assert_eq!(pass.to_string(), "pass@a1");
        assert_eq!(parse_move("pass@a1").unwrap(), pass);

        assert!(parse_move("a1a4").is_err());
        assert!(parse_move("a1-z9").is_err());
    }

    #[test]
    fn test_unplaced_coord_display() {
        assert_eq!(Coord::UNPLACED.to_string(), "--");
    }
}
