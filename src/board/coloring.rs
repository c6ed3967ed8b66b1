//! Fixed square coloring of the board

use super::{Color, Coord, BOARD_SIZE};

use super::Color::{Blue as Bl, Brown as Br, Green as Gr, Orange as Or, Pink as Pk, Purple as Pu, Red as Rd, Yellow as Ye};

/// Tournament coloring. Every color appears once per row and once per column.
#[rustfmt::skip]
pub const OFFICIAL_COLORS: [[Color; BOARD_SIZE]; BOARD_SIZE] = [
    [Br, Pu, Bl, Ye, Pk, Gr, Rd, Or],
    [Gr, Br, Ye, Rd, Pu, Pk, Or, Bl],
    [Rd, Ye, Br, Gr, Bl, Or, Pk, Pu],
    [Ye, Bl, Pu, Br, Or, Rd, Gr, Pk],
    [Pk, Gr, Rd, Or, Br, Pu, Bl, Ye],
    [Pu, Pk, Or, Bl, Gr, Br, Ye, Rd],
    [Bl, Or, Pk, Pu, Rd, Ye, Br, Gr],
    [Or, Rd, Gr, Pk, Ye, Bl, Pu, Br],
];

/// Immutable color assignment for every square.
///
/// The coloring decides both the initial placement (a tower starts on the
/// home-row square of its own color) and the forced color after each move
/// (the color of the destination square).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coloring {
    colors: [[Color; BOARD_SIZE]; BOARD_SIZE],
}

impl Coloring {
    /// Wrap a color grid. Whether every goal can be resolved is checked when
    /// the goal table is built.
    #[must_use]
    pub const fn new(colors: [[Color; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { colors }
    }

    #[must_use]
    pub const fn official() -> Self {
        Self::new(OFFICIAL_COLORS)
    }

    /// Color of a square.
    #[inline]
    #[must_use]
    pub fn at(&self, p: Coord) -> Color {
        debug_assert!(p.is_placed(), "coloring lookup on unplaced coord");
        self.colors[p.row as usize][p.col as usize]
    }

    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &[[Color; BOARD_SIZE]; BOARD_SIZE] {
        &self.colors
    }
}

impl Default for Coloring {
    fn default() -> Self {
        Self::official()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_official_is_latin_square() {
        let coloring = Coloring::official();
        for i in 0..BOARD_SIZE {
            let mut row_seen = [false; BOARD_SIZE];
            let mut col_seen = [false; BOARD_SIZE];
            for j in 0..BOARD_SIZE {
                let r = coloring.at(Coord::new(i as u8, j as u8)).index();
                let c = coloring.at(Coord::new(j as u8, i as u8)).index();
                assert!(!row_seen[r], "color repeated in row {i}");
                assert!(!col_seen[c], "color repeated in column {i}");
                row_seen[r] = true;
                col_seen[c] = true;
            }
        }
    }

    #[test]
    fn test_official_corners() {
        let coloring = Coloring::official();
        assert_eq!(coloring.at(Coord::new(0, 0)), Color::Brown);
        assert_eq!(coloring.at(Coord::new(7, 7)), Color::Brown);
        assert_eq!(coloring.at(Coord::new(0, 7)), Color::Orange);
        assert_eq!(coloring.at(Coord::new(7, 0)), Color::Orange);
    }
}
