//! Board structure with tower position index

use super::{Color, Coloring, Coord, Player, Tower, BOARD_SIZE, NUM_COLORS};

/// Game board: a grid of cells plus a reverse index from (owner, color) to
/// the square that tower currently occupies.
///
/// Invariant: `tower_at(tower_pos(p, c)) == Some(Tower { p, c })` for every
/// placed tower, and every occupied cell is recorded in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    coloring: Coloring,
    cells: [[Option<Tower>; BOARD_SIZE]; BOARD_SIZE],
    towers: [[Coord; NUM_COLORS]; 2],
}

impl Board {
    pub const WHITE_HOME_ROW: u8 = (BOARD_SIZE - 1) as u8;
    pub const BLACK_HOME_ROW: u8 = 0;

    /// Board in the initial layout for `coloring`.
    pub fn new(coloring: Coloring) -> Self {
        let mut board = Self::cleared(coloring);
        board.reset_to_initial();
        board
    }

    /// Board with no towers placed. Used to set up arbitrary positions.
    pub fn cleared(coloring: Coloring) -> Self {
        Self {
            coloring,
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            towers: [[Coord::UNPLACED; NUM_COLORS]; 2],
        }
    }

    #[inline]
    pub fn coloring(&self) -> &Coloring {
        &self.coloring
    }

    #[inline]
    pub fn in_bounds(&self, p: Coord) -> bool {
        (p.row as usize) < BOARD_SIZE && (p.col as usize) < BOARD_SIZE
    }

    /// Check if a square holds no tower
    #[inline]
    pub fn is_empty(&self, p: Coord) -> bool {
        self.cells[p.row as usize][p.col as usize].is_none()
    }

    /// Put a tower on an empty square.
    pub fn place(&mut self, tower: Tower, p: Coord) {
        debug_assert!(self.in_bounds(p), "place out of bounds: {p:?}");
        debug_assert!(self.is_empty(p), "cell {p:?} already occupied");
        debug_assert!(
            !self.tower_pos(tower.owner, tower.color).is_placed(),
            "{tower:?} is already on the board"
        );
        self.cells[p.row as usize][p.col as usize] = Some(tower);
        self.towers[tower.owner.index()][tower.color.index()] = p;
    }

    /// Relocate a tower. `from` must hold exactly `tower` and `to` must be empty.
    pub fn move_tower(&mut self, tower: Tower, from: Coord, to: Coord) {
        debug_assert!(self.in_bounds(from) && self.in_bounds(to), "move out of bounds");
        debug_assert!(self.is_empty(to), "cell {to:?} already occupied");
        debug_assert_eq!(self.tower_at(from), Some(tower), "no such tower on {from:?}");

        self.cells[from.row as usize][from.col as usize] = None;
        self.cells[to.row as usize][to.col as usize] = Some(tower);
        self.towers[tower.owner.index()][tower.color.index()] = to;
    }

    /// Get the tower standing on a square
    #[inline]
    pub fn tower_at(&self, p: Coord) -> Option<Tower> {
        self.cells[p.row as usize][p.col as usize]
    }

    /// Square of the given tower, or `Coord::UNPLACED`.
    #[inline]
    pub fn tower_pos(&self, player: Player, color: Color) -> Coord {
        self.towers[player.index()][color.index()]
    }

    /// Iterate over all placed towers with their squares.
    pub fn towers(&self) -> impl Iterator<Item = (Coord, Tower)> + '_ {
        Player::ALL.into_iter().flat_map(move |player| {
            Color::ALL.into_iter().filter_map(move |color| {
                let pos = self.tower_pos(player, color);
                pos.is_placed().then_some((pos, Tower::new(player, color)))
            })
        })
    }

    /// Clear the board and place both sides on their home rows. The tower
    /// on home column `i` takes the color of that square.
    pub fn reset_to_initial(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.towers = [[Coord::UNPLACED; NUM_COLORS]; 2];

        for col in 0..BOARD_SIZE as u8 {
            for player in Player::ALL {
                let pos = Coord::new(player.home_row(), col);
                let color = self.coloring.at(pos);
                self.place(Tower::new(player, color), pos);
            }
        }
    }

    /// Number of towers on the board
    pub fn tower_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Coloring::official())
    }
}
