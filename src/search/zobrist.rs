//! Zobrist hashing for position identification
//!
//! A position is keyed by the XOR of one term per placed tower
//! (square, owner, color), a side-to-move term and a forced-color term.
//! Moving a tower only touches the two square terms, so `GameState::apply`
//! updates the hash in O(1).

use crate::board::{Board, Color, Coord, Player, Tower, NUM_COLORS, TOTAL_CELLS};

/// Process-wide key table, generated at compile time.
pub static ZOBRIST: ZobristTable = ZobristTable::new();

/// Tower keys are indexed by `owner * NUM_COLORS + color`.
const TOWER_KINDS: usize = 2 * NUM_COLORS;

/// Zobrist hash table for position hashing.
pub struct ZobristTable {
    /// Random values for each (square, tower) combination
    towers: [[u64; TOWER_KINDS]; TOTAL_CELLS],
    /// Random value XORed when black is to move
    black_to_move: u64,
    /// One value per forced color, the last slot for "no forced color"
    forced: [u64; NUM_COLORS + 1],
}

impl ZobristTable {
    /// Create a new Zobrist table with deterministic random values.
    ///
    /// SplitMix64 with a fixed seed, so hashes are reproducible across runs.
    #[must_use]
    pub const fn new() -> Self {
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;

        let mut towers = [[0u64; TOWER_KINDS]; TOTAL_CELLS];
        let mut sq = 0;
        while sq < TOTAL_CELLS {
            let mut kind = 0;
            while kind < TOWER_KINDS {
                let (next, value) = split_mix(state);
                state = next;
                towers[sq][kind] = value;
                kind += 1;
            }
            sq += 1;
        }

        let (next, black_to_move) = split_mix(state);
        state = next;

        let mut forced = [0u64; NUM_COLORS + 1];
        let mut i = 0;
        while i < forced.len() {
            let (next, value) = split_mix(state);
            state = next;
            forced[i] = value;
            i += 1;
        }

        Self {
            towers,
            black_to_move,
            forced,
        }
    }

    /// Compute the full hash of a position from scratch.
    #[must_use]
    pub fn hash(&self, board: &Board, side_to_move: Player, forced: Option<Color>) -> u64 {
        let mut h = self.side(side_to_move) ^ self.forced(forced);
        for (pos, tower) in board.towers() {
            h ^= self.tower(pos, tower);
        }
        h
    }

    #[inline]
    #[must_use]
    pub fn tower(&self, pos: Coord, tower: Tower) -> u64 {
        self.towers[pos.to_index()][tower.owner.index() * NUM_COLORS + tower.color.index()]
    }

    #[inline]
    #[must_use]
    pub fn side(&self, side_to_move: Player) -> u64 {
        match side_to_move {
            Player::White => 0,
            Player::Black => self.black_to_move,
        }
    }

    #[inline]
    #[must_use]
    pub fn forced(&self, forced: Option<Color>) -> u64 {
        self.forced[forced.map_or(NUM_COLORS, Color::index)]
    }

    /// Hash delta for a tower moving between two squares.
    #[inline]
    #[must_use]
    pub fn update_move(&self, hash: u64, tower: Tower, from: Coord, to: Coord) -> u64 {
        hash ^ self.tower(from, tower) ^ self.tower(to, tower)
    }

    /// Toggle the side-to-move component of the hash.
    #[inline]
    #[must_use]
    pub fn toggle_side(&self, hash: u64) -> u64 {
        hash ^ self.black_to_move
    }

    /// Swap the forced-color component.
    #[inline]
    #[must_use]
    pub fn update_forced(&self, hash: u64, old: Option<Color>, new: Option<Color>) -> u64 {
        hash ^ self.forced(old) ^ self.forced(new)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

const fn split_mix(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coloring;

    #[test]
    fn test_zobrist_deterministic() {
        let zt = ZobristTable::new();
        let board = Board::default();
        assert_eq!(
            zt.hash(&board, Player::White, None),
            ZOBRIST.hash(&board, Player::White, None)
        );
    }

    #[test]
    fn test_zobrist_side_and_forced_matter() {
        let board = Board::default();
        let base = ZOBRIST.hash(&board, Player::White, None);
        assert_ne!(base, ZOBRIST.hash(&board, Player::Black, None));
        assert_ne!(base, ZOBRIST.hash(&board, Player::White, Some(Color::Brown)));
        assert_ne!(
            ZOBRIST.hash(&board, Player::White, Some(Color::Brown)),
            ZOBRIST.hash(&board, Player::White, Some(Color::Red))
        );
    }

    #[test]
    fn test_zobrist_incremental_move() {
        let mut board = Board::default();
        let from = Coord::new(7, 4);
        let to = Coord::new(3, 4);
        let tower = board.tower_at(from).unwrap();

        let before = ZOBRIST.hash(&board, Player::White, None);
        board.move_tower(tower, from, to);
        let after = ZOBRIST.hash(&board, Player::Black, Some(Color::Red));

        let mut inc = ZOBRIST.update_move(before, tower, from, to);
        inc = ZOBRIST.toggle_side(inc);
        inc = ZOBRIST.update_forced(inc, None, Some(Color::Red));
        assert_eq!(inc, after);
    }

    #[test]
    fn test_zobrist_empty_board() {
        let board = Board::cleared(Coloring::official());
        assert_eq!(
            ZOBRIST.hash(&board, Player::Black, None),
            ZOBRIST.black_to_move ^ ZOBRIST.forced[NUM_COLORS]
        );
    }

    #[test]
    fn test_zobrist_keys_distinct() {
        let a = ZOBRIST.tower(Coord::new(0, 0), Tower::new(Player::White, Color::Brown));
        let b = ZOBRIST.tower(Coord::new(0, 0), Tower::new(Player::Black, Color::Brown));
        let c = ZOBRIST.tower(Coord::new(0, 1), Tower::new(Player::White, Color::Brown));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }
}
