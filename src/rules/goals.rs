//! Goal squares derived from the board coloring
//!
//! Each tower wins by reaching the square on the opponent's home row that
//! shares its own color. The table is resolved once per coloring.

use crate::board::{Color, Coloring, Coord, Player, BOARD_SIZE, NUM_COLORS, OFFICIAL_COLORS};
use crate::error::{KamisadoError, Result};

/// Goal table resolved for the official coloring at compile time.
pub const OFFICIAL_GOALS: Goals = match Goals::resolve(&OFFICIAL_COLORS) {
    Ok(goals) => goals,
    Err(_) => panic!("official coloring leaves a goal unresolved"),
};

/// Goal column per (player, color).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goals {
    cols: [[u8; NUM_COLORS]; 2],
}

impl Goals {
    /// Build the goal table for a coloring.
    ///
    /// Fails with [`KamisadoError::GoalNotFound`] when a home-row color does
    /// not occur on the opposing home row, which only happens for a
    /// coloring that is not a Latin square.
    pub fn new(coloring: &Coloring) -> Result<Self> {
        Self::resolve(coloring.grid())
            .map_err(|(player, color)| KamisadoError::GoalNotFound { player, color })
    }

    const fn resolve(
        grid: &[[Color; BOARD_SIZE]; BOARD_SIZE],
    ) -> std::result::Result<Self, (Player, Color)> {
        let mut cols = [[0u8; NUM_COLORS]; 2];
        let players = [Player::White, Player::Black];

        let mut p = 0;
        while p < players.len() {
            let player = players[p];
            let home = grid[player.home_row() as usize];
            let goal = grid[player.goal_row() as usize];

            let mut home_col = 0;
            while home_col < BOARD_SIZE {
                let color = home[home_col];
                let mut goal_col = 0;
                while goal_col < BOARD_SIZE && goal[goal_col] as u8 != color as u8 {
                    goal_col += 1;
                }
                if goal_col == BOARD_SIZE {
                    return Err((player, color));
                }
                cols[player.index()][color.index()] = goal_col as u8;
                home_col += 1;
            }
            p += 1;
        }

        Ok(Self { cols })
    }

    #[inline]
    pub fn row(&self, player: Player) -> u8 {
        player.goal_row()
    }

    #[inline]
    pub fn col(&self, player: Player, color: Color) -> u8 {
        self.cols[player.index()][color.index()]
    }

    /// Goal square of a tower.
    #[inline]
    pub fn goal(&self, player: Player, color: Color) -> Coord {
        Coord::new(self.row(player), self.col(player, color))
    }

    /// Check whether `pos` is the goal of the given tower
    #[inline]
    pub fn is_goal(&self, player: Player, color: Color, pos: Coord) -> bool {
        pos == self.goal(player, color)
    }
}
