use std::collections::HashSet;

use crate::grid::Grid;
use crate::session_rng::SessionRng;
use crate::types::Point;

/// No free cell is left to place food on. Terminal for the session; a
/// retry cannot resolve it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardFull;

/// The single mobile item. Always live; relocated immediately when eaten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Food {
    position: Point,
}

impl Food {
    pub fn spawn(
        grid: &Grid,
        occupied: &HashSet<Point>,
        rng: &mut SessionRng,
    ) -> Result<Self, BoardFull> {
        let mut food = Self {
            position: Point::new(0, 0),
        };
        food.respawn(grid, occupied, rng)?;
        Ok(food)
    }

    #[cfg(test)]
    pub fn at(position: Point) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Relocates the food to a uniformly random cell outside `occupied`.
    /// Never lands on the snake; fails with `BoardFull` instead of looping
    /// when the board is fully covered.
    pub fn respawn(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Point>,
        rng: &mut SessionRng,
    ) -> Result<(), BoardFull> {
        if occupied.len() >= grid.cell_count() {
            return Err(BoardFull);
        }

        // At least one free cell exists, so rejection sampling terminates
        // with probability 1.
        loop {
            let candidate = grid.random_cell(rng);
            if !occupied.contains(&candidate) {
                self.position = candidate;
                return Ok(());
            }
        }
    }
}
