use crate::session_rng::SessionRng;
use crate::types::{Direction, Point, WrapMode};

/// Fixed-size cell grid. Coordinates are cells, not pixels.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub wrap_mode: WrapMode,
}

impl Grid {
    pub fn new(width: i32, height: i32, wrap_mode: WrapMode) -> Self {
        Self {
            width,
            height,
            wrap_mode,
        }
    }

    /// One step from `from` in `direction`. Toroidal grids wrap at the
    /// edges; bounded grids return `None` when the step leaves the board,
    /// which the caller reports as a wall hit.
    pub fn advance(&self, from: Point, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.offset();
        let stepped = Point::new(from.x + dx, from.y + dy);

        match self.wrap_mode {
            WrapMode::Toroidal => Some(Point::new(
                stepped.x.rem_euclid(self.width),
                stepped.y.rem_euclid(self.height),
            )),
            WrapMode::Bounded => {
                if self.contains(stepped) {
                    Some(stepped)
                } else {
                    None
                }
            }
        }
    }

    pub fn contains(&self, pos: Point) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn random_cell(&self, rng: &mut SessionRng) -> Point {
        Point::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }
}
