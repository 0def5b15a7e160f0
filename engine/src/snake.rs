use std::collections::{HashSet, VecDeque};

use crate::grid::Grid;
use crate::types::{CollisionReason, Direction, Point};

/// Ordered body, head at the front. A `HashSet` mirror of the body gives
/// O(1) occupancy checks for collisions and food placement.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    direction: Direction,
    pending_direction: Option<Direction>,
    pending_growth: bool,
}

impl Snake {
    pub fn new(start: Point, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(start);
        body_set.insert(start);

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
            pending_growth: false,
        }
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Point], direction: Direction) -> Self {
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let body_set: HashSet<Point> = segments.iter().copied().collect();
        assert!(!body.is_empty());
        assert_eq!(body.len(), body_set.len(), "segments must be distinct");

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
            pending_growth: false,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, pos: Point) -> bool {
        self.body_set.contains(&pos)
    }

    pub fn occupied_cells(&self) -> &HashSet<Point> {
        &self.body_set
    }

    /// Ordered segments, head first.
    pub fn segments(&self) -> impl Iterator<Item = Point> + '_ {
        self.body.iter().copied()
    }

    /// Stages a direction change for the next tick. A reversal into the
    /// second segment is silently dropped; with a single segment there is
    /// nothing to reverse into, so anything goes.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.body.len() >= 2 && direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    /// Promotes the staged direction. Called once per tick, before
    /// `advance`.
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// One-shot growth flag; the next `advance` keeps the tail. Idempotent.
    pub fn mark_growth(&mut self) {
        self.pending_growth = true;
    }

    pub fn growth_pending(&self) -> bool {
        self.pending_growth
    }

    /// The cell the head would move to this tick. `None` means the step
    /// leaves a bounded board.
    pub fn next_head(&self, grid: &Grid) -> Option<Point> {
        grid.advance(self.head(), self.direction)
    }

    /// Moves the snake one cell. On a collision nothing is mutated and the
    /// reason is returned. The collision check runs against the segments
    /// that will still be occupied after the move: the tail cell is vacated
    /// this tick and does not count, unless pending growth retains it.
    /// Returns whether the body grew.
    pub fn advance(&mut self, grid: &Grid) -> Result<bool, CollisionReason> {
        let next = self.next_head(grid).ok_or(CollisionReason::WallHit)?;

        if self.body_set.contains(&next) && (self.pending_growth || next != self.tail()) {
            return Err(CollisionReason::SelfCollision);
        }

        if self.pending_growth {
            self.pending_growth = false;
            self.body.push_front(next);
            self.body_set.insert(next);
            return Ok(true);
        }

        // Pop before push so that moving into the vacated tail cell keeps
        // the occupancy set consistent.
        let tail = self.body.pop_back().expect("snake body should never be empty");
        self.body_set.remove(&tail);
        self.body.push_front(next);
        self.body_set.insert(next);
        Ok(false)
    }

    /// Collapses the body to a single segment and clears all staged state.
    pub fn reset(&mut self, start: Point, direction: Direction) {
        self.body.clear();
        self.body_set.clear();
        self.body.push_back(start);
        self.body_set.insert(start);
        self.direction = direction;
        self.pending_direction = None;
        self.pending_growth = false;
    }
}
