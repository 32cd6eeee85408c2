use std::collections::{HashSet, VecDeque};

use super::action::Direction;
use super::grid::{Cell, Grid};

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    body: VecDeque<Cell>,
    /// Current direction of movement
    direction: Direction,
    /// Set when food was eaten; consumed by the next move
    growth_pending: bool,
}

impl Snake {
    /// Create a snake with `length` segments laid out behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let length = length.max(1);
        let behind = direction.opposite();

        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        body.push_back(segment);
        for _ in 1..length {
            segment = segment.step(behind);
            body.push_back(segment);
        }

        Self {
            body,
            direction,
            growth_pending: false,
        }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        assert!(!body.is_empty(), "snake needs at least one segment");

        Self {
            body,
            direction,
            growth_pending: false,
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body cells, head first
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Whether `direction` would be accepted by [`Snake::change_direction`]
    pub fn can_turn(&self, direction: Direction) -> bool {
        self.body.len() == 1 || !self.direction.is_opposite(direction)
    }

    /// Steer the snake. Reversing onto the neck is refused unless the snake
    /// is a lone head. Returns whether the direction was applied.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !self.can_turn(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Arm growth for the next move
    pub fn grow(&mut self) {
        self.growth_pending = true;
    }

    /// Advance one cell. The new head is pushed before the tail is dropped,
    /// so the head may enter the cell the tail is leaving.
    pub fn move_forward(&mut self) {
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);

        if self.growth_pending {
            self.growth_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn is_wall_collision(&self, grid: &Grid) -> bool {
        !grid.in_bounds(self.head())
    }

    pub fn is_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&segment| segment == head)
    }

    /// First collision found after a move, wall checked first
    pub fn collision(&self, grid: &Grid) -> Option<CollisionType> {
        if self.is_wall_collision(grid) {
            Some(CollisionType::Wall)
        } else if self.is_self_collision() {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }
}
