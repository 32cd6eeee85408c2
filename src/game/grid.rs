use super::action::Direction;

/// A cell on the game grid, in grid units (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Offset cell by delta
    pub fn offset(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Neighbouring cell one step in a direction
    pub fn step(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.offset(dcol, drow)
    }
}

/// Immutable grid dimensions for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
}

impl Grid {
    /// Create a grid of `cols` x `rows` cells.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(cols: u32, rows: u32) -> Self {
        assert!(cols > 0 && rows > 0, "grid must be at least 1x1, got {cols}x{rows}");
        Self { cols, rows }
    }

    /// Grid that fits into a drawing surface of `width` x `height` units,
    /// dropping any partial block at the right and bottom edges.
    pub fn from_surface(width: u32, height: u32, block_size: u32) -> Self {
        assert!(block_size > 0, "block size must be positive");
        Self::new(width / block_size, height / block_size)
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Centre cell, rounded towards the top-left
    pub fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.col >= 0
            && cell.col < self.cols as i32
            && cell.row >= 0
            && cell.row < self.rows as i32
    }

    /// Every cell exactly once, row-major
    pub fn all_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.cols as i32).map(move |col| Cell::new(col, row)))
    }
}
