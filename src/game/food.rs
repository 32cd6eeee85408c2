//! Food placement on free cells.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Cell, Grid};

/// Random draws attempted before falling back to enumerating free cells
pub const MAX_SAMPLES: usize = 64;

/// Pick a cell uniformly among those not in `occupied`.
///
/// Rejection sampling is used while free cells are plentiful. Once fewer than
/// a quarter of the grid is free, or sampling keeps missing, the free cells
/// are enumerated and one is chosen directly. Returns `None` when the board
/// is full.
pub fn place_avoiding<R: Rng + ?Sized>(
    occupied: &HashSet<Cell>,
    grid: &Grid,
    rng: &mut R,
) -> Option<Cell> {
    let total = grid.area();
    let taken = occupied.iter().filter(|cell| grid.in_bounds(**cell)).count();
    let free = total - taken.min(total);

    if free == 0 {
        return None;
    }

    if free * 4 >= total {
        for _ in 0..MAX_SAMPLES {
            let candidate = Cell::new(
                rng.gen_range(0..grid.cols()) as i32,
                rng.gen_range(0..grid.rows()) as i32,
            );
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    let free_cells: Vec<Cell> = grid
        .all_cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();
    free_cells.choose(rng).copied()
}
