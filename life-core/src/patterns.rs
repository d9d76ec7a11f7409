use log::debug;

use crate::cell::Cell;
use crate::grid::BitGrid;

/// A named shape, stored as cell offsets relative to a center position.
///
/// Only the live cells of the shape are listed. Stamping sets exactly
/// those bits and never clears anything, so a pattern overlays whatever
/// is already on the grid.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

/// The 5-cell glider, which travels one cell down-right every 4 ticks.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)],
};

/// The 48-cell pulsar, a period-3 oscillator spanning a 13x13 box.
pub const PULSAR: Pattern = Pattern {
    name: "Pulsar",
    cells: &[
        // Horizontal bars above and below the center.
        (-6, -4), (-6, -3), (-6, -2), (-6, 2), (-6, 3), (-6, 4),
        (-1, -4), (-1, -3), (-1, -2), (-1, 2), (-1, 3), (-1, 4),
        (1, -4), (1, -3), (1, -2), (1, 2), (1, 3), (1, 4),
        (6, -4), (6, -3), (6, -2), (6, 2), (6, 3), (6, 4),
        // Vertical bars left and right of the center.
        (-4, -6), (-4, -1), (-4, 1), (-4, 6),
        (-3, -6), (-3, -1), (-3, 1), (-3, 6),
        (-2, -6), (-2, -1), (-2, 1), (-2, 6),
        (2, -6), (2, -1), (2, 1), (2, 6),
        (3, -6), (3, -1), (3, 1), (3, 6),
        (4, -6), (4, -1), (4, 1), (4, 6),
    ],
};

/// Patterns offered to interactive frontends, in display order.
pub const PATTERNS: &[&Pattern] = &[&GLIDER, &PULSAR];

impl Pattern {
    /// Stamps the pattern onto `grid`, centered at `(center_row, center_col)`.
    ///
    /// Each offset cell is wrapped toroidally on its own, so a stamp near
    /// an edge spills over to the opposite side. Grid cells that are not
    /// part of the shape are left untouched; callers wanting a clean
    /// insertion must clear the area first.
    pub fn stamp(&self, grid: &mut BitGrid, center_row: usize, center_col: usize) {
        let center_row = (center_row % grid.height()) as isize;
        let center_col = (center_col % grid.width()) as isize;

        for &(row_offset, col_offset) in self.cells {
            let row = (center_row + row_offset as isize).rem_euclid(grid.height() as isize);
            let col = (center_col + col_offset as isize).rem_euclid(grid.width() as isize);
            grid.set(row as usize, col as usize, Cell::Alive);
        }

        debug!(
            "stamped {} at ({}, {})",
            self.name, center_row, center_col
        );
    }
}
