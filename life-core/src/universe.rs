//! The grid aggregate: generation stepping, edits, and text rendering.
//!
//! A [`Universe`] owns two bit-packed grids and advances the simulation
//! with a snapshot-then-swap discipline:
//! 1. Every cell of the next generation is computed from the current
//!    grid into a scratch grid, using only pre-tick neighbor counts.
//! 2. The scratch grid is installed as the current one by swapping the
//!    two buffers.
//!
//! No partially-updated generation is ever observable, and the borrow
//! checker guarantees a view obtained from [`Universe::cells`] cannot
//! outlive the swap. Releasing a universe is ordinary `Drop`; there is
//! no runtime "freed" state to misuse.

use std::fmt;
use std::mem;

use log::{debug, trace};
use rand::Rng;

use crate::cell::Cell;
use crate::grid::BitGrid;
use crate::patterns::{GLIDER, PULSAR, Pattern};

/// A fixed-size toroidal Game of Life universe.
///
/// All edits take effect synchronously and are visible on the next read.
/// Coordinates wrap modulo the current dimensions, exactly as on the
/// underlying [`BitGrid`].
#[derive(Clone, Debug)]
pub struct Universe {
    cells: BitGrid,
    scratch: BitGrid,
}

impl Universe {
    /// Creates an all-dead universe of the given dimensions.
    ///
    /// The initial state is deliberately empty rather than randomized;
    /// seed it explicitly with [`Universe::randomize`],
    /// [`Universe::set_cells`], or pattern insertion.
    ///
    /// ### Panics
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: BitGrid::new(width, height),
            scratch: BitGrid::new(width, height),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    /// Reads a single cell, with toroidal coordinate wrapping.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells.get(row, col)
    }

    /// Returns the packed cell buffer of the current generation.
    ///
    /// Byte `i` holds cells `8i..8i+7`; bit `k` (0 = LSB) of byte `i` is
    /// cell `8i + k`, row-major. The slice reflects the grid as of the
    /// last mutation; [`Universe::tick`] and resizing replace the buffer.
    pub fn cells(&self) -> &[u8] {
        self.cells.as_bytes()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.population()
    }

    /// Advances the simulation by one generation.
    ///
    /// Applies the Conway transition rule to every cell simultaneously:
    /// a live cell survives with 2 or 3 live neighbors and otherwise
    /// dies; a dead cell becomes alive with exactly 3 live neighbors.
    /// The next generation is computed entirely from the pre-tick grid
    /// into the scratch buffer, which is then swapped in, so the buffer
    /// behind [`Universe::cells`] is replaced rather than reused.
    pub fn tick(&mut self) {
        for row in 0..self.cells.height() {
            for col in 0..self.cells.width() {
                let next = match (self.cells.get(row, col), self.cells.live_neighbors(row, col)) {
                    // Underpopulation.
                    (Cell::Alive, n) if n < 2 => Cell::Dead,
                    // Survival.
                    (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
                    // Overpopulation.
                    (Cell::Alive, _) => Cell::Dead,
                    // Reproduction.
                    (Cell::Dead, 3) => Cell::Alive,
                    (state, _) => state,
                };
                self.scratch.set(row, col, next);
            }
        }

        mem::swap(&mut self.cells, &mut self.scratch);
        trace!("tick complete, population = {}", self.cells.population());
    }

    /// Flips a single cell between alive and dead, with coordinate
    /// wrapping.
    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        self.cells.toggle(row, col);
    }

    /// Sets the number of columns, resetting every cell to dead.
    ///
    /// ### Panics
    /// Panics if `width` is zero.
    pub fn set_width(&mut self, width: usize) {
        let height = self.cells.height();
        self.resize(width, height);
    }

    /// Sets the number of rows, resetting every cell to dead.
    ///
    /// ### Panics
    /// Panics if `height` is zero.
    pub fn set_height(&mut self, height: usize) {
        let width = self.cells.width();
        self.resize(width, height);
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.cells.resize(width, height);
        self.scratch.resize(width, height);
        debug!("resized universe to {}x{}", width, height);
    }

    /// Sets the listed cells alive, with coordinate wrapping.
    pub fn set_cells(&mut self, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            self.cells.set(row, col, Cell::Alive);
        }
    }

    /// Replaces every cell with an independent random draw.
    ///
    /// Each cell is alive with probability `fill`. The generator is
    /// injected so callers decide between a seeded generator (tests) and
    /// an OS-seeded one (interactive use).
    ///
    /// ### Panics
    /// Panics if `fill` is not in `[0, 1]`.
    pub fn randomize(&mut self, fill: f64, rng: &mut impl Rng) {
        for row in 0..self.cells.height() {
            for col in 0..self.cells.width() {
                self.cells.set(row, col, Cell::from(rng.random_bool(fill)));
            }
        }
    }

    /// Stamps a pattern onto the grid, centered at the given cell.
    ///
    /// Overlay semantics: only the pattern's live cells are written; see
    /// [`Pattern::stamp`].
    pub fn insert(&mut self, pattern: &Pattern, center_row: usize, center_col: usize) {
        pattern.stamp(&mut self.cells, center_row, center_col);
    }

    /// Stamps a glider centered at the given cell.
    pub fn insert_glider(&mut self, center_row: usize, center_col: usize) {
        self.insert(&GLIDER, center_row, center_col);
    }

    /// Stamps a pulsar centered at the given cell.
    pub fn insert_pulsar(&mut self, center_row: usize, center_col: usize) {
        self.insert(&PULSAR, center_row, center_col);
    }

    /// Renders the grid as text, one line per row.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Universe {
    /// An all-dead 64x64 universe.
    fn default() -> Self {
        Self::new(64, 64)
    }
}

impl fmt::Display for Universe {
    /// One line per row, `'#'` for alive and `'.'` for dead, top to
    /// bottom and left to right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.cells.height() {
            for col in 0..self.cells.width() {
                let glyph = if self.cells.get(row, col).is_alive() { '#' } else { '.' };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn lone_live_cell_dies_of_underpopulation() {
        let mut universe = Universe::new(5, 5);
        universe.set_cells(&[(2, 2)]);

        universe.tick();

        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn block_is_a_still_life() {
        let mut universe = Universe::new(6, 6);
        universe.set_cells(&[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let before = universe.cells().to_vec();

        universe.tick();

        assert_eq!(universe.cells(), before.as_slice());
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut universe = Universe::new(6, 6);
        universe.set_cells(&[(2, 1), (2, 2), (2, 3)]);
        let horizontal = universe.cells().to_vec();

        universe.tick();

        let mut vertical = Universe::new(6, 6);
        vertical.set_cells(&[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(universe.cells(), vertical.cells());

        universe.tick();
        assert_eq!(universe.cells(), horizontal.as_slice());
    }

    #[test]
    fn blinker_wraps_across_a_grid_edge() {
        // A horizontal blinker straddling the left/right seam of row 0.
        let mut universe = Universe::new(5, 5);
        universe.set_cells(&[(0, 4), (0, 0), (0, 1)]);

        universe.tick();

        // It turns into a vertical blinker straddling the top/bottom seam.
        let mut expected = Universe::new(5, 5);
        expected.set_cells(&[(4, 0), (0, 0), (1, 0)]);
        assert_eq!(universe.cells(), expected.cells());

        universe.tick();

        let mut horizontal = Universe::new(5, 5);
        horizontal.set_cells(&[(0, 4), (0, 0), (0, 1)]);
        assert_eq!(universe.cells(), horizontal.cells());
    }

    #[test]
    fn glider_translates_one_diagonal_step_every_four_ticks() {
        let mut universe = Universe::new(8, 8);
        universe.insert_glider(3, 3);

        for _ in 0..4 {
            universe.tick();
        }

        let mut expected = Universe::new(8, 8);
        expected.insert_glider(4, 4);
        assert_eq!(universe.cells(), expected.cells());
    }

    #[test]
    fn glider_translation_wraps_modulo_the_grid() {
        let mut universe = Universe::new(6, 6);
        universe.insert_glider(4, 4);

        // 24 ticks = 6 diagonal steps, a full lap on a 6x6 torus.
        for _ in 0..24 {
            universe.tick();
        }

        let mut expected = Universe::new(6, 6);
        expected.insert_glider(4, 4);
        assert_eq!(universe.cells(), expected.cells());
    }

    #[test]
    fn glider_insertion_matches_canonical_cells() {
        let mut universe = Universe::new(6, 6);
        universe.insert_glider(2, 2);

        for &(row, col) in &[(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)] {
            assert_eq!(universe.get(row, col), Cell::Alive, "({row}, {col})");
        }
        assert_eq!(universe.population(), 5);

        let expected = "\
......
..#...
...#..
.###..
......
......
";
        assert_eq!(universe.render(), expected);
    }

    #[test]
    fn pulsar_oscillates_with_period_three() {
        // 17x17 leaves a dead margin around the pulsar's 15x15 envelope,
        // so the oscillation is unaffected by wrapping.
        let mut universe = Universe::new(17, 17);
        universe.insert_pulsar(8, 8);
        let start = universe.cells().to_vec();

        universe.tick();
        assert_ne!(universe.cells(), start.as_slice());

        universe.tick();
        universe.tick();
        assert_eq!(universe.cells(), start.as_slice());
    }

    #[test]
    fn pattern_insertion_overlays_existing_cells() {
        let mut universe = Universe::new(9, 9);
        universe.set_cells(&[(4, 4)]);

        universe.insert_glider(4, 4);

        // The pre-existing center cell is not part of the glider and
        // must survive the stamp.
        assert_eq!(universe.get(4, 4), Cell::Alive);
        assert_eq!(universe.population(), 6);
    }

    #[test]
    fn toggle_cell_flips_and_wraps() {
        let mut universe = Universe::new(4, 3);

        universe.toggle_cell(1, 2);
        assert_eq!(universe.get(1, 2), Cell::Alive);

        // One wrap in each direction addresses the same cell.
        universe.toggle_cell(1 + 3, 2 + 4);
        assert_eq!(universe.get(1, 2), Cell::Dead);
        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn set_width_resets_to_all_dead_and_resizes_the_buffer() {
        let mut universe = Universe::new(6, 6);
        let mut rng = StdRng::seed_from_u64(1);
        universe.randomize(0.5, &mut rng);

        universe.set_width(10);

        assert_eq!(universe.width(), 10);
        assert_eq!(universe.height(), 6);
        assert_eq!(universe.cells().len(), 8); // ceil(10 * 6 / 8)
        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn set_height_resets_to_all_dead_and_resizes_the_buffer() {
        let mut universe = Universe::new(6, 6);
        universe.set_cells(&[(0, 0), (5, 5)]);

        universe.set_height(3);

        assert_eq!(universe.width(), 6);
        assert_eq!(universe.height(), 3);
        assert_eq!(universe.cells().len(), 3); // ceil(6 * 3 / 8)
        assert_eq!(universe.population(), 0);
    }

    #[test]
    fn tick_after_resize_runs_on_the_new_dimensions() {
        let mut universe = Universe::new(4, 4);
        universe.set_cells(&[(0, 0), (1, 1), (2, 2), (3, 3)]);

        universe.set_width(7);
        universe.set_cells(&[(2, 1), (2, 2), (2, 3)]);
        universe.tick();

        let mut expected = Universe::new(7, 4);
        expected.set_cells(&[(1, 2), (2, 2), (3, 2)]);
        assert_eq!(universe.cells(), expected.cells());
    }

    #[test]
    fn render_has_height_lines_of_width_glyphs() {
        let mut universe = Universe::new(7, 3);
        universe.set_cells(&[(0, 0), (2, 6)]);

        let text = universe.render();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.chars().count(), 7);
        }
        assert_eq!(lines[0], "#......");
        assert_eq!(lines[1], ".......");
        assert_eq!(lines[2], "......#");
    }

    #[test]
    fn randomize_is_deterministic_under_a_seeded_rng() {
        let mut a = Universe::new(16, 16);
        let mut b = Universe::new(16, 16);

        a.randomize(0.5, &mut StdRng::seed_from_u64(42));
        b.randomize(0.5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.cells(), b.cells());

        a.randomize(0.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.population(), 0);

        a.randomize(1.0, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.population(), 16 * 16);
    }

    #[test]
    fn neighbor_counts_stay_in_range_on_a_unit_universe() {
        let mut universe = Universe::new(1, 1);
        universe.set_cells(&[(0, 0)]);

        // The only cell counts itself through all eight wrapped offsets
        // and dies of overpopulation.
        universe.tick();
        assert_eq!(universe.population(), 0);
    }
}
