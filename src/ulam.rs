//! Ulam's square spiral.
//!
//! Integers are laid out from the center cell in straight legs of length
//! 1, 1, 2, 2, 3, 3, ... alternating between the horizontal and vertical
//! axis. The walk stops as soon as the counter reaches `size²`, so the last
//! cell of the outermost ring is never filled.

use std::ops::Range;

use crate::error::{check_size, checked_square, Result, SpiralError};
use crate::grid::Grid;
use crate::{classify, color_of, FamilySets, SpiralGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A cell in pre-transform grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

/// Walk state of the square spiral. Yields `(num, position)` in traversal order.
///
/// `x` indexes columns and `y` rows, so a placement lands on `(y, x)`.
#[derive(Debug, Clone)]
pub struct SpiralCursor {
    x: i64,
    y: i64,
    step: i64,
    num: i64,
    max_num: i64,
    axis: Axis,
    leg_len: i64,
    leg_done: i64,
}

impl SpiralCursor {
    /// Start at the center of an odd `size × size` grid with `num = 1`.
    pub fn new(size: i64, max_num: i64) -> Self {
        SpiralCursor {
            x: size / 2,
            y: size / 2,
            step: 1,
            num: 1,
            max_num,
            axis: Axis::Horizontal,
            leg_len: 1,
            leg_done: 0,
        }
    }

    fn advance(&mut self) {
        match self.axis {
            Axis::Horizontal => self.x += self.step,
            Axis::Vertical => self.y += self.step,
        }
        self.num += 1;
        self.leg_done += 1;

        if self.leg_done == self.leg_len {
            self.leg_done = 0;
            // every leg reverses the step; after the vertical leg it is
            // reversed once more, so the pair shares a turn direction
            self.step = -self.step;
            match self.axis {
                Axis::Horizontal => self.axis = Axis::Vertical,
                Axis::Vertical => {
                    self.axis = Axis::Horizontal;
                    self.step = -self.step;
                    self.leg_len += 1;
                }
            }
        }
    }
}

impl Iterator for SpiralCursor {
    type Item = (i64, Position);

    fn next(&mut self) -> Option<Self::Item> {
        if self.num >= self.max_num {
            return None;
        }
        // the cursor rests on the next cell, inside the grid for odd sizes;
        // the conversion below is only a guard
        debug_assert!(
            self.x >= 0 && self.y >= 0,
            "cursor left the grid at ({}, {})",
            self.x,
            self.y
        );
        let pos = Position {
            row: usize::try_from(self.y).ok()?,
            col: usize::try_from(self.x).ok()?,
        };
        let num = self.num;
        self.advance();
        Some((num, pos))
    }
}

#[derive(Debug, Clone)]
pub struct UlamSpiral {
    size: i64,
    max_num: i64,
    dim: usize,
    families: FamilySets,
}

impl UlamSpiral {
    /// Even sizes are bumped to the next odd number so there is a single
    /// center cell.
    pub fn new(size: i64) -> Result<Self> {
        check_size(size)?;
        let size = if size % 2 == 0 {
            size.checked_add(1)
                .ok_or_else(|| SpiralError::Overflow(format!("size {} + 1", size)))?
        } else {
            size
        };
        let max_num = checked_square(size)?;
        let dim = usize::try_from(size)
            .map_err(|_| SpiralError::Overflow(format!("size {} as grid dimension", size)))?;
        Ok(UlamSpiral {
            size,
            max_num,
            dim,
            families: FamilySets::new(),
        })
    }

    /// Effective (odd) size.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Fresh walk over every placed integer.
    pub fn cursor(&self) -> SpiralCursor {
        SpiralCursor::new(self.size, self.max_num)
    }

    /// The grid as walked, before the display transform.
    pub fn raw_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.dim())?;
        for (num, pos) in self.cursor() {
            let color = color_of(classify(num, &self.families));
            grid.try_set(pos.row, pos.col, color);
        }
        Ok(grid)
    }
}

impl SpiralGenerator for UlamSpiral {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_num(&self) -> i64 {
        self.max_num
    }

    fn numbers(&self) -> Range<i64> {
        1..self.max_num
    }

    fn families(&self) -> &FamilySets {
        &self.families
    }

    fn generate(&self) -> Result<Grid> {
        log::debug!("ulam: walking {} integers on a {}x{} grid", self.max_num - 1, self.size, self.size);
        Ok(self.raw_grid()?.flip_vertical().rotate_clockwise())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 3] = [255, 255, 255];
    const BLACK: [u8; 3] = [0, 0, 0];

    #[test]
    fn test_size_normalization() {
        assert_eq!(UlamSpiral::new(4).unwrap().size(), 5);
        assert_eq!(UlamSpiral::new(5).unwrap().size(), 5);
        assert_eq!(UlamSpiral::new(1).unwrap().size(), 1);
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(UlamSpiral::new(0), Err(SpiralError::InvalidArgument(_))));
        assert!(matches!(UlamSpiral::new(-7), Err(SpiralError::InvalidArgument(_))));
        assert!(matches!(UlamSpiral::new(i64::MAX), Err(SpiralError::Overflow(_))));
        assert!(matches!(UlamSpiral::new(4_000_000_001), Err(SpiralError::Overflow(_))));
    }

    #[test]
    fn test_center_placement() {
        let u = UlamSpiral::new(5).unwrap();
        let (num, pos) = u.cursor().next().unwrap();
        assert_eq!(num, 1);
        assert_eq!(pos, Position { row: 2, col: 2 });
    }

    #[test]
    fn test_first_ring_layout() {
        // Pre-transform positions for size 3:
        //   5 4 3
        //   6 1 2
        //   7 8 .
        let placed: Vec<(i64, Position)> = UlamSpiral::new(3).unwrap().cursor().collect();
        let expect = [
            (1, 1, 1),
            (2, 1, 2),
            (3, 0, 2),
            (4, 0, 1),
            (5, 0, 0),
            (6, 1, 0),
            (7, 2, 0),
            (8, 2, 1),
        ];
        assert_eq!(placed.len(), expect.len());
        for (&(num, pos), &(n, row, col)) in placed.iter().zip(expect.iter()) {
            assert_eq!(num, n);
            assert_eq!(pos, Position { row, col });
        }
    }

    #[test]
    fn test_consecutive_integers_adjacent() {
        for size in [3, 5, 9, 21] {
            let placed: Vec<(i64, Position)> = UlamSpiral::new(size).unwrap().cursor().collect();
            for pair in placed.windows(2) {
                let (a, b) = (pair[0].1, pair[1].1);
                let dist = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
                assert_eq!(dist, 1, "size {}: {} -> {}", size, pair[0].0, pair[1].0);
            }
        }
    }

    #[test]
    fn test_every_cell_but_last_visited_once() {
        let u = UlamSpiral::new(7).unwrap();
        let mut seen = vec![false; 49];
        let mut count = 0;
        for (_, pos) in u.cursor() {
            let idx = pos.row * 7 + pos.col;
            assert!(!seen[idx], "cell {:?} visited twice", pos);
            seen[idx] = true;
            count += 1;
        }
        assert_eq!(count, 48);
    }

    #[test]
    fn test_cursor_stays_inside_grid() {
        for size in (1..=41).step_by(2) {
            let u = UlamSpiral::new(size).unwrap();
            let dim = u.dim();
            let mut count = 0;
            for (_, pos) in u.cursor() {
                assert!(pos.row < dim && pos.col < dim, "size {}: {:?}", size, pos);
                count += 1;
            }
            // the walk only ends once num reaches size²
            assert_eq!(count, u.max_num() - 1, "size {}", size);
        }
    }

    #[test]
    fn test_dim_matches_normalized_size() {
        for (requested, dim) in [(1, 1), (2, 3), (4, 5), (5, 5), (100, 101)] {
            let u = UlamSpiral::new(requested).unwrap();
            assert_eq!(u.dim(), dim);
            assert_eq!(u.dim() as i64, u.size());
            assert_eq!(u.generate().unwrap().dim(), dim);
        }
    }

    #[test]
    fn test_size_one_is_single_black_pixel() {
        let grid = UlamSpiral::new(1).unwrap().generate().unwrap();
        assert_eq!(grid.dim(), 1);
        assert_eq!(grid.get(0, 0), Some(BLACK));
    }

    #[test]
    fn test_size_three_end_to_end() {
        let grid = UlamSpiral::new(3).unwrap().generate().unwrap();
        assert_eq!(grid.dim(), 3);
        // 5 sits at raw (0, 0) and 4 at raw (0, 1); the display transform is a transpose
        assert_eq!(grid.get(0, 0), Some(WHITE));
        assert_eq!(grid.get(1, 0), Some(BLACK));
        // 2, 3, 7 are primes in no family
        assert_eq!(grid.get(2, 1), Some(WHITE));
        assert_eq!(grid.get(2, 0), Some(WHITE));
        assert_eq!(grid.get(0, 2), Some(WHITE));
    }

    #[test]
    fn test_family_colors_placed() {
        let u = UlamSpiral::new(9).unwrap();
        let raw = u.raw_grid().unwrap();
        let pos = |n: i64| u.cursor().find(|&(num, _)| num == n).map(|(_, p)| p).unwrap();
        let p41 = pos(41);
        let p17 = pos(17);
        let p11 = pos(11);
        assert_eq!(raw.get(p41.row, p41.col), Some([255, 0, 0]));
        assert_eq!(raw.get(p17.row, p17.col), Some([0, 255, 0]));
        assert_eq!(raw.get(p11.row, p11.col), Some([0, 0, 255]));
    }

    #[test]
    fn test_generate_idempotent() {
        let u = UlamSpiral::new(31).unwrap();
        assert_eq!(u.generate().unwrap(), u.generate().unwrap());
    }
}
