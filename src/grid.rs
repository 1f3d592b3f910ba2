//! Dense square RGB buffer produced by the spiral generators.
//!
//! Row-major, row 0 at the top. Every cell starts black; generators only
//! overwrite cells for integers they visit.

use crate::error::{Result, SpiralError};
use crate::Rgb;

pub const BLACK: Rgb = [0, 0, 0];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    cells: Vec<Rgb>,
}

impl Grid {
    /// Allocate a `dim × dim` black grid.
    pub fn new(dim: usize) -> Result<Self> {
        let len = dim
            .checked_mul(dim)
            .ok_or_else(|| SpiralError::Overflow(format!("grid {}x{} cell count", dim, dim)))?;
        Ok(Grid {
            dim,
            cells: vec![BLACK; len],
        })
    }

    /// Side length of the grid.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row < self.dim && col < self.dim {
            Some(self.cells[row * self.dim + col])
        } else {
            None
        }
    }

    /// Write a cell; returns false (and writes nothing) when out of range.
    pub fn try_set(&mut self, row: usize, col: usize, color: Rgb) -> bool {
        if row < self.dim && col < self.dim {
            self.cells[row * self.dim + col] = color;
            true
        } else {
            false
        }
    }

    /// Mirror top to bottom.
    pub fn flip_vertical(self) -> Self {
        let dim = self.dim;
        let cells = self
            .cells
            .chunks(dim.max(1))
            .rev()
            .flat_map(|row| row.iter().copied())
            .collect();
        Grid { dim, cells }
    }

    /// Quarter turn clockwise: `out[i][j] = in[n-1-j][i]`.
    pub fn rotate_clockwise(self) -> Self {
        let n = self.dim;
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..n {
            for j in 0..n {
                cells.push(self.cells[(n - 1 - j) * n + i]);
            }
        }
        Grid { dim: n, cells }
    }

    /// Flatten to `[r, g, b, r, g, b, ...]` for texture upload.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.iter().copied()).collect()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = [255, 0, 0];
    const GREEN: Rgb = [0, 255, 0];
    const BLUE: Rgb = [0, 0, 255];

    fn marked_3x3() -> Grid {
        // R G .
        // B . .
        // . . .
        let mut g = Grid::new(3).unwrap();
        g.try_set(0, 0, RED);
        g.try_set(0, 1, GREEN);
        g.try_set(1, 0, BLUE);
        g
    }

    #[test]
    fn test_new_is_black() {
        let g = Grid::new(4).unwrap();
        assert_eq!(g.dim(), 4);
        assert_eq!(g.cells().len(), 16);
        assert!(g.cells().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn test_new_overflow() {
        assert!(matches!(Grid::new(usize::MAX), Err(SpiralError::Overflow(_))));
    }

    #[test]
    fn test_try_set_out_of_range() {
        let mut g = Grid::new(2).unwrap();
        assert!(!g.try_set(2, 0, RED));
        assert!(!g.try_set(0, 2, RED));
        assert!(g.cells().iter().all(|&c| c == BLACK));
        assert_eq!(g.get(5, 5), None);
    }

    #[test]
    fn test_flip_vertical() {
        let g = marked_3x3().flip_vertical();
        assert_eq!(g.get(2, 0), Some(RED));
        assert_eq!(g.get(2, 1), Some(GREEN));
        assert_eq!(g.get(1, 0), Some(BLUE));
        assert_eq!(g.get(0, 0), Some(BLACK));
    }

    #[test]
    fn test_rotate_clockwise() {
        // . B R
        // . . G
        // . . .
        let g = marked_3x3().rotate_clockwise();
        assert_eq!(g.get(0, 2), Some(RED));
        assert_eq!(g.get(1, 2), Some(GREEN));
        assert_eq!(g.get(0, 1), Some(BLUE));
    }

    #[test]
    fn test_flip_then_rotate_is_transpose() {
        let src = marked_3x3();
        let out = src.clone().flip_vertical().rotate_clockwise();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(out.get(r, c), src.get(c, r));
            }
        }
    }

    #[test]
    fn test_to_rgb_bytes() {
        let mut g = Grid::new(1).unwrap();
        g.try_set(0, 0, [1, 2, 3]);
        assert_eq!(g.to_rgb_bytes(), vec![1, 2, 3]);
    }
}
