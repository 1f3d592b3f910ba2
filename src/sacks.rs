//! Sacks' polar spiral.
//!
//! Integer `n` sits at radius `sqrt(n)` and angle `2π·sqrt(n)`, so every
//! perfect square lands on the same ray. Placement has no sequential state
//! and is computed in parallel; writes are applied in ascending `n` so a
//! later integer overwrites an earlier one sharing its cell.

use std::f64::consts::TAU;
use std::ops::Range;

use rayon::prelude::*;

use crate::error::{check_size, checked_square, Result, SpiralError};
use crate::grid::Grid;
use crate::{color_of, is_prime, Bucket, FamilySets, Rgb, SpiralGenerator};

#[derive(Debug, Clone)]
pub struct SacksSpiral {
    size: i64,
    max_num: i64,
    dim: usize,
    families: FamilySets,
}

impl SacksSpiral {
    pub fn new(size: i64) -> Result<Self> {
        check_size(size)?;
        let max_num = checked_square(size)?;
        let dim = size
            .checked_mul(2)
            .and_then(|d| usize::try_from(d).ok())
            .ok_or_else(|| SpiralError::Overflow(format!("grid dimension 2 x {}", size)))?;
        Ok(SacksSpiral {
            size,
            max_num,
            dim,
            families: FamilySets::new(),
        })
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Pre-transform `(row, col)` of `num`, offset so the origin is the
    /// grid center. The polar offsets are truncated toward zero.
    pub fn index_of(&self, num: i64) -> (i64, i64) {
        let rho = (num as f64).sqrt();
        let phi = TAU * rho;
        let row = (rho * phi.sin()) as i64 + self.size;
        let col = (rho * phi.cos()) as i64 + self.size;
        (row, col)
    }

    /// Family membership is re-checked against primality here; the sets
    /// only hold primes so the result matches [`crate::classify`].
    fn bucket(&self, num: i64) -> Bucket {
        let f = &self.families;
        if f.f41.contains(&num) && is_prime(num) {
            Bucket::Family41
        } else if f.f17.contains(&num) && is_prime(num) {
            Bucket::Family17
        } else if f.f11.contains(&num) && is_prime(num) {
            Bucket::Family11
        } else if is_prime(num) {
            Bucket::GenericPrime
        } else {
            Bucket::None
        }
    }

    /// Every colored point `(row, col, color)` in ascending `num` order.
    /// Composites are never written.
    pub fn points(&self) -> Vec<(i64, i64, Rgb)> {
        (0..self.max_num)
            .into_par_iter()
            .filter_map(|num| match self.bucket(num) {
                Bucket::None => None,
                bucket => {
                    let (row, col) = self.index_of(num);
                    Some((row, col, color_of(bucket)))
                }
            })
            .collect()
    }

    /// The plotted grid before the display rotation.
    pub fn raw_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.dim)?;
        let skipped = plot(&mut grid, self.points());
        if skipped > 0 {
            log::debug!("sacks: skipped {} out-of-range points", skipped);
        }
        Ok(grid)
    }
}

/// Write points in order, later ones overwriting earlier ones. Points outside
/// the grid are dropped and counted.
///
/// For `num < size²` every index lands in `[1, 2·size)`, so with
/// [`SacksSpiral::points`] the skip path is a guard only.
fn plot(grid: &mut Grid, points: impl IntoIterator<Item = (i64, i64, Rgb)>) -> usize {
    let mut skipped = 0;
    for (row, col, color) in points {
        let written = match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) => grid.try_set(r, c, color),
            _ => false,
        };
        if !written {
            skipped += 1;
        }
    }
    skipped
}

impl SpiralGenerator for SacksSpiral {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_num(&self) -> i64 {
        self.max_num
    }

    fn numbers(&self) -> Range<i64> {
        0..self.max_num
    }

    fn families(&self) -> &FamilySets {
        &self.families
    }

    fn generate(&self) -> Result<Grid> {
        log::debug!("sacks: plotting {} integers on a {}x{} grid", self.max_num, self.dim, self.dim);
        Ok(self.raw_grid()?.rotate_clockwise())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
