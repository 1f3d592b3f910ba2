//! Bucket statistics over a generated spiral.
//!
//! Two views of the same run: how many visited integers fall in each bucket,
//! and how many grid cells end up showing each bucket's color. They differ for
//! the Sacks layout, where several integers can share one cell.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::grid::Grid;
use crate::{classify, color_of, Bucket, FamilySets, Result, SpiralGenerator};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Census {
    counts: BTreeMap<Bucket, usize>,
}

impl Census {
    /// Classify every integer in `numbers`.
    pub fn of_numbers(numbers: Range<i64>, sets: &FamilySets) -> Self {
        let mut counts = BTreeMap::new();
        for n in numbers {
            *counts.entry(classify(n, sets)).or_insert(0) += 1;
        }
        Census { counts }
    }

    /// Count cells by displayed color. Black cells count as [`Bucket::None`].
    pub fn of_grid(grid: &Grid) -> Self {
        let mut counts = BTreeMap::new();
        for &cell in grid.cells() {
            let bucket = Bucket::ALL
                .iter()
                .copied()
                .find(|&b| color_of(b) == cell)
                .unwrap_or(Bucket::None);
            *counts.entry(bucket).or_insert(0) += 1;
        }
        Census { counts }
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        self.counts.get(&bucket).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Everything except [`Bucket::None`].
    pub fn primes(&self) -> usize {
        self.total() - self.get(Bucket::None)
    }

    /// `(bucket, count)` for all five buckets in priority order.
    pub fn rows(&self) -> Vec<(Bucket, usize)> {
        Bucket::ALL.iter().map(|&b| (b, self.get(b))).collect()
    }
}

/// Both census views for one generator run.
#[derive(Debug, Clone)]
pub struct SpiralReport {
    pub numbers: Census,
    pub pixels: Census,
}

impl SpiralReport {
    pub fn compute(generator: &dyn SpiralGenerator) -> Result<Self> {
        let grid = generator.generate()?;
        Ok(Self::from_grid(generator, &grid))
    }

    /// Use an already generated grid.
    pub fn from_grid(generator: &dyn SpiralGenerator, grid: &Grid) -> Self {
        SpiralReport {
            numbers: Census::of_numbers(generator.numbers(), generator.families()),
            pixels: Census::of_grid(grid),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SacksSpiral, UlamSpiral};

    #[test]
    fn test_census_of_numbers_small_range() {
        let sets = FamilySets::new();
        let c = Census::of_numbers(0..20, &sets);
        // 11, 13 -> family 11; 17, 19 -> family 17; 2, 3, 5, 7 generic
        assert_eq!(c.get(Bucket::Family41), 0);
        assert_eq!(c.get(Bucket::Family17), 2);
        assert_eq!(c.get(Bucket::Family11), 2);
        assert_eq!(c.get(Bucket::GenericPrime), 4);
        assert_eq!(c.get(Bucket::None), 12);
        assert_eq!(c.total(), 20);
        assert_eq!(c.primes(), 8);
    }

    #[test]
    fn test_ulam_pixels_match_numbers() {
        // Ulam places each integer on its own cell; the unvisited last cell is black
        let u = UlamSpiral::new(15).unwrap();
        let report = SpiralReport::compute(&u).unwrap();
        assert_eq!(report.pixels.total(), 225);
        assert_eq!(report.numbers.total(), 224);
        for b in [Bucket::Family41, Bucket::Family17, Bucket::Family11, Bucket::GenericPrime] {
            assert_eq!(report.pixels.get(b), report.numbers.get(b), "{:?}", b);
        }
    }

    #[test]
    fn test_sacks_pixels_bounded_by_numbers() {
        let s = SacksSpiral::new(40).unwrap();
        let report = SpiralReport::compute(&s).unwrap();
        assert_eq!(report.pixels.total(), 80 * 80);
        assert_eq!(report.numbers.total(), 1600);
        assert!(report.pixels.primes() <= report.numbers.primes());
        assert!(report.pixels.get(Bucket::Family41) > 0);
    }

    #[test]
    fn test_rows_order() {
        let c = Census::default();
        let rows = c.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], (Bucket::Family41, 0));
        assert_eq!(rows[4], (Bucket::None, 0));
    }
}
