pub mod analysis;
pub mod error;
pub mod grid;
pub mod sacks;
pub mod ulam;
pub mod viz_common;

use std::collections::HashSet;
use std::ops::Range;

pub use error::{Result, SpiralError};
pub use grid::Grid;
pub use sacks::SacksSpiral;
pub use ulam::UlamSpiral;

/// One pixel: `[r, g, b]`, each channel 0..=255.
pub type Rgb = [u8; 3];

// ─── Primality ──────────────────────────────────────────────────────────────

/// Trial division by odd divisors up to floor(sqrt(n)).
pub fn is_prime(n: i64) -> bool {
    if n == 2 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }
    let mut d: i64 = 3;
    // d <= n / d is d*d <= n without overflowing near i64::MAX
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

// ─── Polynomial families ────────────────────────────────────────────────────

/// How many terms `i = 0..FAMILY_TERMS` of each polynomial are tested.
pub const FAMILY_TERMS: i64 = 1000;

/// Constants `c` of the families `i² + i + c`, in classification priority order.
pub const FAMILY_CONSTANTS: [i64; 3] = [41, 17, 11];

/// The prime values of `i² + i + c` for `i` in `0..FAMILY_TERMS`.
pub fn build_family_set(c: i64) -> HashSet<i64> {
    (0..FAMILY_TERMS)
        .map(|i| i * i + i + c)
        .filter(|&v| is_prime(v))
        .collect()
}

/// The three family sets, computed once per generator and never mutated.
#[derive(Debug, Clone)]
pub struct FamilySets {
    pub f41: HashSet<i64>,
    pub f17: HashSet<i64>,
    pub f11: HashSet<i64>,
}

impl FamilySets {
    pub fn new() -> Self {
        let [c41, c17, c11] = FAMILY_CONSTANTS;
        let sets = FamilySets {
            f41: build_family_set(c41),
            f17: build_family_set(c17),
            f11: build_family_set(c11),
        };
        log::debug!(
            "family sets built: |41|={} |17|={} |11|={}",
            sets.f41.len(),
            sets.f17.len(),
            sets.f11.len()
        );
        sets
    }
}

impl Default for FamilySets {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Classification ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Family41,
    Family17,
    Family11,
    GenericPrime,
    None,
}

impl Bucket {
    /// All buckets in priority order.
    pub const ALL: [Bucket; 5] = [
        Bucket::Family41,
        Bucket::Family17,
        Bucket::Family11,
        Bucket::GenericPrime,
        Bucket::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Family41 => "n²+n+41",
            Bucket::Family17 => "n²+n+17",
            Bucket::Family11 => "n²+n+11",
            Bucket::GenericPrime => "other prime",
            Bucket::None => "composite",
        }
    }
}

/// Family 41 > family 17 > family 11 > generic prime > none.
///
/// Family sets hold only primes, so membership alone decides the first three.
pub fn classify(n: i64, sets: &FamilySets) -> Bucket {
    if sets.f41.contains(&n) {
        Bucket::Family41
    } else if sets.f17.contains(&n) {
        Bucket::Family17
    } else if sets.f11.contains(&n) {
        Bucket::Family11
    } else if is_prime(n) {
        Bucket::GenericPrime
    } else {
        Bucket::None
    }
}

/// Display color of a bucket.
pub fn color_of(bucket: Bucket) -> Rgb {
    match bucket {
        Bucket::Family41 => [255, 0, 0],
        Bucket::Family17 => [0, 255, 0],
        Bucket::Family11 => [0, 0, 255],
        Bucket::GenericPrime => [255, 255, 255],
        Bucket::None => grid::BLACK,
    }
}

// ─── Generators ─────────────────────────────────────────────────────────────

/// A one-shot batch producer of a square color grid.
pub trait SpiralGenerator {
    /// Side length of the grid `generate` returns.
    fn dim(&self) -> usize;

    /// Exclusive upper bound `size²` of the visited integers.
    fn max_num(&self) -> i64;

    /// The integers this generator places.
    fn numbers(&self) -> Range<i64>;

    fn families(&self) -> &FamilySets;

    /// Build the full grid. Calling twice yields identical grids.
    fn generate(&self) -> Result<Grid>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    /// Ulam's square spiral
    Ulam,
    /// Sacks' polar spiral
    Sacks,
}

impl Algorithm {
    pub fn build(self, size: i64) -> Result<Box<dyn SpiralGenerator + Send + Sync>> {
        Ok(match self {
            Algorithm::Ulam => Box::new(UlamSpiral::new(size)?),
            Algorithm::Sacks => Box::new(SacksSpiral::new(size)?),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Ulam => "Ulam",
            Algorithm::Sacks => "Sacks",
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
