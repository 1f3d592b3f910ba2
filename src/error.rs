//! Error types for spiral generation.

use thiserror::Error;

/// Why building or running a spiral generator failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpiralError {
    /// The requested size is not a positive integer.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A derived quantity (`size²`, grid dimension, cell count) does not fit
    /// the fixed-width integer type it is computed in.
    #[error("overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, SpiralError>;

/// Reject non-positive sizes.
pub(crate) fn check_size(size: i64) -> Result<()> {
    if size <= 0 {
        return Err(SpiralError::InvalidArgument(format!(
            "size must be >= 1, got {}",
            size
        )));
    }
    Ok(())
}

/// `size * size` without silent wrapping.
pub(crate) fn checked_square(size: i64) -> Result<i64> {
    size.checked_mul(size)
        .ok_or_else(|| SpiralError::Overflow(format!("size {} squared exceeds i64", size)))
}
