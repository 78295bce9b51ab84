//! Error types for majordome-stats
//!
//! Provides error handling for:
//! - Sample cleaning and validation
//! - ECDF evaluation
//! - Step-line coordinate generation
//! - Column-wise correlation

use thiserror::Error;

/// Main error type for statistical operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Input could not be reduced to one dimension
    #[error("input must be a 1D array (got {ndim} dimensions)")]
    NotOneDimensional { ndim: usize },

    /// Query positions contain NaN
    #[error("query positions cannot contain NaNs")]
    QueryContainsNan,

    /// Infinite entries present where only finite values are accepted
    #[error("all entries must be finite")]
    NotFinite,

    /// Too few usable samples after NaN removal
    #[error("must have at least {required} non-NaN entries (got {actual})")]
    InsufficientSamples { required: usize, actual: usize },

    /// Step-line generation needs a tail buffer or both explicit bounds
    #[error("step-line output requires `buff` or both `min_x` and `max_x`")]
    MissingBounds,

    /// Correlation columns of unequal length
    #[error("column '{column}' has length {actual}, expected {expected}")]
    LengthMismatch {
        column: String,
        actual: usize,
        expected: usize,
    },
}

/// Result type alias for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatsError::InsufficientSamples {
            required: 1,
            actual: 0,
        };
        assert!(err.to_string().contains("at least 1"));

        let err = StatsError::LengthMismatch {
            column: "speed".to_string(),
            actual: 3,
            expected: 5,
        };
        assert!(err.to_string().contains("speed"));
    }
}
