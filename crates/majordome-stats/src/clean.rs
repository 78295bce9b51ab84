//! Sample input conversion and cleaning
//!
//! Every statistical operation in this crate starts from the same step:
//! reduce caller input to a one-dimensional `Vec<f64>` with NaN entries
//! dropped. Scalars are wrapped into a single-element vector, vectors pass
//! through, and `ndarray` arrays are accepted as long as they are 1D.
//!
//! Cleaning never mutates the caller's data; it always allocates a fresh
//! vector.

use crate::error::{StatsError, StatsResult};
use ndarray::{Array1, ArrayD};

/// Numeric input accepted by the cleaning step
///
/// Constructed via `From` conversions, so public entry points take
/// `impl Into<SampleInput>` and callers pass scalars, vectors, slices
/// or `ndarray` arrays directly.
#[derive(Debug, Clone)]
pub enum SampleInput {
    /// A single value, treated as a one-element sample
    Scalar(f64),
    /// A one-dimensional sequence of values
    Vector(Vec<f64>),
    /// A dynamic-dimension array; must reduce to 1D
    Array(ArrayD<f64>),
}

impl From<f64> for SampleInput {
    fn from(value: f64) -> Self {
        SampleInput::Scalar(value)
    }
}

impl From<Vec<f64>> for SampleInput {
    fn from(values: Vec<f64>) -> Self {
        SampleInput::Vector(values)
    }
}

impl From<&[f64]> for SampleInput {
    fn from(values: &[f64]) -> Self {
        SampleInput::Vector(values.to_vec())
    }
}

impl From<&Vec<f64>> for SampleInput {
    fn from(values: &Vec<f64>) -> Self {
        SampleInput::Vector(values.clone())
    }
}

impl<const N: usize> From<[f64; N]> for SampleInput {
    fn from(values: [f64; N]) -> Self {
        SampleInput::Vector(values.to_vec())
    }
}

impl From<Array1<f64>> for SampleInput {
    fn from(values: Array1<f64>) -> Self {
        SampleInput::Vector(values.to_vec())
    }
}

impl From<ArrayD<f64>> for SampleInput {
    fn from(values: ArrayD<f64>) -> Self {
        SampleInput::Array(values)
    }
}

impl SampleInput {
    /// Check whether any entry is NaN, regardless of shape
    pub fn has_nan(&self) -> bool {
        match self {
            SampleInput::Scalar(value) => value.is_nan(),
            SampleInput::Vector(values) => values.iter().any(|v| v.is_nan()),
            SampleInput::Array(values) => values.iter().any(|v| v.is_nan()),
        }
    }

    /// Reduce the input to a one-dimensional vector
    ///
    /// Scalars wrap to a single-element vector. Arrays of any other
    /// dimensionality are rejected.
    fn into_one_dimensional(self) -> StatsResult<Vec<f64>> {
        match self {
            SampleInput::Scalar(value) => Ok(vec![value]),
            SampleInput::Vector(values) => Ok(values),
            SampleInput::Array(values) => {
                if values.ndim() != 1 {
                    return Err(StatsError::NotOneDimensional {
                        ndim: values.ndim(),
                    });
                }
                Ok(values.into_iter().collect())
            }
        }
    }

    /// Convert to a cleaned 1D vector according to `options`
    ///
    /// Steps, in order: shape reduction, NaN removal, finiteness check,
    /// minimum-length check.
    pub fn cleaned(self, options: &CleanOptions) -> StatsResult<Vec<f64>> {
        let values: Vec<f64> = self
            .into_one_dimensional()?
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect();

        if !options.inf_ok && values.iter().any(|v| v.is_infinite()) {
            return Err(StatsError::NotFinite);
        }

        if values.len() < options.min_len {
            return Err(StatsError::InsufficientSamples {
                required: options.min_len,
                actual: values.len(),
            });
        }

        Ok(values)
    }
}

/// Options for the cleaning step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    /// Whether infinite values are permitted after NaN removal
    pub inf_ok: bool,
    /// Minimum number of entries required after NaN removal
    pub min_len: usize,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            inf_ok: false,
            min_len: 1,
        }
    }
}

impl CleanOptions {
    /// Create options with the defaults (finite only, at least one entry)
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit infinite values
    pub fn allow_infinite(mut self) -> Self {
        self.inf_ok = true;
        self
    }

    /// Require at least `min_len` entries after NaN removal
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

/// Clean arbitrary numeric input into a `Vec<f64>`
///
/// Convenience wrapper over [`SampleInput::cleaned`].
pub fn clean_data(data: impl Into<SampleInput>, options: &CleanOptions) -> StatsResult<Vec<f64>> {
    data.into().cleaned(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    #[test]
    fn test_scalar_wraps_to_vector() {
        let cleaned = clean_data(2.5, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned, vec![2.5]);
    }

    #[test]
    fn test_nan_entries_dropped() {
        let data = vec![1.0, f64::NAN, 2.0, f64::NAN, 3.0];
        let cleaned = clean_data(data, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let data = vec![3.0, f64::NAN, 1.0, 2.0];
        let options = CleanOptions::default();
        let once = clean_data(data, &options).unwrap();
        let twice = clean_data(once.clone(), &options).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_infinite_rejected_by_default() {
        let data = vec![1.0, f64::INFINITY];
        let err = clean_data(data, &CleanOptions::default()).unwrap_err();
        assert_eq!(err, StatsError::NotFinite);
    }

    #[test]
    fn test_infinite_allowed_when_requested() {
        let data = vec![1.0, f64::INFINITY];
        let options = CleanOptions::default().allow_infinite();
        let cleaned = clean_data(data, &options).unwrap();
        assert_eq!(cleaned.len(), 2);
    }

    #[test]
    fn test_all_nan_is_insufficient() {
        let data = vec![f64::NAN, f64::NAN, f64::NAN];
        let err = clean_data(data, &CleanOptions::default()).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientSamples {
                required: 1,
                actual: 0,
            }
        );
    }

    #[test]
    fn test_min_len_enforced_after_nan_removal() {
        let data = vec![1.0, f64::NAN];
        let options = CleanOptions::default().with_min_len(2);
        let err = clean_data(data, &options).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientSamples {
                required: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_two_dimensional_array_rejected() {
        let data = ArrayD::<f64>::zeros(vec![2, 3]);
        let err = clean_data(data, &CleanOptions::default()).unwrap_err();
        assert_eq!(err, StatsError::NotOneDimensional { ndim: 2 });
    }

    #[test]
    fn test_one_dimensional_array_accepted() {
        let data = ArrayD::from_shape_vec(vec![3], vec![1.0, 2.0, 3.0]).unwrap();
        let cleaned = clean_data(data, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_original_input_untouched() {
        let data = vec![2.0, f64::NAN, 1.0];
        let cleaned = clean_data(&data, &CleanOptions::default()).unwrap();
        assert_eq!(cleaned, vec![2.0, 1.0]);
        assert_eq!(data.len(), 3);
    }
}
