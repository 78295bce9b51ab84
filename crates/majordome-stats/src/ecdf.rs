//! Empirical Cumulative Distribution Function (ECDF)
//!
//! The ECDF is a step function that estimates the underlying CDF of a
//! sample. For a sample of n values, ECDF(x) = (number of values <= x) / n.
//!
//! Two plotting styles are supported:
//!
//! - **Dots**: one scatter point per sample, y = (k+1)/n at the k-th
//!   smallest sample
//! - **Step line**: a right-continuous staircase polyline with flat tails
//!   at y = 0 and y = 1, extended past the sample range

use crate::clean::{CleanOptions, SampleInput};
use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// Empirical Cumulative Distribution Function
///
/// Holds an immutable sorted copy of the cleaned sample; evaluation never
/// touches shared state, so values can be queried from multiple threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ecdf {
    /// Sorted, NaN-free values (infinities permitted)
    values: Vec<f64>,
    /// Number of samples
    n: usize,
}

impl Ecdf {
    /// Build an ECDF from data
    ///
    /// NaN entries are dropped during cleaning; infinities are kept. At
    /// least one usable sample is required.
    ///
    /// Time complexity: O(n log n) for sorting.
    pub fn from_data(data: impl Into<SampleInput>) -> StatsResult<Self> {
        let options = CleanOptions::default().allow_infinite();
        let mut values = data.into().cleaned(&options)?;

        // No NaNs after cleaning, so the comparison is total.
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let n = values.len();
        Ok(Self { values, n })
    }

    /// Evaluate the ECDF at a single point
    ///
    /// Returns the proportion of samples <= x. A sample exactly equal to
    /// `x` counts (the ECDF is right-continuous). NaN queries are
    /// rejected.
    ///
    /// Time complexity: O(log n).
    pub fn evaluate(&self, x: f64) -> StatsResult<f64> {
        if x.is_nan() {
            return Err(StatsError::QueryContainsNan);
        }
        Ok(self.rank(x) as f64 / self.n as f64)
    }

    /// Evaluate the ECDF at a sequence of points
    ///
    /// The NaN check runs over the raw query before any conversion, so a
    /// NaN anywhere fails immediately. Infinite query points are allowed.
    /// Output has one entry per (cleaned) query point, in query order.
    pub fn evaluate_many(&self, x: impl Into<SampleInput>) -> StatsResult<Vec<f64>> {
        let x = x.into();
        if x.has_nan() {
            return Err(StatsError::QueryContainsNan);
        }

        let options = CleanOptions::default().allow_infinite();
        let queries = x.cleaned(&options)?;

        Ok(queries
            .iter()
            .map(|&q| self.rank(q) as f64 / self.n as f64)
            .collect())
    }

    /// Count of samples <= x via binary search over the sorted buffer
    fn rank(&self, x: f64) -> usize {
        self.values.partition_point(|&v| v <= x)
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.n
    }

    /// Check if the ECDF holds no samples
    ///
    /// Construction requires at least one sample, so this only returns
    /// true for deserialized placeholders.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Get the sorted samples
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Generate `(x, y)` coordinates in "dots" style
    ///
    /// `x` is the sorted samples and `y[k] = (k+1)/n`, i.e. the ECDF
    /// evaluated at the sample points themselves.
    pub fn dots(&self) -> (Vec<f64>, Vec<f64>) {
        let x = self.values.clone();
        let y = (1..=self.n).map(|k| k as f64 / self.n as f64).collect();
        (x, y)
    }

    /// Generate `(x, y)` coordinates in step-line style
    ///
    /// Produces `2*(n+1)` points: a flat tail from `min_x` to the first
    /// sample at y = 0, a horizontal-then-vertical staircase through each
    /// sample's cumulative probability, and a flat tail from the last
    /// sample to `max_x` at y = 1. Bounds come from [`StepBounds`].
    pub fn step_line(&self, bounds: &StepBounds) -> StatsResult<(Vec<f64>, Vec<f64>)> {
        if self.values.is_empty() {
            return Err(StatsError::InsufficientSamples {
                required: 1,
                actual: 0,
            });
        }

        let n = self.values.len();
        let (min_x, max_x) = bounds.resolve(self.values[0], self.values[n - 1])?;

        let m = 2 * (n + 1);
        let mut xs = vec![0.0; m];
        let mut ys = vec![0.0; m];

        // ys[0] and ys[1] stay at zero; each sample contributes its
        // cumulative probability twice (tread and riser).
        for k in 0..n {
            let p = (k + 1) as f64 / n as f64;
            ys[2 + 2 * k] = p;
            ys[3 + 2 * k] = p;
        }

        xs[0] = min_x;
        xs[1] = self.values[0];
        for k in 0..n {
            xs[2 + 2 * k] = self.values[k];
        }
        for k in 1..n {
            xs[1 + 2 * k] = self.values[k];
        }
        xs[m - 1] = max_x;

        Ok((xs, ys))
    }
}

/// Plot bounds for step-line ECDF output
///
/// Either a fractional tail buffer (`buff`, relative to the sample range)
/// or explicit bounds must be supplied. Explicit bounds override the
/// buffer per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBounds {
    /// Tail extension as a fraction of the sample range
    pub buff: Option<f64>,
    /// Explicit lower plot bound, overrides `buff` on the left
    pub min_x: Option<f64>,
    /// Explicit upper plot bound, overrides `buff` on the right
    pub max_x: Option<f64>,
}

impl Default for StepBounds {
    fn default() -> Self {
        Self {
            buff: Some(0.1),
            min_x: None,
            max_x: None,
        }
    }
}

impl StepBounds {
    /// Bounds from a fractional tail buffer
    pub fn buffer(buff: f64) -> Self {
        Self {
            buff: Some(buff),
            min_x: None,
            max_x: None,
        }
    }

    /// Fully explicit bounds, no buffer involved
    pub fn explicit(min_x: f64, max_x: f64) -> Self {
        Self {
            buff: None,
            min_x: Some(min_x),
            max_x: Some(max_x),
        }
    }

    /// Empty bounds; resolving these always fails
    pub fn none() -> Self {
        Self {
            buff: None,
            min_x: None,
            max_x: None,
        }
    }

    /// Override the lower bound
    pub fn with_min_x(mut self, min_x: f64) -> Self {
        self.min_x = Some(min_x);
        self
    }

    /// Override the upper bound
    pub fn with_max_x(mut self, max_x: f64) -> Self {
        self.max_x = Some(max_x);
        self
    }

    /// Resolve to concrete `(min_x, max_x)` for samples spanning
    /// `[first, last]`
    fn resolve(&self, first: f64, last: f64) -> StatsResult<(f64, f64)> {
        match (self.min_x, self.max_x, self.buff) {
            (Some(min_x), Some(max_x), _) => Ok((min_x, max_x)),
            (min_x, max_x, Some(buff)) => {
                let pad = (last - first) * buff;
                Ok((
                    min_x.unwrap_or(first - pad),
                    max_x.unwrap_or(last + pad),
                ))
            }
            _ => Err(StatsError::MissingBounds),
        }
    }
}

/// Evaluate the formal ECDF of `data` at positions `x`
///
/// One-shot wrapper over [`Ecdf::from_data`] and [`Ecdf::evaluate_many`].
pub fn ecdf_formal(
    x: impl Into<SampleInput>,
    data: impl Into<SampleInput>,
) -> StatsResult<Vec<f64>> {
    // The query NaN check must fire before data cleaning does.
    let x = x.into();
    if x.has_nan() {
        return Err(StatsError::QueryContainsNan);
    }
    Ecdf::from_data(data)?.evaluate_many(x)
}

/// Generate "dots" style ECDF coordinates for `data`
pub fn ecdf_dots(data: impl Into<SampleInput>) -> StatsResult<(Vec<f64>, Vec<f64>)> {
    Ok(Ecdf::from_data(data)?.dots())
}

/// Generate step-line style ECDF coordinates for `data`
pub fn ecdf_step_line(
    data: impl Into<SampleInput>,
    bounds: &StepBounds,
) -> StatsResult<(Vec<f64>, Vec<f64>)> {
    Ecdf::from_data(data)?.step_line(bounds)
}
