//! Pairwise Pearson correlation of named columns
//!
//! Numeric half of the correlation-heatmap helper: computes the symmetric
//! correlation matrix and the upper-triangle mask a renderer applies.
//! Row pairs where either entry is not finite are skipped, so columns
//! with scattered NaN holes still correlate over their common rows.

use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};

/// A named numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column label, used for matrix row/column headers
    pub label: String,
    /// Column values; all columns must have the same length
    pub values: Vec<f64>,
}

impl Column {
    /// Create a labelled column
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Symmetric Pearson correlation matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Column labels, in input order
    pub labels: Vec<String>,
    /// Row-major coefficients; `values[i][j]` correlates column i with j
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute the correlation matrix of the given columns
    ///
    /// All columns must have the same length. Pairs with fewer than two
    /// common finite rows, or with zero spread, yield NaN coefficients.
    pub fn from_columns(columns: &[Column]) -> StatsResult<Self> {
        let expected = columns.first().map(|c| c.values.len()).unwrap_or(0);
        for column in columns {
            if column.values.len() != expected {
                return Err(StatsError::LengthMismatch {
                    column: column.label.clone(),
                    actual: column.values.len(),
                    expected,
                });
            }
        }

        let k = columns.len();
        let mut values = vec![vec![f64::NAN; k]; k];

        for i in 0..k {
            for j in i..k {
                let r = pearson(&columns[i].values, &columns[j].values);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            labels: columns.iter().map(|c| c.label.clone()).collect(),
            values,
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the matrix is empty
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Coefficient between columns `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Upper-triangle mask, diagonal included
    ///
    /// `mask[i][j]` is true where a heatmap renderer hides the redundant
    /// half of the symmetric matrix.
    pub fn upper_triangle_mask(&self) -> Vec<Vec<bool>> {
        let k = self.len();
        (0..k)
            .map(|i| (0..k).map(|j| j >= i).collect())
            .collect()
    }
}

/// Pearson correlation coefficient over common finite rows
///
/// Returns NaN when fewer than two common rows exist or when either
/// column has zero spread over them.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let (dx, dy) = (x - mean_a, y - mean_b);
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    cov / (var_a * var_b).sqrt()
}
