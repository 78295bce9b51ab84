//! Two-sample comparison through ECDFs
//!
//! Builds per-category ECDF scatter series (with formatted legend labels
//! and optional reference-normal overlays) and, for exactly two
//! categories, tests whether their means are statistically identical.
//!
//! The t-test is the pooled-variance Student's t-test for independent
//! samples, with a two-sided p-value.

use crate::clean::{CleanOptions, SampleInput};
use crate::ecdf::Ecdf;
use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// A labelled set of raw values to compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Label shown in the plot legend
    pub label: String,
    /// Raw values; NaN entries are dropped during cleaning
    pub values: Vec<f64>,
}

impl Category {
    /// Create a labelled category
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Verdict of the two-sample mean comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeanVerdict {
    /// p-value above the threshold: no evidence the means differ
    Identical,
    /// p-value at or below the threshold: the means differ
    Distinct,
}

/// Result of a two-sample Student's t-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TTestReport {
    /// t statistic
    pub statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Degrees of freedom (n1 + n2 - 2)
    pub dof: f64,
    /// Significance threshold the verdict was taken at
    pub threshold: f64,
    /// Verdict at the threshold
    pub verdict: MeanVerdict,
}

/// One plottable ECDF series for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcdfSeries {
    /// Legend label, `"{label} ({mean:.2e} ± {2sigma:.2e})"`
    pub label: String,
    /// Sorted sample values (scatter x)
    pub x: Vec<f64>,
    /// Cumulative probabilities (scatter y)
    pub y: Vec<f64>,
    /// Sample mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Reference-normal CDF overlay, if requested and defined
    pub normal_overlay: Option<(Vec<f64>, Vec<f64>)>,
}

/// Full output of the category comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcdfComparison {
    /// One series per input category, in input order
    pub series: Vec<EcdfSeries>,
    /// Present only when exactly two categories were compared
    pub t_test: Option<TTestReport>,
}

/// Options for the category comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    /// Attach a reference-normal CDF overlay to each series
    pub normal_overlay: bool,
    /// Significance threshold for the mean verdict
    pub p_threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            normal_overlay: true,
            p_threshold: 0.05,
        }
    }
}

impl CompareOptions {
    /// Create options with the defaults (overlay on, threshold 0.05)
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the reference-normal overlay
    pub fn without_overlay(mut self) -> Self {
        self.normal_overlay = false;
        self
    }

    /// Set the significance threshold
    pub fn with_threshold(mut self, p_threshold: f64) -> Self {
        self.p_threshold = p_threshold;
        self
    }
}

/// Compare categories through their ECDFs
///
/// Each category becomes a dots-style [`EcdfSeries`]. With exactly two
/// categories, a pooled-variance Student's t-test between the two cleaned
/// value sets is attached; means are reported identical when the p-value
/// exceeds the threshold.
pub fn compare_ecdf(
    categories: &[Category],
    options: &CompareOptions,
) -> StatsResult<EcdfComparison> {
    let mut series = Vec::with_capacity(categories.len());
    let mut cleaned_sets = Vec::with_capacity(categories.len());

    for category in categories {
        let ecdf = Ecdf::from_data(category.values.as_slice())?;
        let (x, y) = ecdf.dots();

        let mean = mean(ecdf.values());
        let std_dev = population_std(ecdf.values(), mean);
        let label = format!("{} ({:.2e} ± {:.2e})", category.label, mean, 2.0 * std_dev);

        let normal_overlay = if options.normal_overlay {
            normal_cdf_overlay(&x, mean, std_dev)
        } else {
            None
        };

        cleaned_sets.push(ecdf.values().to_vec());
        series.push(EcdfSeries {
            label,
            x,
            y,
            mean,
            std_dev,
            normal_overlay,
        });
    }

    let t_test = if categories.len() == 2 {
        Some(students_t_test(
            &cleaned_sets[0],
            &cleaned_sets[1],
            options.p_threshold,
        )?)
    } else {
        None
    };

    Ok(EcdfComparison { series, t_test })
}

/// Pooled-variance Student's t-test for two independent samples
///
/// Assumes equal variances. Each sample needs at least two non-NaN
/// entries. The p-value is two-sided.
pub fn students_t_test(
    a: impl Into<SampleInput>,
    b: impl Into<SampleInput>,
    threshold: f64,
) -> StatsResult<TTestReport> {
    let options = CleanOptions::default().allow_infinite().with_min_len(2);
    let a = a.into().cleaned(&options)?;
    let b = b.into().cleaned(&options)?;

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(&a), mean(&b));
    let v1 = sample_variance(&a, m1);
    let v2 = sample_variance(&b, m2);

    let dof = n1 + n2 - 2.0;
    let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / dof;
    let statistic = (m1 - m2) / (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();

    // dof >= 2 after the min-length cleaning above.
    let dist = StudentsT::new(0.0, 1.0, dof).map_err(|_| StatsError::InsufficientSamples {
        required: 2,
        actual: a.len().min(b.len()),
    })?;
    let p_value = 2.0 * (1.0 - dist.cdf(statistic.abs()));

    let verdict = if p_value > threshold {
        MeanVerdict::Identical
    } else {
        MeanVerdict::Distinct
    };

    Ok(TTestReport {
        statistic,
        p_value,
        dof,
        threshold,
        verdict,
    })
}

/// Reference-normal CDF curve over the sample range
///
/// 100 evenly spaced positions between `x.first()` and `x.last()`,
/// evaluated against Normal(mean, std_dev). Returns None when the normal
/// is undefined (zero or non-finite spread).
fn normal_cdf_overlay(x: &[f64], mean: f64, std_dev: f64) -> Option<(Vec<f64>, Vec<f64>)> {
    let (first, last) = (*x.first()?, *x.last()?);
    let dist = Normal::new(mean, std_dev).ok()?;

    let xs = linspace(first, last, 100);
    let ys = xs.iter().map(|&v| dist.cdf(v)).collect();
    Some((xs, ys))
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num < 2 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    (0..num).map(|k| start + step * k as f64).collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn sample_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_test_identical_samples() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let report = students_t_test(a, b, 0.05).unwrap();

        assert_eq!(report.verdict, MeanVerdict::Identical);
        assert!((report.statistic).abs() < 1e-10);
        assert!(report.p_value > 0.99);
        assert_eq!(report.dof, 8.0);
    }

    #[test]
    fn test_t_test_shifted_samples() {
        let a: Vec<f64> = (0..20).map(|k| k as f64 * 0.1).collect();
        let b: Vec<f64> = (0..20).map(|k| k as f64 * 0.1 + 50.0).collect();
        let report = students_t_test(a, b, 0.05).unwrap();

        assert_eq!(report.verdict, MeanVerdict::Distinct);
        assert!(report.p_value < 1e-6);
    }

    #[test]
    fn test_t_test_known_statistic() {
        // Hand-computed: means 2 and 4, pooled variance 1,
        // t = -2 / sqrt(2/3) = -sqrt(6).
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![3.0, 4.0, 5.0];
        let report = students_t_test(a, b, 0.05).unwrap();

        assert!((report.statistic + 6.0_f64.sqrt()).abs() < 1e-10);
        assert_eq!(report.dof, 4.0);
    }

    #[test]
    fn test_t_test_needs_two_entries_per_sample() {
        let err = students_t_test(vec![1.0], vec![1.0, 2.0], 0.05).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientSamples {
                required: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_compare_two_categories() {
        let categories = vec![
            Category::new("baseline", vec![1.0, 2.0, 3.0, 4.0]),
            Category::new("treated", vec![1.1, 2.1, 2.9, 4.2]),
        ];
        let out = compare_ecdf(&categories, &CompareOptions::default()).unwrap();

        assert_eq!(out.series.len(), 2);
        let report = out.t_test.unwrap();
        assert_eq!(report.verdict, MeanVerdict::Identical);

        // Legend labels carry the mean and twice the deviation.
        assert!(out.series[0].label.starts_with("baseline ("));
        assert!(out.series[0].label.contains('±'));
    }

    #[test]
    fn test_compare_three_categories_skips_t_test() {
        let categories = vec![
            Category::new("a", vec![1.0, 2.0]),
            Category::new("b", vec![2.0, 3.0]),
            Category::new("c", vec![3.0, 4.0]),
        ];
        let out = compare_ecdf(&categories, &CompareOptions::default()).unwrap();

        assert_eq!(out.series.len(), 3);
        assert!(out.t_test.is_none());
    }

    #[test]
    fn test_compare_overlay_toggle() {
        let categories = vec![Category::new("a", vec![1.0, 2.0, 3.0])];

        let with = compare_ecdf(&categories, &CompareOptions::default()).unwrap();
        let overlay = with.series[0].normal_overlay.as_ref().unwrap();
        assert_eq!(overlay.0.len(), 100);
        assert_eq!(overlay.1.len(), 100);
        // CDF over the sample range is non-decreasing.
        for pair in overlay.1.windows(2) {
            assert!(pair[0] <= pair[1]);
        }

        let options = CompareOptions::default().without_overlay();
        let without = compare_ecdf(&categories, &options).unwrap();
        assert!(without.series[0].normal_overlay.is_none());
    }

    #[test]
    fn test_compare_constant_category_has_no_overlay() {
        // Zero spread means no reference normal to draw.
        let categories = vec![Category::new("flat", vec![2.0, 2.0, 2.0])];
        let out = compare_ecdf(&categories, &CompareOptions::default()).unwrap();
        assert!(out.series[0].normal_overlay.is_none());
    }

    #[test]
    fn test_compare_drops_nan_before_testing() {
        let categories = vec![
            Category::new("a", vec![1.0, f64::NAN, 2.0, 3.0]),
            Category::new("b", vec![1.0, 2.0, 3.0]),
        ];
        let out = compare_ecdf(&categories, &CompareOptions::default()).unwrap();

        assert_eq!(out.series[0].x.len(), 3);
        assert_eq!(out.t_test.unwrap().dof, 4.0);
    }
}
