//! majordome-stats - Statistical helpers for majordome
//!
//! This crate provides the numeric side of exploratory data plotting:
//!
//! - **Cleaning**: reduce scalars/vectors/arrays to NaN-free 1D samples
//! - **ECDF**: Empirical Cumulative Distribution Function, with "dots"
//!   and step-line plot coordinates
//! - **Comparison**: per-category ECDF series plus a two-sample
//!   Student's t-test on the means
//! - **Correlation**: pairwise Pearson correlation of named columns
//!
//! # Design Philosophy
//!
//! Every operation is a pure function over an immutable copy of the
//! caller's data. Cleaning allocates a fresh vector, evaluation reads a
//! sorted buffer, and nothing here performs I/O, so concurrent use needs
//! no synchronization.

pub mod clean;
pub mod compare;
pub mod correlation;
pub mod ecdf;
pub mod error;

pub use clean::*;
pub use compare::*;
pub use correlation::*;
pub use ecdf::*;
pub use error::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
