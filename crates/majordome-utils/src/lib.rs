//! majordome-utils - Small process and path helpers
//!
//! Odds and ends the other majordome crates and downstream notebooks
//! lean on:
//!
//! - **Capture**: scoped redirect of stdout/stderr into collected lines
//! - **Paths**: parent-directory and relative-config resolution
//! - **Nested**: key-path lookup over `serde_json` values

pub mod capture;
pub mod nested;
pub mod paths;

pub use capture::*;
pub use nested::*;
pub use paths::*;
