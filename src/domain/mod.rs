//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the enumerated grouping schemes and their member labels
//! - the fixed label → color table
//! - parsed rows, per-series observations, and gap connectors

pub mod types;

pub use types::*;
