//! Driving time and distance matrices.
//!
//! Provides a dense travel matrix built from sparse per-pair records, with
//! explicit mirroring and missing-entry policies.

mod matrix;

pub use matrix::{MissingEntryPolicy, TravelMatrix, TravelRecord};
