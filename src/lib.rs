// src/lib.rs

//! Clinical imaging manifest builder.
//!
//! Combines heterogeneous clinical cohorts (a public tumor-imaging
//! archive and an institutional operative dataset) into one labeled
//! manifest of image and mask paths, ready for model training.

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod utils;
