// src/models/mod.rs

//! Data models for the manifest builder.

mod config;
mod record;
mod report;

pub use config::{Config, OperativeConfig, TciaConfig};
pub use record::{ManifestRecord, StageClass};
pub use report::{ClassBreakdown, RunSummary, SourceReport};
