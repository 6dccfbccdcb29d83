//! Report-card grade calculator: validates typed grades, computes a weighted or
//! equal-weight average and classifies it against a pass threshold.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod report;
pub mod scheme;

pub use engine::{aggregate, evaluate, validate};
pub use error::{ExitCode, UsageError, ValidationError};
pub use models::{AggregationRequest, AggregationResult, GradeEntry, ValidatedEntries, Verdict};
