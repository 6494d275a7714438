//! # docgrade
//!
//! An autograder for the MongoDB query lab. It reads every document of the
//! lab's collection, checks that the data supports each exercise's queries,
//! and reports a score out of 70.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Connection settings, read from the environment and the command line
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For all things related to grading
pub mod grade;
/// Sources the graded records can be fetched from
pub mod store;
/// Record and field types
pub mod types;

pub use config::GraderConfig;
pub use grade::{Report, RuleResult, evaluate, grade};
pub use store::{JsonFileSource, MemorySource, MongoSource, RecordSource, StoreError};
pub use types::{Field, Record};
