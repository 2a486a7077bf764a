//! Mentor CLI - drive the question store and upload evaluator from files
//!
//! The binary is a thin argument parser over [`commands`]; everything it
//! does is reachable from this library for tests.

#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod fixture;
pub mod logging;

pub use commands::{
    run_questions, run_save, run_setup_defaults, run_uploads, QuestionRow, QuestionsArgs,
    QuestionsReport, SnapshotSession, UploadRow,
};
pub use config::{CliConfig, LogConfig};
pub use fixture::FixtureApi;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
