//! Mentor Core - domain types for virtual-mentor authoring
//!
//! Provides:
//! - The loading-status primitive shared by every cached entity
//! - Questions, answers and the mentor configuration overlay
//! - Mentor profile editing rules used by the setup wizard
//! - Subject selection rules
//!
//! # Example
//!
//! ```rust
//! use mentor_core::{info_defaults, Mentor};
//!
//! let mentor = Mentor::new("clintanderson");
//! let edits = info_defaults(&mentor, "Clint Anderson").unwrap();
//! assert_eq!(edits.first_name.as_deref(), Some("Clint"));
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod mentor;
pub mod status;
pub mod subjects;
pub mod types;

pub use error::CoreError;
pub use mentor::{info_defaults, Mentor, MentorEdits, SubjectRef, TITLE_PLACEHOLDER};
pub use status::{LoadingError, LoadingStatus};
pub use subjects::{Subject, SubjectRow, SubjectSelection, SubjectsUpdate};
pub use types::{
    AccessToken, Answer, Entity, MentorConfig, Question, QuestionType, UtteranceName,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
