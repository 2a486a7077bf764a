//! Mentor Store - keyed cache of remotely loaded entities
//!
//! The store keeps one immutable snapshot per entity kind and replaces it
//! wholesale on every transition.
//!
//! # Core Operations
//!
//! - **Load**: batched fetch by id, skipping fresh and in-flight ids
//! - **Save**: optimistic update with server-assigned id migration
//! - **Overlay**: post-load rewrite of well-known entries
//! - **Clear**: drop stored errors without touching statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use mentor_store::{LoadRequest, QuestionStore};
//!
//! # async fn example(api: impl mentor_store::EntityApi<mentor_core::Question>, config: mentor_core::MentorConfig) -> Result<(), mentor_store::StoreError> {
//! let store = QuestionStore::new(api);
//! store
//!     .load_by_ids(LoadRequest::new(["intro", "idle"]).with_overlay(&config))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod overlay;
pub mod reducer;
pub mod store;

pub use api::EntityApi;
pub use config::{FailureScope, StoreConfig};
pub use entity::{CachedEntity, EntityCollection, EntityMap};
pub use error::{ApiError, StoreError};
pub use overlay::{apply_overlay, Overlay};
pub use reducer::{reduce, EntityAction};
pub use store::{EntityStore, LoadOutcome, LoadRequest};

/// Store of questions
pub type QuestionStore<A> = EntityStore<mentor_core::Question, A>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the store
    pub use crate::{
        ApiError, CachedEntity, EntityApi, EntityCollection, EntityStore, LoadOutcome,
        LoadRequest, Overlay, QuestionStore, StoreConfig, StoreError,
    };
    pub use mentor_core::{AccessToken, Entity, LoadingStatus, MentorConfig, Question};
}
