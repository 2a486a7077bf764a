//! Keyed entity store
//!
//! Owns one [`EntityCollection`] snapshot and drives it through
//! [`reduce`](crate::reducer::reduce) around remote calls:
//! - batched loads skip ids that are fresh or in flight
//! - saves mark the entity saving, then re-key it if the server assigned a
//!   new id
//! - errors are stored per entity for inline display
//!
//! The lock is never held across a remote call. Responses are merged in the
//! order they arrive, so a slow response to an older request can overwrite
//! a newer one, and two overlapping loads may both fetch the same id.

use crate::api::EntityApi;
use crate::config::{FailureScope, StoreConfig, LOAD_FAILED_CODE, SAVE_FAILED_CODE};
use crate::entity::{CachedEntity, EntityCollection};
use crate::error::StoreError;
use crate::overlay::Overlay;
use crate::reducer::{reduce, EntityAction};
use mentor_core::{AccessToken, Entity, LoadingError, LoadingStatus};
use parking_lot::RwLock;
use std::marker::PhantomData;

/// Arguments of a batch load
pub struct LoadRequest<'a, T: Entity> {
    ids: Vec<String>,
    reload: bool,
    overlay: Option<&'a dyn Overlay<T>>,
}

impl<'a, T: Entity> LoadRequest<'a, T> {
    /// Load these ids unless already fresh or in flight
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            reload: false,
            overlay: None,
        }
    }

    /// Fetch every id regardless of its current status
    #[inline]
    #[must_use]
    pub fn reload(mut self) -> Self {
        self.reload = true;
        self
    }

    /// Apply an overlay to the collection after a successful fetch
    #[inline]
    #[must_use]
    pub fn with_overlay(mut self, overlay: &'a dyn Overlay<T>) -> Self {
        self.overlay = Some(overlay);
        self
    }
}

/// Result of a batch load that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Every id was fresh or in flight; nothing was fetched or changed
    Cancelled,
    /// A fetch completed
    Loaded {
        /// Ids sent to the server
        fetched: usize,
        /// Entities the server returned
        received: usize,
    },
}

impl LoadOutcome {
    /// Whether the call was a no-op
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Cache of remotely loaded entities of one kind
pub struct EntityStore<T: Entity, A> {
    api: A,
    config: StoreConfig,
    state: RwLock<EntityCollection<T>>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity, A: EntityApi<T>> EntityStore<T, A> {
    /// Create empty store with default configuration
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_config(api, StoreConfig::default())
    }

    /// Create empty store
    #[must_use]
    pub fn with_config(api: A, config: StoreConfig) -> Self {
        Self {
            api,
            config,
            state: RwLock::new(EntityCollection::default()),
            _entity: PhantomData,
        }
    }

    /// Remote API
    #[inline]
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> EntityCollection<T> {
        self.state.read().clone()
    }

    /// Record for one id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<CachedEntity<T>> {
        self.state.read().get(id).cloned()
    }

    /// Status for one id
    #[must_use]
    pub fn status(&self, id: &str) -> LoadingStatus {
        self.state.read().status(id)
    }

    /// Aggregate status of the most recent batch load
    #[must_use]
    pub fn batch_load_status(&self) -> LoadingStatus {
        self.state.read().batch_load_status
    }

    /// Ids with a load or save in flight
    #[must_use]
    pub fn loading_ids(&self) -> Vec<String> {
        self.state.read().in_flight_ids()
    }

    /// Load entities by id
    ///
    /// Unless the request is a reload, ids that are loading, saving or
    /// already loaded are skipped. When nothing is left the call returns
    /// [`LoadOutcome::Cancelled`] without touching state.
    ///
    /// # Errors
    /// - `StoreError::LoadFailed` if the fetch fails; the ids selected by
    ///   [`FailureScope`] are marked failed along with the batch status
    pub async fn load_by_ids(&self, request: LoadRequest<'_, T>) -> Result<LoadOutcome, StoreError> {
        let LoadRequest {
            ids,
            reload,
            overlay,
        } = request;

        let requested = distinct_non_empty(ids);
        let pending = if reload {
            requested.clone()
        } else {
            self.pending(&requested)
        };

        if pending.is_empty() {
            tracing::debug!(requested = requested.len(), "load cancelled, nothing to fetch");
            return Ok(LoadOutcome::Cancelled);
        }

        self.dispatch(EntityAction::LoadStarted {
            ids: pending.clone(),
        });
        tracing::debug!(ids = ?pending, reload, "fetching entities");

        match self.api.fetch_by_ids(&pending).await {
            Ok(entities) => {
                let received = entities.len();
                self.commit(|state| {
                    let mut next = reduce(state, EntityAction::LoadSucceeded { entities });
                    if let Some(overlay) = overlay {
                        next.entries = overlay.apply(&next.entries).into_owned();
                    }
                    next
                });
                tracing::info!(fetched = pending.len(), received, "entities loaded");
                Ok(LoadOutcome::Loaded {
                    fetched: pending.len(),
                    received,
                })
            }
            Err(source) => {
                let ids = match self.config.failure_scope {
                    FailureScope::Requested => requested,
                    FailureScope::Fetched => pending,
                };
                tracing::warn!(ids = ?ids, error = %source, "entity load failed");
                self.dispatch(EntityAction::LoadFailed {
                    ids: ids.clone(),
                    error: LoadingError::new(&self.config.load_error_message, LOAD_FAILED_CODE),
                });
                Err(StoreError::LoadFailed { ids, source })
            }
        }
    }

    /// Save an entity
    ///
    /// # Errors
    /// - `StoreError::NoAccessToken` if `token` is `None`; state is untouched
    ///   and no request is made
    /// - `StoreError::SaveFailed` if the update fails; the entity is marked
    ///   failed under its original id with its previous value kept
    pub async fn save(&self, entity: T, token: Option<&AccessToken>) -> Result<T, StoreError> {
        let Some(token) = token else {
            tracing::warn!(id = entity.id(), "save rejected without access token");
            return Err(StoreError::NoAccessToken);
        };

        let id = entity.id().to_string();
        self.dispatch(EntityAction::SaveStarted { id: id.clone() });
        tracing::debug!(id = %id, "saving entity");

        match self.api.update(&entity, token).await {
            Ok(saved) => {
                if saved.id() != id {
                    tracing::info!(from = %id, to = saved.id(), "entity saved under new id");
                } else {
                    tracing::info!(id = %id, "entity saved");
                }
                self.dispatch(EntityAction::SaveSucceeded {
                    requested_id: id,
                    entity: saved.clone(),
                });
                Ok(saved)
            }
            Err(source) => {
                tracing::warn!(id = %id, error = %source, "entity save failed");
                self.dispatch(EntityAction::SaveFailed {
                    id: id.clone(),
                    error: LoadingError::new(&self.config.save_error_message, SAVE_FAILED_CODE),
                });
                Err(StoreError::SaveFailed { id, source })
            }
        }
    }

    /// Drop the error of one id, keeping its status
    pub fn clear_error(&self, id: &str) {
        self.dispatch(EntityAction::ClearError { id: id.to_string() });
    }

    /// Drop every error, keeping statuses
    pub fn clear_errors(&self) {
        self.dispatch(EntityAction::ClearErrors);
    }

    /// Ids that a non-forced load should fetch
    fn pending(&self, ids: &[String]) -> Vec<String> {
        let state = self.state.read();
        ids.iter()
            .filter(|id| state.needs_load(id))
            .cloned()
            .collect()
    }

    fn dispatch(&self, action: EntityAction<T>) {
        tracing::trace!(action = action.name(), "dispatch");
        self.commit(|state| reduce(state, action));
    }

    fn commit(&self, transition: impl FnOnce(&EntityCollection<T>) -> EntityCollection<T>) {
        let mut state = self.state.write();
        let next = transition(&state);
        *state = next;
    }
}

impl<T: Entity, A> std::fmt::Debug for EntityStore<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("EntityStore")
            .field("config", &self.config)
            .field("entries", &state.len())
            .field("batch_load_status", &state.batch_load_status)
            .finish_non_exhaustive()
    }
}

fn distinct_non_empty(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}
