//! Remote API boundary consumed by the store

use crate::error::ApiError;
use async_trait::async_trait;
use mentor_core::{AccessToken, Entity};
use std::sync::Arc;

/// Remote endpoints for one entity kind
#[async_trait]
pub trait EntityApi<T: Entity>: Send + Sync {
    /// Fetch entities by id
    ///
    /// Ids the server does not know are simply absent from the result.
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<T>, ApiError>;

    /// Persist an entity
    ///
    /// The returned record may carry a different id than the one sent,
    /// signalling that the server assigned a new identifier.
    async fn update(&self, entity: &T, token: &AccessToken) -> Result<T, ApiError>;
}

#[async_trait]
impl<T: Entity, A: EntityApi<T> + ?Sized> EntityApi<T> for Arc<A> {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<T>, ApiError> {
        (**self).fetch_by_ids(ids).await
    }

    async fn update(&self, entity: &T, token: &AccessToken) -> Result<T, ApiError> {
        (**self).update(entity, token).await
    }
}
