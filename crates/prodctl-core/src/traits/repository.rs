//! Generic read-only repository trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::traits::entity::Entity;
use crate::types::pagination::{PageRequest, PageResponse};

/// Uniform read access to one entity type.
///
/// The trait is generic over the entity so each entity gets a strongly
/// typed repository from the same implementation.
#[async_trait]
pub trait ReadRepository<E: Entity>: Send + Sync {
    /// Every record in default order. Only use on bounded reference data.
    async fn get_all(&self) -> AppResult<Vec<E>>;

    /// The record with the given identity, or `None`.
    async fn get_by_id(&self, id: &E::Id) -> AppResult<Option<E>>;

    /// One page of the filtered, sorted result set plus the filtered total.
    async fn get_paginated(&self, request: &PageRequest) -> AppResult<(Vec<E>, u64)>;

    /// Like [`ReadRepository::get_paginated`], with navigation metadata.
    async fn get_page(&self, request: &PageRequest) -> AppResult<PageResponse<E>>;

    /// Number of records matching `filter_text` (all records when empty).
    async fn count(&self, filter_text: Option<&str>) -> AppResult<u64>;
}
