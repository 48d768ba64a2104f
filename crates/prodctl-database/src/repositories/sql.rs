//! Generic read-only repository over any [`Executor`].

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::debug;

use prodctl_core::config::PaginationConfig;
use prodctl_core::result::AppResult;
use prodctl_core::traits::{Entity, Executor, ReadRepository};
use prodctl_core::types::descriptor::EntityDescriptor;
use prodctl_core::types::filter::SearchText;
use prodctl_core::types::pagination::{NormalizedRequest, PageRequest, PageResponse};

use crate::query::QueryBuilder;

/// Read-only repository for entity type `E`, executing through `X`.
///
/// Holds no mutable state: the entity descriptor is static and the executor
/// is a shared handle, so one repository can serve concurrent callers.
pub struct SqlRepository<E, X> {
    executor: X,
    limits: PaginationConfig,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, X: Executor> SqlRepository<E, X> {
    /// Create a repository with the given pagination limits.
    pub fn new(executor: X, limits: PaginationConfig) -> Self {
        Self {
            executor,
            limits,
            _entity: PhantomData,
        }
    }

    /// The descriptor of the entity this repository reads.
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        E::descriptor()
    }

    /// The pagination limits requests are normalized against.
    pub fn limits(&self) -> &PaginationConfig {
        &self.limits
    }

    /// The underlying executor.
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Validate a caller request against this entity.
    pub fn normalize(&self, request: &PageRequest) -> NormalizedRequest {
        request.normalize(E::descriptor(), &self.limits)
    }

    fn query(&self) -> QueryBuilder<'static> {
        QueryBuilder::new(E::descriptor(), self.executor.dialect())
    }

    async fn fetch_entities(&self, sql: &str) -> AppResult<Vec<E>> {
        let rows = self.executor.fetch_rows(sql).await?;
        rows.iter().map(E::from_row).collect()
    }

    async fn fetch_page(&self, request: &NormalizedRequest) -> AppResult<(Vec<E>, u64)> {
        let statements = self.query().page(request)?;

        let total = self.executor.fetch_count(&statements.count).await?;
        let items = if request.offset() >= total {
            debug!(
                table = %E::descriptor().table(),
                offset = request.offset(),
                total,
                "Page starts past the last match, skipping select"
            );
            Vec::new()
        } else {
            self.fetch_entities(&statements.select).await?
        };

        debug!(
            table = %E::descriptor().table(),
            page = request.page,
            items_per_page = request.items_per_page,
            sort_by = request.sort_by,
            descending = request.direction.is_descending(),
            filter_len = request.filter.as_ref().map(SearchText::char_len),
            returned = items.len(),
            total,
            "Fetched page"
        );
        Ok((items, total))
    }
}

impl<E, X: Clone> Clone for SqlRepository<E, X> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            limits: self.limits,
            _entity: PhantomData,
        }
    }
}

impl<E, X: std::fmt::Debug> std::fmt::Debug for SqlRepository<E, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlRepository")
            .field("entity", &std::any::type_name::<E>())
            .field("executor", &self.executor)
            .field("limits", &self.limits)
            .finish()
    }
}

#[async_trait]
impl<E: Entity, X: Executor> ReadRepository<E> for SqlRepository<E, X> {
    async fn get_all(&self) -> AppResult<Vec<E>> {
        let items = self.fetch_entities(&self.query().select_all()).await?;
        debug!(table = %E::descriptor().table(), returned = items.len(), "Fetched all");
        Ok(items)
    }

    async fn get_by_id(&self, id: &E::Id) -> AppResult<Option<E>> {
        let sql = self.query().select_by_id(id)?;
        let item = self.fetch_entities(&sql).await?.into_iter().next();
        debug!(
            table = %E::descriptor().table(),
            found = item.is_some(),
            "Looked up by id"
        );
        Ok(item)
    }

    async fn get_paginated(&self, request: &PageRequest) -> AppResult<(Vec<E>, u64)> {
        self.fetch_page(&self.normalize(request)).await
    }

    async fn get_page(&self, request: &PageRequest) -> AppResult<PageResponse<E>> {
        let normalized = self.normalize(request);
        let (items, total) = self.fetch_page(&normalized).await?;
        Ok(PageResponse::new(
            items,
            normalized.page,
            normalized.items_per_page,
            total,
        ))
    }

    async fn count(&self, filter_text: Option<&str>) -> AppResult<u64> {
        let sql = self.query().count(SearchText::new(filter_text).as_ref())?;
        self.executor.fetch_count(&sql).await
    }
}
