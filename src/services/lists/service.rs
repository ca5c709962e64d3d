//! Safelist/blocklist service implementation.

use super::*;
use crate::client::Orchestrator;
use crate::errors::SmaResult;
use crate::services::decode;
use crate::transport::ApiRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for safelist/blocklist operations
#[async_trait]
pub trait ListsServiceTrait: Send + Sync {
    /// View list entries
    async fn search(&self, request: ListSearchRequest) -> SmaResult<ListSearchResponse>;

    /// Add a list entry
    async fn add(&self, request: ListEntryRequest) -> SmaResult<ListActionResponse>;

    /// Edit a list entry
    async fn edit(&self, request: ListEntryRequest) -> SmaResult<ListActionResponse>;

    /// Delete list entries
    async fn delete(&self, request: DeleteEntryRequest) -> SmaResult<ListActionResponse>;
}

/// Safelist/blocklist service implementation
#[derive(Clone)]
pub struct ListsService {
    orchestrator: Arc<Orchestrator>,
}

impl ListsService {
    /// Create a new lists service
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    async fn mutate(&self, request: ListEntryRequest, action: &str) -> SmaResult<ListActionResponse> {
        request.validate()?;
        let api = ApiRequest::post(request.list_type.endpoint()).json(request.payload(action));
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }
}

#[async_trait]
impl ListsServiceTrait for ListsService {
    #[instrument(skip(self, request), fields(list_type = request.list_type.as_str()))]
    async fn search(&self, request: ListSearchRequest) -> SmaResult<ListSearchResponse> {
        request.validate()?;
        let api = ApiRequest::get(request.list_type.endpoint()).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request), fields(list_type = request.list_type.as_str()))]
    async fn add(&self, request: ListEntryRequest) -> SmaResult<ListActionResponse> {
        self.mutate(request, "add").await
    }

    #[instrument(skip(self, request), fields(list_type = request.list_type.as_str()))]
    async fn edit(&self, request: ListEntryRequest) -> SmaResult<ListActionResponse> {
        self.mutate(request, "edit").await
    }

    #[instrument(skip(self, request), fields(list_type = request.list_type.as_str()))]
    async fn delete(&self, request: DeleteEntryRequest) -> SmaResult<ListActionResponse> {
        request.validate()?;
        let api = ApiRequest::delete(request.list_type.endpoint()).json(request.payload());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }
}

impl std::fmt::Debug for ListsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListsService").finish()
    }
}
