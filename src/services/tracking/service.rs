//! Tracking service implementation.

use super::*;
use crate::client::Orchestrator;
use crate::errors::SmaResult;
use crate::services::decode;
use crate::transport::ApiRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for message-tracking operations
#[async_trait]
pub trait TrackingServiceTrait: Send + Sync {
    /// Search tracking records
    async fn search(&self, request: TrackingSearchRequest) -> SmaResult<TrackingSearchResponse>;

    /// Fetch tracking details for a single message
    async fn details(&self, request: TrackingDetailsRequest)
        -> SmaResult<TrackingDetailsResponse>;
}

/// Tracking service implementation
#[derive(Clone)]
pub struct TrackingService {
    orchestrator: Arc<Orchestrator>,
}

impl TrackingService {
    /// Create a new tracking service
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl TrackingServiceTrait for TrackingService {
    #[instrument(skip(self, request))]
    async fn search(&self, request: TrackingSearchRequest) -> SmaResult<TrackingSearchResponse> {
        request.validate()?;
        let api = ApiRequest::get(TRACKING_MESSAGES_ENDPOINT).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request), fields(mid = request.mid))]
    async fn details(
        &self,
        request: TrackingDetailsRequest,
    ) -> SmaResult<TrackingDetailsResponse> {
        let api = ApiRequest::get(TRACKING_DETAILS_ENDPOINT).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }
}

impl std::fmt::Debug for TrackingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingService").finish()
    }
}
