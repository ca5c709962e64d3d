//! Reporting service implementation.

use super::*;
use crate::client::Orchestrator;
use crate::errors::SmaResult;
use crate::services::decode;
use crate::transport::ApiRequest;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trait for reporting operations
#[async_trait]
pub trait ReportingServiceTrait: Send + Sync {
    /// Fetch a statistics report
    async fn get_report(&self, request: StatisticsReportRequest) -> SmaResult<ReportResponse>;
}

/// Reporting service implementation
#[derive(Clone)]
pub struct ReportingService {
    orchestrator: Arc<Orchestrator>,
}

impl ReportingService {
    /// Create a new reporting service
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl ReportingServiceTrait for ReportingService {
    #[instrument(skip(self, request), fields(report_type = %request.report_type))]
    async fn get_report(&self, request: StatisticsReportRequest) -> SmaResult<ReportResponse> {
        request.validate()?;
        let api = ApiRequest::get(request.endpoint()).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }
}

impl std::fmt::Debug for ReportingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportingService").finish()
    }
}
