//! SMA client implementation.
//!
//! The [`Orchestrator`] owns the authenticated dispatch path shared by
//! every operation: credential attachment, expiry detection and the
//! single refresh-and-retry. [`SmaClient`] is the entry point composing
//! the per-domain services on top of it.

use crate::auth::{AuthManager, LOGIN_ENDPOINT};
use crate::config::{AuthMethod, SmaConfig};
use crate::errors::SmaResult;
use crate::services::lists::ListsService;
use crate::services::quarantine::QuarantineService;
use crate::services::reporting::ReportingService;
use crate::services::tracking::TrackingService;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Subscription endpoint used as the connectivity probe under basic auth
pub const SUBSCRIPTION_ENDPOINT: &str = "/sma/api/v2.0/subscription";

/// Authenticated request dispatcher shared by all services.
pub struct Orchestrator {
    config: Arc<SmaConfig>,
    auth: AuthManager,
    transport: Arc<dyn HttpTransport>,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(
        config: Arc<SmaConfig>,
        auth: AuthManager,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Execute an authenticated request.
    ///
    /// Credential acquisition failure aborts immediately. If the executed
    /// call fails and the failure hints at an expired token, the credential
    /// is refreshed once and the identical request replayed exactly once;
    /// the outcome of that second attempt is final.
    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    pub async fn dispatch(&self, request: ApiRequest) -> SmaResult<ApiResponse> {
        let url = self.config.build_url(&request.endpoint);
        let headers = self
            .auth
            .request_headers(self.transport.as_ref(), false)
            .await?;

        let first = request.clone().into_http(url.clone(), headers);
        match self.transport.execute(first).await {
            Ok(response) => Ok(response),
            Err(err) if self.auth.supports_refresh() && err.hints_expired_token() => {
                warn!(error = %err, "token expiry detected, refreshing credential");
                let headers = self
                    .auth
                    .request_headers(self.transport.as_ref(), true)
                    .await?;
                self.transport.execute(request.into_http(url, headers)).await
            }
            Err(err) => Err(err),
        }
    }

    /// The immutable connection configuration
    pub fn config(&self) -> &SmaConfig {
        &self.config
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Main SMA client
#[derive(Clone)]
pub struct SmaClient {
    orchestrator: Arc<Orchestrator>,
    quarantine: QuarantineService,
    tracking: TrackingService,
    lists: ListsService,
    reporting: ReportingService,
}

impl SmaClient {
    /// Create a new client with the default reqwest transport
    pub fn new(config: SmaConfig) -> SmaResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.verify_tls, config.timeout)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a new client with a custom transport
    pub fn with_transport(config: SmaConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let config = Arc::new(config);
        let auth = AuthManager::for_config(config.clone());
        let orchestrator = Arc::new(Orchestrator::new(config, auth, transport));

        Self {
            quarantine: QuarantineService::new(orchestrator.clone()),
            tracking: TrackingService::new(orchestrator.clone()),
            lists: ListsService::new(orchestrator.clone()),
            reporting: ReportingService::new(orchestrator.clone()),
            orchestrator,
        }
    }

    /// Verify connectivity and credentials against the appliance.
    ///
    /// Under the JWT strategy this performs an authenticated POST to the
    /// login endpoint; under basic auth it probes the subscription
    /// endpoint.
    #[instrument(skip(self))]
    pub async fn test_connectivity(&self) -> SmaResult<()> {
        let request = match self.orchestrator.config().auth_method {
            AuthMethod::Jwt => ApiRequest::post(LOGIN_ENDPOINT),
            AuthMethod::Basic => ApiRequest::get(SUBSCRIPTION_ENDPOINT),
        };
        self.orchestrator.dispatch(request).await?;
        debug!("connectivity check passed");
        Ok(())
    }

    /// Get the quarantine service
    pub fn quarantine(&self) -> &QuarantineService {
        &self.quarantine
    }

    /// Get the message-tracking service
    pub fn tracking(&self) -> &TrackingService {
        &self.tracking
    }

    /// Get the safelist/blocklist service
    pub fn lists(&self) -> &ListsService {
        &self.lists
    }

    /// Get the reporting service
    pub fn reporting(&self) -> &ReportingService {
        &self.reporting
    }

    /// The immutable connection configuration
    pub fn config(&self) -> &SmaConfig {
        self.orchestrator.config()
    }

    /// The shared authenticated dispatcher
    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }
}

impl std::fmt::Debug for SmaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmaClient")
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
