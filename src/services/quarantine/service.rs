//! Quarantine service implementation.

use super::*;
use crate::client::Orchestrator;
use crate::errors::{ResponseError, SmaResult};
use crate::services::decode;
use crate::transport::ApiRequest;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use std::sync::Arc;
use tracing::instrument;

/// Trait for quarantine operations
#[async_trait]
pub trait QuarantineServiceTrait: Send + Sync {
    /// Search the spam quarantine
    async fn search_spam(&self, request: SpamSearchRequest) -> SmaResult<QuarantineSearchResponse>;

    /// Search the general (policy/virus/outbreak) quarantine
    async fn search_general(
        &self,
        request: GeneralSearchRequest,
    ) -> SmaResult<QuarantineSearchResponse>;

    /// Fetch details for a single quarantined message
    async fn details(&self, request: MessageDetailsRequest) -> SmaResult<MessageDetailsResponse>;

    /// Release quarantined messages
    async fn release(&self, request: ReleaseMessagesRequest)
        -> SmaResult<QuarantineActionResponse>;

    /// Delete quarantined messages
    async fn delete(&self, request: DeleteMessagesRequest) -> SmaResult<QuarantineActionResponse>;

    /// Download an attachment from a quarantined message
    async fn download_attachment(
        &self,
        request: DownloadAttachmentRequest,
    ) -> SmaResult<DownloadedAttachment>;
}

/// Quarantine service implementation
#[derive(Clone)]
pub struct QuarantineService {
    orchestrator: Arc<Orchestrator>,
}

impl QuarantineService {
    /// Create a new quarantine service
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}

#[async_trait]
impl QuarantineServiceTrait for QuarantineService {
    #[instrument(skip(self, request))]
    async fn search_spam(&self, request: SpamSearchRequest) -> SmaResult<QuarantineSearchResponse> {
        request.validate()?;
        let api = ApiRequest::get(MESSAGES_ENDPOINT).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request))]
    async fn search_general(
        &self,
        request: GeneralSearchRequest,
    ) -> SmaResult<QuarantineSearchResponse> {
        request.validate()?;
        let api = ApiRequest::get(MESSAGES_ENDPOINT).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request), fields(mid = request.message_id))]
    async fn details(&self, request: MessageDetailsRequest) -> SmaResult<MessageDetailsResponse> {
        let api = ApiRequest::get(MESSAGE_DETAILS_ENDPOINT).query_pairs(request.to_query());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request))]
    async fn release(
        &self,
        request: ReleaseMessagesRequest,
    ) -> SmaResult<QuarantineActionResponse> {
        request.validate()?;
        let api = ApiRequest::post(MESSAGES_ENDPOINT).json(request.payload());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request))]
    async fn delete(&self, request: DeleteMessagesRequest) -> SmaResult<QuarantineActionResponse> {
        request.validate()?;
        let api = ApiRequest::delete(MESSAGES_ENDPOINT).json(request.payload());
        let value = self.orchestrator.dispatch(api).await?.into_json()?;
        decode(value)
    }

    #[instrument(skip(self, request), fields(mid = request.message_id))]
    async fn download_attachment(
        &self,
        request: DownloadAttachmentRequest,
    ) -> SmaResult<DownloadedAttachment> {
        request.validate()?;
        let api = ApiRequest::get(ATTACHMENT_ENDPOINT).query_pairs(request.to_query());
        let payload = self.orchestrator.dispatch(api).await?.into_binary()?;

        let file_name = payload
            .content_disposition
            .as_deref()
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| sanitize_file_name(&request.default_file_name()));

        let content = if request.decode_base64 {
            let compact: Vec<u8> = payload
                .bytes
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            Bytes::from(BASE64.decode(&compact).map_err(|e| {
                ResponseError::UnexpectedShape {
                    message: format!("attachment body is not valid base64: {e}"),
                }
            })?)
        } else {
            payload.bytes
        };

        Ok(DownloadedAttachment { file_name, content })
    }
}

impl std::fmt::Debug for QuarantineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuarantineService").finish()
    }
}
