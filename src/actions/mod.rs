//! Flat action interface: one logical call per supported action name,
//! each taking a named-parameter mapping and returning a
//! [`ResultEnvelope`].
//!
//! Every handler follows the same pipeline: coerce and validate
//! parameters locally, dispatch through the authenticated client, map
//! the response into the envelope. All errors are recovered here and
//! converted into a failed envelope; nothing propagates as a fault.

mod params;

pub use params::Params;

use crate::client::SmaClient;
use crate::errors::{SmaResult, ValidationError};
use crate::services::lists::{
    DeleteEntryRequest, DeleteScope, EntryScope, ListEntryRequest, ListOrderField,
    ListSearchRequest, ListType, ListViewBy,
};
use crate::services::quarantine::{
    AttachmentSizeFilter, DeleteMessagesRequest, DownloadAttachmentRequest, FilterOperator,
    GeneralOrderField, GeneralSearchRequest, MessageDetailsRequest, QuarantineSearchResponse,
    QuarantineType, ReleaseMessagesRequest, SpamOrderField, SpamSearchRequest, SubjectFilter,
};
use crate::services::reporting::{ReportFilterOperator, StatisticsReportRequest};
use crate::services::tracking::{TrackingDetailsRequest, TrackingSearchRequest};
use crate::services::{
    ListsServiceTrait, QuarantineServiceTrait, ReportingServiceTrait, TrackingServiceTrait,
};
use crate::types::{OrderDirection, ResultEnvelope};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

/// Maps action names to handlers over an [`SmaClient`]
#[derive(Debug, Clone)]
pub struct ActionRunner {
    client: SmaClient,
}

impl ActionRunner {
    /// Create a new runner
    pub fn new(client: SmaClient) -> Self {
        Self { client }
    }

    /// Execute one action. Never fails: every error becomes a failed
    /// envelope carrying the human-readable message.
    #[instrument(skip(self, params))]
    pub async fn run(&self, action: &str, params: Value) -> ResultEnvelope {
        debug!(action, "handling action");
        match self.dispatch(action, params).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(action, error = %err, "action failed");
                ResultEnvelope::failure(err.to_string())
            }
        }
    }

    async fn dispatch(&self, action: &str, params: Value) -> SmaResult<ResultEnvelope> {
        let p = Params::new(params)?;
        match action {
            "test_connectivity" => self.test_connectivity().await,
            "search_spam_quarantine_messages" => self.search_spam_quarantine_messages(&p).await,
            "search_general_quarantine_messages" => {
                self.search_general_quarantine_messages(&p).await
            }
            "search_tracking_messages" => self.search_tracking_messages(&p).await,
            "get_spam_quarantine_message_details" => {
                self.quarantine_message_details(&p, QuarantineType::Spam).await
            }
            "get_general_quarantine_message_details" => {
                self.quarantine_message_details(&p, QuarantineType::Pvo).await
            }
            "get_message_tracking_details" => self.get_message_tracking_details(&p).await,
            "release_spam_message" => self.release_spam_message(&p).await,
            "release_general_quarantine_message" => {
                self.release_general_quarantine_message(&p).await
            }
            "delete_spam_message" => self.delete_spam_message(&p).await,
            "delete_general_quarantine_message" => {
                self.delete_general_quarantine_message(&p).await
            }
            "search_list" => self.search_list(&p).await,
            "add_list_entry" => self.mutate_list_entry(&p, "add").await,
            "edit_list_entry" => self.mutate_list_entry(&p, "edit").await,
            "delete_list_entry" => self.delete_list_entry(&p).await,
            "get_statistics_report" => self.get_statistics_report(&p).await,
            "download_attachment" => self.download_attachment(&p).await,
            other => Err(ValidationError::UnsupportedAction {
                name: other.to_string(),
            }
            .into()),
        }
    }

    async fn test_connectivity(&self) -> SmaResult<ResultEnvelope> {
        self.client.test_connectivity().await?;
        Ok(ResultEnvelope::success("Test Connectivity Passed"))
    }

    async fn search_spam_quarantine_messages(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request =
            SpamSearchRequest::new(p.require_str("start_date")?, p.require_str("end_date")?);
        request.offset = p.opt_u32("offset")?;
        request.limit = p.opt_u32("limit")?;
        request.order_by = p.opt_parsed("order_by", SpamOrderField::parse)?;
        request.order_direction = p.opt_parsed("order_direction", OrderDirection::parse)?;
        request.envelope_recipient_filter_operator = p.opt_parsed(
            "envelope_recipient_filter_operator",
            FilterOperator::parse,
        )?;
        request.envelope_recipient_filter_value = p.opt_str("envelope_recipient_filter_value");
        request.filter_operator = p.opt_parsed("filter_operator", FilterOperator::parse)?;
        request.filter_value = p.opt_str("filter_value");

        let response = self.client.quarantine().search_spam(request).await?;
        Ok(message_page_envelope(response))
    }

    async fn search_general_quarantine_messages(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request = GeneralSearchRequest::new(
            p.require_str("start_date")?,
            p.require_str("end_date")?,
            p.string_list("quarantines")?,
        );
        request.subject_filter_by = p.opt_parsed("subject_filter_by", SubjectFilter::parse)?;
        request.subject_filter_value = p.opt_str("subject_filter_value");
        request.originating_esa_ip = p.opt_str("originating_esa_ip");
        request.attachment_name = p.opt_str("attachment_name");
        request.attachment_size_filter_by =
            p.opt_parsed("attachment_size_filter_by", AttachmentSizeFilter::parse)?;
        request.attachment_size_from_value = p.opt_str("attachment_size_from_value");
        request.attachment_size_to_value = p.opt_str("attachment_size_to_value");
        request.envelope_recipient_filter_by =
            p.opt_parsed("envelope_recipient_filter_by", FilterOperator::parse)?;
        request.envelope_recipient_filter_value = p.opt_str("envelope_recipient_filter_value");
        request.envelope_sender_filter_by =
            p.opt_parsed("envelope_sender_filter_by", FilterOperator::parse)?;
        request.envelope_sender_filter_value = p.opt_str("envelope_sender_filter_value");
        request.order_by = p.opt_parsed("order_by", GeneralOrderField::parse)?;
        request.order_direction = p.opt_parsed("order_direction", OrderDirection::parse)?;
        request.offset = p.opt_u32("offset")?;
        request.limit = p.opt_u32("limit")?;

        let response = self.client.quarantine().search_general(request).await?;
        Ok(message_page_envelope(response))
    }

    async fn search_tracking_messages(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request =
            TrackingSearchRequest::new(p.require_str("start_date")?, p.require_str("end_date")?);
        request.cisco_host = p.opt_str("cisco_host");
        request.offset = p.opt_u32("offset")?;
        request.limit = p.opt_u32("limit")?;
        request.sender = p.opt_str("sender");
        request.recipient = p.opt_str("recipient");
        request.subject = p.opt_str("subject");
        request.message_id = p.opt_i64("message_id")?;
        request.status = p.opt_str("status");

        let response = self.client.tracking().search(request).await?;
        let mut envelope = ResultEnvelope::success("Successfully retrieved tracking messages");
        let returned = response.data.len();
        envelope.set_summary("total_messages", json!(response.total_count()));
        envelope.set_summary("messages_returned", json!(returned));
        envelope.set_summary("bad_records", json!(response.bad_records()));
        for message in response.data {
            envelope.add_data(message);
        }
        Ok(envelope)
    }

    async fn quarantine_message_details(
        &self,
        p: &Params,
        quarantine: QuarantineType,
    ) -> SmaResult<ResultEnvelope> {
        let message_id = p.require_i64("message_id")?;
        let response = self
            .client
            .quarantine()
            .details(MessageDetailsRequest::new(message_id, quarantine))
            .await?;

        let mut envelope = ResultEnvelope::success("Successfully retrieved message details");
        envelope.set_summary("subject", json!(response.subject()));
        envelope.add_data(response.data);
        Ok(envelope)
    }

    async fn get_message_tracking_details(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request = TrackingDetailsRequest::new(p.require_i64("mid")?);
        request.icid = p.opt_i64("icid")?;
        request.serial_number = p.opt_str("serial_number");
        request.start_date = p.opt_str("start_date");
        request.end_date = p.opt_str("end_date");

        let response = self.client.tracking().details(request).await?;
        let mut envelope =
            ResultEnvelope::success("Successfully retrieved message tracking details");
        envelope.set_summary("subject", json!(response.subject()));
        envelope.set_summary("status", json!(response.status()));
        envelope.set_summary("direction", json!(response.direction()));
        envelope.add_data(response.message());
        Ok(envelope)
    }

    async fn release_spam_message(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let request = ReleaseMessagesRequest::spam(p.id_list("message_id")?);
        let response = self.client.quarantine().release(request).await?;
        Ok(action_envelope(
            "Successfully released message",
            "total_released",
            response.total_count(),
            response.action().map(str::to_string),
            response.data,
        ))
    }

    async fn release_general_quarantine_message(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let request = ReleaseMessagesRequest::general(
            p.id_list("message_id")?,
            p.require_str("quarantine_name")?,
        );
        let response = self.client.quarantine().release(request).await?;
        Ok(action_envelope(
            "Successfully released message",
            "total_released",
            response.total_count(),
            response.action().map(str::to_string),
            response.data,
        ))
    }

    async fn delete_spam_message(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let request = DeleteMessagesRequest::spam(p.id_list("message_id")?);
        let response = self.client.quarantine().delete(request).await?;
        Ok(action_envelope(
            "Successfully deleted message",
            "total_deleted",
            response.total_count(),
            response.action().map(str::to_string),
            response.data,
        ))
    }

    async fn delete_general_quarantine_message(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let request = DeleteMessagesRequest::general(
            p.id_list("message_id")?,
            p.require_str("quarantine_name")?,
        );
        let response = self.client.quarantine().delete(request).await?;
        Ok(action_envelope(
            "Successfully deleted message",
            "total_deleted",
            response.total_count(),
            response.action().map(str::to_string),
            response.data,
        ))
    }

    async fn search_list(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let list_type = p
            .opt_parsed("list_type", ListType::parse)?
            .unwrap_or(ListType::Safelist);
        let mut request = ListSearchRequest::new(list_type);
        if let Some(view_by) = p.opt_parsed("view_by", ListViewBy::parse)? {
            request.view_by = view_by;
        }
        if let Some(order_by) = p.opt_parsed("order_by", ListOrderField::parse)? {
            request.order_by = order_by;
        }
        if let Some(direction) = p.opt_parsed("order_direction", OrderDirection::parse)? {
            request.order_direction = direction;
        }
        if let Some(offset) = p.opt_u32("offset")? {
            request.offset = offset;
        }
        if let Some(limit) = p.opt_u32("limit")? {
            request.limit = limit;
        }
        request.search = p.opt_str("search");

        let response = self.client.lists().search(request).await?;
        let mut envelope = ResultEnvelope::success(format!(
            "Successfully retrieved {} entries",
            list_type.as_str()
        ));
        let returned = response.data.len();
        envelope.set_summary("total_entries", json!(response.total_count()));
        envelope.set_summary("entries_returned", json!(returned));
        envelope.set_summary("list_type", json!(list_type.as_str()));
        for entry in response.data {
            envelope.add_data(entry);
        }
        Ok(envelope)
    }

    async fn mutate_list_entry(&self, p: &Params, action: &str) -> SmaResult<ResultEnvelope> {
        let (list_type, view_by) = list_target(p)?;
        let scope = match view_by {
            ListViewBy::Recipient => EntryScope::Recipient {
                recipient_addresses: p.string_list("recipient_addresses")?,
                sender_list: p.string_list("sender_list")?,
            },
            ListViewBy::Sender => EntryScope::Sender {
                sender_addresses: p.string_list("sender_addresses")?,
                recipient_list: p.string_list("recipient_list")?,
            },
        };
        let request = ListEntryRequest::new(list_type, scope);
        let response = match action {
            "add" => self.client.lists().add(request).await?,
            _ => self.client.lists().edit(request).await?,
        };

        let verb = if action == "add" { "added" } else { "edited" };
        let mut envelope = ResultEnvelope::success(format!(
            "Successfully {verb} entry in {}",
            list_type.as_str()
        ));
        envelope.set_summary("list_type", json!(list_type.as_str()));
        envelope.set_summary("view_by", json!(view_by.as_str()));
        envelope.set_summary("status", json!("success"));
        envelope.add_data(response.data);
        Ok(envelope)
    }

    async fn delete_list_entry(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let (list_type, view_by) = list_target(p)?;
        let scope = match view_by {
            ListViewBy::Recipient => DeleteScope::Recipient {
                recipient_list: p.string_list("recipient_list")?,
            },
            ListViewBy::Sender => DeleteScope::Sender {
                sender_list: p.string_list("sender_list")?,
            },
        };
        let response = self
            .client
            .lists()
            .delete(DeleteEntryRequest::new(list_type, scope))
            .await?;

        let mut envelope = ResultEnvelope::success(format!(
            "Successfully deleted entries from {}",
            list_type.as_str()
        ));
        envelope.set_summary("list_type", json!(list_type.as_str()));
        envelope.set_summary("view_by", json!(view_by.as_str()));
        envelope.set_summary("total_deleted", json!(response.total_count()));
        envelope.set_summary("status", json!("success"));
        envelope.add_data(response.data);
        Ok(envelope)
    }

    async fn get_statistics_report(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request = StatisticsReportRequest::new(
            p.require_str("report_type")?,
            p.require_str("start_date")?,
            p.require_str("end_date")?,
        );
        request.counter = p.opt_str("counter");
        request.device_type = p.opt_str("device_type");
        request.device_group_name = p.opt_str("device_group_name");
        request.device_name = p.opt_str("device_name");
        request.filter_by = p.opt_str("filter_by");
        request.filter_operator = p.opt_parsed("filter_operator", ReportFilterOperator::parse)?;
        request.filter_value = p.opt_str("filter_value");
        request.order_by = p.opt_str("order_by");
        request.order_direction = p.opt_parsed("order_direction", OrderDirection::parse)?;
        request.offset = p.opt_u32("offset")?;
        request.limit = p.opt_u32("limit")?;
        request.top = p.opt_u32("top")?;

        let report_type = request.report_type.clone();
        let counter = request.counter.clone();
        let response = self.client.reporting().get_report(request).await?;

        let mut envelope = ResultEnvelope::success("Successfully retrieved report");
        envelope.set_summary("report_type", json!(report_type));
        if let Some(counter) = counter {
            envelope.set_summary("counter", json!(counter));
        }
        envelope.add_data(response.data);
        Ok(envelope)
    }

    async fn download_attachment(&self, p: &Params) -> SmaResult<ResultEnvelope> {
        let mut request = DownloadAttachmentRequest::new(
            p.require_i64("message_id")?,
            p.require_str("attachment_id")?,
        );
        if let Some(quarantine) = p.opt_parsed("quarantine_type", QuarantineType::parse)? {
            request = request.quarantine(quarantine);
        }
        if let Some(decode) = p.opt_bool("decode_base64")? {
            request = request.decode_base64(decode);
        }

        let attachment = self.client.quarantine().download_attachment(request).await?;
        let size = attachment.size();
        let file_name = attachment.file_name;
        let mut envelope = ResultEnvelope::success("Successfully downloaded attachment");
        envelope.set_summary("file_name", json!(file_name.clone()));
        envelope.set_summary("size_bytes", json!(size));
        envelope.add_data(json!({
            "file_name": file_name,
            "size_bytes": size,
        }));
        Ok(envelope)
    }
}

fn list_target(p: &Params) -> SmaResult<(ListType, ListViewBy)> {
    let list_type = p
        .opt_parsed("list_type", ListType::parse)?
        .unwrap_or(ListType::Safelist);
    let view_by = p
        .opt_parsed("view_by", ListViewBy::parse)?
        .unwrap_or(ListViewBy::Recipient);
    Ok((list_type, view_by))
}

fn message_page_envelope(response: QuarantineSearchResponse) -> ResultEnvelope {
    let mut envelope = ResultEnvelope::success("Successfully retrieved messages");
    let returned = response.data.len();
    envelope.set_summary("total_messages", json!(response.total_count()));
    envelope.set_summary("messages_returned", json!(returned));
    for message in response.data {
        envelope.add_data(message);
    }
    envelope
}

fn action_envelope(
    message: &str,
    total_key: &str,
    total: u64,
    action: Option<String>,
    data: Value,
) -> ResultEnvelope {
    let mut envelope = ResultEnvelope::success(message);
    envelope.set_summary(total_key, json!(total));
    envelope.set_summary("action", json!(action));
    envelope.add_data(data);
    envelope
}
