//! Best-effort webhook relay.

use axum::body::Bytes;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{EventKind, RelayOutcome, RelayReport, Sink, WebhookPayload};
use crate::domain::gateways::WebhookSink;
use crate::domain::notification::{Notification, build_notification};
use crate::error::AppError;

/// Relays shipping webhooks to the downstream system and the chat channel.
///
/// # Flow
///
/// 1. Classify the body; reject it before any outbound call if it matches no
///    known event (or not the one the route expects)
/// 2. Forward the raw body unmodified to the downstream sink
/// 3. Build a notification that includes the forward outcome
/// 4. Send the notification; on failure send a short fallback message
///
/// Steps 2-4 never fail the relay. Each call is attempted once.
pub struct RelayService {
    downstream: Arc<dyn WebhookSink>,
    notifier: Arc<dyn WebhookSink>,
}

impl RelayService {
    /// Creates a new relay service.
    pub fn new(downstream: Arc<dyn WebhookSink>, notifier: Arc<dyn WebhookSink>) -> Self {
        Self {
            downstream,
            notifier,
        }
    }

    /// Relays one webhook body.
    ///
    /// `expected` restricts the accepted variant; `None` accepts either.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MalformedPayload`] if the body cannot be
    /// classified or is not of the expected kind. No other failure is
    /// surfaced.
    pub async fn relay(
        &self,
        raw: Bytes,
        expected: Option<EventKind>,
    ) -> Result<RelayReport, AppError> {
        let payload = WebhookPayload::classify(&raw)?;
        let kind = payload.kind();

        if let Some(expected) = expected
            && expected != kind
        {
            return Err(AppError::malformed_payload(
                "Invalid payload format",
                json!({ "expected": expected, "received": kind }),
            ));
        }

        let forward = self.forward(raw).await;

        let notification = build_notification(&payload, &forward);
        let notify = self.notify(&notification).await;

        metrics::counter!(
            "postal_relay_webhooks_total",
            "kind" => kind.to_string(),
            "forwarded" => forward.succeeded.to_string(),
            "notified" => notify.succeeded.to_string(),
        )
        .increment(1);

        info!(
            kind = %kind,
            shipment_id = payload.shipment_id().unwrap_or("unknown"),
            forward = %forward.summary(),
            notify = %notify.summary(),
            "Webhook relayed"
        );

        Ok(RelayReport {
            kind,
            forward,
            notify,
        })
    }

    async fn forward(&self, raw: Bytes) -> RelayOutcome {
        match self.downstream.deliver(raw).await {
            Ok(status) => RelayOutcome::delivered(Sink::Downstream, status),
            Err(e) => {
                warn!(error = %e, "Downstream forward failed");
                RelayOutcome::failed(Sink::Downstream, e.to_string())
            }
        }
    }

    async fn notify(&self, notification: &Notification) -> RelayOutcome {
        let outcome = match self.send(notification).await {
            Ok(status) => return RelayOutcome::delivered(Sink::Notifier, status),
            Err(error) => RelayOutcome::failed(Sink::Notifier, error),
        };

        warn!(error = %outcome.status_or_error, "Notification failed, sending fallback");

        let fallback = Notification::fallback(
            notification.title().unwrap_or("webhook"),
            &outcome.status_or_error,
        );
        if let Err(error) = self.send(&fallback).await {
            warn!(error = %error, "Fallback notification failed");
        }

        outcome
    }

    async fn send(&self, notification: &Notification) -> Result<u16, String> {
        let body = serde_json::to_vec(notification).map_err(|e| e.to_string())?;
        self.notifier
            .deliver(Bytes::from(body))
            .await
            .map_err(|e| e.to_string())
    }
}
