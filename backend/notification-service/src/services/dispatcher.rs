//! Notification fan-out
//!
//! `notify` persists exactly one row, then makes exactly one bounded push attempt.
//! The push result never reaches the caller: the stored row is the record, the push
//! is advisory.

use crate::metrics::{self, PushOutcomeLabel};
use crate::models::{CreateNotificationRequest, Notification, NotificationType};
use crate::realtime::{PublishOutcome, RealtimeChannel};
use crate::repository::NotificationRepository;
use crate::websocket::WebSocketMessage;
use error_types::{ServiceError, ServiceResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Clone)]
pub struct NotificationDispatcher {
    repository: Arc<dyn NotificationRepository>,
    channel: Arc<dyn RealtimeChannel>,
    push_timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        channel: Arc<dyn RealtimeChannel>,
        push_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            channel,
            push_timeout,
        }
    }

    /// Persist a notification for `recipient_id` and push it in real time.
    ///
    /// Callers decide whether an event deserves a notification (self-actions are
    /// skipped upstream) and call this only after their own write has committed.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        subject_id: Option<Uuid>,
        notification_type: NotificationType,
        message: impl Into<String>,
    ) -> ServiceResult<Notification> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ServiceError::validation("Notification message is required"));
        }

        let notification = Notification::from_request(CreateNotificationRequest {
            recipient_id,
            actor_id,
            subject_id,
            notification_type,
            message,
        });

        self.repository.insert(&notification).await?;
        info!(
            notification_id = %notification.id,
            recipient = %recipient_id,
            actor = %actor_id,
            kind = notification_type.as_str(),
            "Created notification"
        );

        self.push(&notification).await;
        Ok(notification)
    }

    /// One publish attempt, bounded by the push timeout. Never fails.
    async fn push(&self, notification: &Notification) {
        let message = WebSocketMessage::notification(notification.clone());
        let transport = self.channel.name();
        let started = Instant::now();

        let publish = self.channel.publish(notification.recipient_id, &message);
        let outcome = match tokio::time::timeout(self.push_timeout, publish).await {
            Ok(Ok(PublishOutcome::Delivered(receivers))) => {
                debug!(
                    notification_id = %notification.id,
                    receivers,
                    transport,
                    "Pushed notification"
                );
                PushOutcomeLabel::Delivered
            }
            Ok(Ok(PublishOutcome::NoSubscriber)) => {
                debug!(
                    notification_id = %notification.id,
                    transport,
                    "No live subscriber for notification"
                );
                PushOutcomeLabel::NoSubscriber
            }
            Ok(Err(e)) => {
                warn!(
                    notification_id = %notification.id,
                    transport,
                    error = %e,
                    "Realtime push failed"
                );
                PushOutcomeLabel::Failed
            }
            Err(_) => {
                warn!(
                    notification_id = %notification.id,
                    transport,
                    timeout_ms = self.push_timeout.as_millis() as u64,
                    "Realtime push timed out"
                );
                PushOutcomeLabel::Timeout
            }
        };

        metrics::record_push(outcome, transport, started.elapsed());
    }

    /// Newest first
    pub async fn list_all(&self, recipient_id: Uuid) -> ServiceResult<Vec<Notification>> {
        self.repository.list(recipient_id, false).await
    }

    /// Newest first
    pub async fn list_unread(&self, recipient_id: Uuid) -> ServiceResult<Vec<Notification>> {
        self.repository.list(recipient_id, true).await
    }

    pub async fn unread_count(&self, recipient_id: Uuid) -> ServiceResult<u64> {
        let count = self.repository.count_unread(recipient_id).await?;
        Ok(count.max(0) as u64)
    }

    /// Idempotent. Someone else's notification is reported as not found.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        recipient_id: Uuid,
    ) -> ServiceResult<Notification> {
        let notification = self
            .repository
            .mark_read(notification_id, recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification not found"))?;

        debug!(notification_id = %notification_id, "Marked notification read");
        Ok(notification)
    }

    /// Returns the number of notifications that were unread before the call
    pub async fn mark_all_read(&self, recipient_id: Uuid) -> ServiceResult<u64> {
        let transitioned = self.repository.mark_all_read(recipient_id).await?;
        info!(recipient = %recipient_id, transitioned, "Marked all notifications read");
        Ok(transitioned)
    }
}
