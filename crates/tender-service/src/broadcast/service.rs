//! The notification broadcaster.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tender_core::error::AppError;
use tender_core::types::NotificationId;
use tender_database::repositories::NotificationRepository;
use tender_entity::notification::{Direction, Notification, TenderAction};

use super::guard::SendGuard;
use crate::composer::MessageComposer;
use crate::context::RequestContext;
use crate::port_day::PortDayService;

/// Operator form values for a send or a preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// Selected action.
    #[serde(default)]
    pub action: Option<TenderAction>,
    /// Selected direction.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Selected tender label, empty for "A tender".
    #[serde(default)]
    pub tender: String,
    /// Whether the custom text box is in use.
    #[serde(default)]
    pub is_custom: bool,
    /// Custom text.
    #[serde(default)]
    pub custom_text: String,
}

impl SendRequest {
    /// Whether custom text takes precedence over the templated choice.
    pub fn uses_custom_text(&self) -> bool {
        self.is_custom && !self.custom_text.trim().is_empty()
    }
}

/// Writes composed notifications for the active port day.
#[derive(Debug, Clone)]
pub struct NotificationBroadcaster {
    repo: Arc<dyn NotificationRepository>,
    port_days: PortDayService,
    composer: MessageComposer,
    guard: SendGuard,
    feed_limit: usize,
}

impl NotificationBroadcaster {
    /// Creates a new broadcaster.
    pub fn new(
        repo: Arc<dyn NotificationRepository>,
        port_days: PortDayService,
        composer: MessageComposer,
        feed_limit: usize,
    ) -> Self {
        Self {
            repo,
            port_days,
            composer,
            guard: SendGuard::new(),
            feed_limit,
        }
    }

    /// The per-client in-flight guard.
    pub fn guard(&self) -> &SendGuard {
        &self.guard
    }

    /// The composer used for sends and previews.
    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    /// The sentence a send would produce, without writing anything.
    pub fn preview(&self, request: &SendRequest) -> String {
        self.composer.compose(
            request.action,
            request.direction,
            &request.tender,
            request.is_custom,
            &request.custom_text,
        )
    }

    /// Send a notification stamped with the current time.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        request: &SendRequest,
    ) -> Result<Notification, AppError> {
        self.send_at(ctx, request, Utc::now()).await
    }

    /// Send a notification stamped with `now`, shifted to the port's offset.
    pub async fn send_at(
        &self,
        ctx: &RequestContext,
        request: &SendRequest,
        now: DateTime<Utc>,
    ) -> Result<Notification, AppError> {
        let _permit = self.guard.try_acquire(ctx.session_id).ok_or_else(|| {
            AppError::busy("A notification is already being sent. Please wait.")
        })?;

        let message = self.preview(request);
        if message.is_empty() {
            return Err(AppError::precondition(
                "Please select an action and a direction or enable custom message and enter a message before sending.",
            ));
        }
        let port_day = self.port_days.active_port_day().await?.ok_or_else(|| {
            AppError::precondition(
                "No active port day. Create a port day before sending notifications.",
            )
        })?;

        let local_time = now.with_timezone(&port_day.utc_offset().to_fixed_offset());
        let notification = if request.uses_custom_text() {
            Notification::new(message, None, None, String::new(), local_time, port_day.id)
        } else {
            Notification::new(
                message,
                request.action,
                request.direction,
                request.tender.clone(),
                local_time,
                port_day.id,
            )
        };

        self.repo.create(&notification).await?;
        info!(
            notification_id = %notification.id,
            port_day_id = %port_day.id,
            operator = %ctx.email,
            message = %notification.message,
            "Notification sent"
        );
        Ok(notification)
    }

    /// The most recent notifications, newest first.
    pub async fn latest(&self, limit: usize) -> Result<Vec<Notification>, AppError> {
        let list = self.repo.latest(limit).await?;
        debug!(count = list.len(), "Loaded notifications");
        Ok(list)
    }

    /// The live feed: the configured number of most recent notifications.
    pub async fn feed(&self) -> Result<Vec<Notification>, AppError> {
        self.latest(self.feed_limit).await
    }

    /// Delete one notification.
    pub async fn delete(&self, id: NotificationId) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        info!(notification_id = %id, "Notification deleted");
        Ok(())
    }

    /// Delete every notification. Returns how many were removed.
    pub async fn clear_all(&self) -> Result<u64, AppError> {
        let removed = self.repo.delete_all().await?;
        info!(removed, "All notifications cleared");
        Ok(removed)
    }
}
