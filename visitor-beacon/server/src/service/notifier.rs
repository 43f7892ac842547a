use std::{fmt, sync::Arc};

use beacon_metrics::DefaultMetrics;
use notification::{Error as NotificationError, NotificationClient};

use crate::service::Report;

/// Delivers reports to the operator chat.
///
/// Delivery is best effort: failures are logged and counted, never surfaced
/// to the visitor.
#[derive(Clone)]
pub struct Notifier {
    client: Arc<dyn NotificationClient>,
    metrics: DefaultMetrics,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl Notifier {
    #[must_use]
    pub fn new(client: Arc<dyn NotificationClient>, metrics: DefaultMetrics) -> Self {
        Self { client, metrics }
    }

    /// Returns the provider payload on success.
    pub async fn notify(&self, report: Report) -> Option<serde_json::Value> {
        let notification = report.into_notification();

        match self.client.send_notification(&notification).await {
            Ok(payload) => {
                self.metrics.record_notification(true);
                tracing::debug!("Message sent to Telegram");
                Some(payload)
            }
            Err(err) => {
                self.metrics.record_notification(false);
                match &err {
                    NotificationError::Rejected { status, body } if !body.is_empty() => {
                        tracing::error!(status, "Error sending message to Telegram: {body}");
                    }
                    _ => tracing::error!("Error sending message to Telegram: {err}"),
                }
                None
            }
        }
    }
}
