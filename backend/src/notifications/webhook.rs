use super::Notification;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("no webhook configured")]
    NotConfigured,
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook answered {0}")]
    Status(reqwest::StatusCode),
}

/// Posts relay events to a chat bot webhook.
///
/// The body follows the common bot `sendMessage` shape (`chat_id` + `text`)
/// and also carries the raw event for webhooks that want structured data.
#[derive(Clone)]
pub struct WebhookSender {
    client: reqwest::Client,
    url: Option<String>,
    chat_id: Option<String>,
}

impl WebhookSender {
    pub fn new(url: Option<String>, chat_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(TIMEOUT)
                .build()
                .unwrap_or_default(),
            url,
            chat_id,
        }
    }

    pub async fn send(&self, notification: &Notification) -> Result<(), WebhookError> {
        let url = self.url.as_deref().ok_or(WebhookError::NotConfigured)?;
        let body = json!({
            "chat_id": self.chat_id,
            "text": render_text(notification),
            "event": notification,
        });
        let response = self.client.post(url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::Status(response.status()));
        }
        Ok(())
    }
}

/// Human-readable message for the chat channel.
pub(crate) fn render_text(notification: &Notification) -> String {
    let p = &notification.payload;
    let mut text = notification.kind.title().to_string();
    for key in ["name", "jurisdiction", "address", "responsible_email"] {
        if let Some(value) = p.get(key).and_then(|v| v.as_str()) {
            text.push_str(&format!("\n{}: {}", key, value));
        }
    }
    if let Some(bulk) = p.get("bulk_data").and_then(|v| v.as_str()) {
        let preview: String = bulk.chars().take(500).collect();
        text.push_str(&format!("\n\n{}", preview));
    }
    if let Some(id) = p.get("id").and_then(|v| v.as_str()) {
        text.push_str(&format!("\n\nid: {}", id));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::super::EventKind;
    use super::*;

    #[actix_web::test]
    async fn unconfigured_sender_reports_not_configured() {
        let sender = WebhookSender::new(None, None);
        let n = Notification {
            kind: EventKind::NewSubmission,
            payload: json!({}),
        };
        assert!(matches!(sender.send(&n).await, Err(WebhookError::NotConfigured)));
    }

    #[test]
    fn renders_submission_summary() {
        let text = render_text(&Notification {
            kind: EventKind::NewSubmission,
            payload: json!({ "id": "s-1", "name": "Igreja X", "jurisdiction": "IEAB" }),
        });
        assert!(text.starts_with("Nova igreja"));
        assert!(text.contains("name: Igreja X"));
        assert!(text.contains("id: s-1"));
    }

    #[test]
    fn truncates_long_bulk_text() {
        let text = render_text(&Notification {
            kind: EventKind::NewBulkSubmission,
            payload: json!({ "bulk_data": "x".repeat(2000) }),
        });
        assert!(text.matches('x').count() == 500);
    }
}
