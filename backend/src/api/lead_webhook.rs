use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("lead webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lead webhook answered {0}")]
    Status(StatusCode),
}

/// Posts lead payloads to the configured capture endpoint. Without an
/// endpoint every delivery succeeds without touching the network.
#[derive(Debug, Clone)]
pub struct LeadWebhook {
    client: Client,
    url: Option<String>,
}

impl LeadWebhook {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// One POST, no retry. Any non-2xx answer is a failure.
    pub async fn deliver<T: Serialize + ?Sized>(&self, payload: &T) -> Result<(), DeliveryError> {
        let Some(url) = self.url.as_deref() else {
            tracing::debug!("No lead webhook configured, skipping delivery");
            return Ok(());
        };

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }

        tracing::info!("Lead delivered to webhook ({})", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unconfigured_webhook_always_succeeds() {
        let webhook = LeadWebhook::new(None, Duration::from_secs(1)).unwrap();
        assert!(!webhook.is_configured());
        assert!(webhook.deliver(&json!({"firstName": "Jo"})).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/lead", port);
        let webhook = LeadWebhook::new(Some(url), Duration::from_secs(2)).unwrap();
        let err = webhook.deliver(&json!({})).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Transport(_)));
    }
}
