use crate::error::{Error, Result};
use reqwest::Client;
use serde_json::json;

/// Outbound mail port. Delivery goes through an HTTP mail gateway; when no
/// gateway is configured the service degrades to a logged no-op so local
/// setups work without one.
#[derive(Clone)]
pub struct MailerService {
    client: Client,
    gateway_url: Option<String>,
}

impl MailerService {
    pub fn new(gateway_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            gateway_url,
        }
    }

    pub async fn send(&self, to: &[String], subject: &str, html_body: &str) -> Result<()> {
        let Some(url) = &self.gateway_url else {
            tracing::info!(subject = %subject, recipients = to.len(), "mail gateway not configured, skipping send");
            return Ok(());
        };

        let resp = self
            .client
            .post(url)
            .json(&json!({
                "to": to,
                "subject": subject,
                "html": html_body,
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Internal(format!(
                "Mail gateway returned {}",
                resp.status()
            )));
        }
        Ok(())
    }

    /// Fire-and-forget delivery. Never surfaces failure to the caller;
    /// errors are logged and swallowed.
    pub fn send_detached(&self, to: Vec<String>, subject: String, html_body: String) {
        if to.is_empty() {
            return;
        }
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, &html_body).await {
                tracing::error!(error = ?e, subject = %subject, "failed to deliver notification mail");
            }
        });
    }
}
