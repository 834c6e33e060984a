//! Outbound transport: form-encoded POSTs to the portal servlets.

use async_trait::async_trait;
use url::Url;

use crate::{config::PortalConfig, user_agent::get_user_agent, Error};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Sends a form body to a portal endpoint and returns the raw response bytes.
///
/// Failures propagate unchanged. Nothing here retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &Url, form_body: &str) -> Result<Vec<u8>, Error>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &PortalConfig) -> Result<Self, Error> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| get_user_agent().to_string());
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed(e.to_string())
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &Url, form_body: &str) -> Result<Vec<u8>, Error> {
        tracing::debug!(url = %url, body_len = form_body.len(), "posting portal form");
        let resp = self
            .http
            .post(url.clone())
            .header("content-type", FORM_CONTENT_TYPE)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "es-CL,es;q=0.9")
            .body(form_body.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to post form to {}: {}", url, e);
                Error::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&String::from_utf8_lossy(&body));
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_untouched() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn long_body_truncated_on_char_boundary() {
        let body = "ñ".repeat(1500);
        let out = truncate_body(&body);
        assert!(out.ends_with("...[truncated]"));
        assert!(out.len() <= 2000 + "...[truncated]".len());
    }
}
