//! HTTP history source: `GET <endpoint>?page=<n>`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::{HistoryError, HistoryPage, HistorySource};
use crate::core::message::Message;

pub struct HttpHistorySource {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl HttpHistorySource {
    /// Creates a source for `endpoint` with the given per-request timeout.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, HistoryError> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| HistoryError::Config(format!("invalid endpoint {endpoint:?}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HistoryError::Config(e.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl HistorySource for HttpHistorySource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<Message>, HistoryError> {
        info!("GET {} page={}", self.endpoint, page);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| HistoryError::Network(e.to_string()))?;

        debug!("History response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("History endpoint error: {} - {}", status, body);
            return Err(HistoryError::Api {
                status,
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| HistoryError::Network(e.to_string()))?;
        let parsed: HistoryPage =
            serde_json::from_str(&body).map_err(|e| HistoryError::Malformed(e.to_string()))?;

        let messages = parsed.into_messages()?;
        debug!("Page {} decoded: {} messages", page, messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_endpoint() {
        let result = HttpHistorySource::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(HistoryError::Config(_))));
    }

    #[test]
    fn keeps_endpoint() {
        let source =
            HttpHistorySource::new("http://localhost:8080/api/chats", Duration::from_secs(5)).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:8080/api/chats");
        assert_eq!(source.name(), "http");
    }
}
