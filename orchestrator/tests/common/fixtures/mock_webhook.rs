//! Mock webhook server for testing notification delivery and escalation hand-off
//!
//! This simulates an endpoint that receives JSON posts, allowing tests to
//! verify what was sent.

use serde_json::Value;
use std::time::Duration;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const WEBHOOK_PATH: &str = "/webhook";

/// Mock webhook server that captures posted JSON bodies
pub struct MockWebhookServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockWebhookServer {
    /// Create a new mock webhook server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, WEBHOOK_PATH)
    }

    /// Mock successful delivery
    pub async fn mock_success(&self) {
        self.mock_status(200).await;
    }

    /// Mock a fixed response status for every post
    pub async fn mock_status(&self, status_code: u16) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Reject posts addressed to one recipient; mount before `mock_success`
    pub async fn mock_rejects_recipient(&self, recipient: &str, status_code: u16) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .and(body_partial_json(serde_json::json!({ "recipient": recipient })))
            .respond_with(ResponseTemplate::new(status_code))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Mock a slow endpoint
    pub async fn mock_delay(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn get_requests(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|req| req.body_json::<Value>().ok())
            .collect()
    }

    pub async fn request_count(&self) -> usize {
        self.get_requests().await.len()
    }
}
