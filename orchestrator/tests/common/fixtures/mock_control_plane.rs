//! Mock control plane REST API for testing the HTTP adapter
//!
//! Routes mirror the region-scoped layout `HttpControlPlane` talks to.

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub struct MockControlPlaneServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockControlPlaneServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();
        Self { server, base_url }
    }

    fn instance_path(region: &str, instance_id: &str, suffix: &str) -> String {
        format!("/regions/{}/instances/{}{}", region, instance_id, suffix)
    }

    pub async fn mock_volumes(&self, region: &str, instance_id: &str, volume_ids: &[&str]) {
        Mock::given(method("GET"))
            .and(path(Self::instance_path(region, instance_id, "/volumes")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volume_ids": volume_ids
            })))
            .mount(&self.server)
            .await;
    }

    /// Volumes endpoint that only answers when the bearer token matches
    pub async fn mock_volumes_requiring_key(
        &self,
        region: &str,
        instance_id: &str,
        api_key: &str,
        volume_ids: &[&str],
    ) {
        Mock::given(method("GET"))
            .and(path(Self::instance_path(region, instance_id, "/volumes")))
            .and(header("Authorization", format!("Bearer {}", api_key).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volume_ids": volume_ids
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_volumes_error(&self, region: &str, instance_id: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(Self::instance_path(region, instance_id, "/volumes")))
            .respond_with(ResponseTemplate::new(status).set_body_string("InvalidInstanceID.NotFound"))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_reboot(&self, region: &str, instance_id: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(Self::instance_path(region, instance_id, "/reboot")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status(&self, region: &str, instance_id: &str, status: Value) {
        Mock::given(method("GET"))
            .and(path(Self::instance_path(region, instance_id, "/status")))
            .respond_with(ResponseTemplate::new(200).set_body_json(status))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status_body(&self, region: &str, instance_id: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(Self::instance_path(region, instance_id, "/status")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Snapshot endpoint that expects the given description
    pub async fn mock_snapshot(
        &self,
        region: &str,
        volume_id: &str,
        description: &str,
        snapshot_id: &str,
    ) {
        Mock::given(method("POST"))
            .and(path(format!("/regions/{}/volumes/{}/snapshots", region, volume_id)))
            .and(body_json(json!({ "description": description })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "snapshot_id": snapshot_id
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

/// Status body for a running instance with both checks passing
pub fn healthy_status() -> Value {
    json!({
        "state": "running",
        "system_status": "ok",
        "instance_status": "ok"
    })
}
