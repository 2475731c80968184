// File: orchestrator/src/cloud/http.rs
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{ComputeControlPlane, InstanceStatus, StorageControlPlane};
use crate::config::ControlPlaneConfig;
use crate::errors::ControlPlaneError;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    volume_ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    snapshot_id: String,
}

/// REST client for the compute/storage control plane.
///
/// Routes are scoped by region: `{base_url}/regions/{region}/...`. Every
/// identifier is percent-encoded as a single path segment.
#[derive(Clone)]
pub struct HttpControlPlane {
    base_url: Url,
    api_key: Option<String>,
    client: Client,
}

impl HttpControlPlane {
    pub fn new(config: &ControlPlaneConfig) -> Result<Self, ControlPlaneError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ControlPlaneError::RequestFailed {
                operation: "client_init".to_string(),
                reason: e.to_string(),
            })?;

        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            ControlPlaneError::RequestFailed {
                operation: "client_init".to_string(),
                reason: format!("invalid base_url '{}': {}", config.base_url, e),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ControlPlaneError::RequestFailed {
                operation: "client_init".to_string(),
                reason: format!("base_url '{}' cannot carry a path", config.base_url),
            });
        }

        Ok(Self {
            base_url,
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            client,
        })
    }

    fn region_url(
        &self,
        region: &str,
        resource: (&str, &str),
        action: &str,
    ) -> Result<Url, ControlPlaneError> {
        let (collection, id) = resource;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ControlPlaneError::InvalidIdentifier {
                field: "base_url".to_string(),
                value: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push("regions")
            .push(route_segment("region", region)?)
            .push(collection)
            .push(route_segment(collection, id)?)
            .push(action);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, ControlPlaneError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| ControlPlaneError::RequestFailed {
                operation: operation.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ControlPlaneError::UnexpectedStatus {
                operation: operation.to_string(),
                status,
                body,
            });
        }

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<T, ControlPlaneError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ControlPlaneError::InvalidResponse {
                operation: operation.to_string(),
                reason: e.to_string(),
            })
    }
}

/// `.` and `..` would be dropped or resolved by the URL parser, and an empty value
/// would collapse the route, so none of them may name a resource.
fn route_segment<'a>(field: &str, value: &'a str) -> Result<&'a str, ControlPlaneError> {
    match value.trim() {
        "" | "." | ".." => Err(ControlPlaneError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        }),
        _ => Ok(value),
    }
}

#[async_trait]
impl ComputeControlPlane for HttpControlPlane {
    async fn describe_volumes(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<Vec<String>, ControlPlaneError> {
        let url = self.region_url(region, ("instances", instance_id), "volumes")?;
        debug!("Describing volumes via {}", url);
        let response = self.send("describe_volumes", self.client.get(url)).await?;
        let body: VolumesResponse = Self::parse("describe_volumes", response).await?;
        Ok(body.volume_ids)
    }

    async fn reboot_instance(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<(), ControlPlaneError> {
        let url = self.region_url(region, ("instances", instance_id), "reboot")?;
        self.send("reboot_instance", self.client.post(url)).await?;
        Ok(())
    }

    async fn instance_status(
        &self,
        region: &str,
        instance_id: &str,
    ) -> Result<InstanceStatus, ControlPlaneError> {
        let url = self.region_url(region, ("instances", instance_id), "status")?;
        let response = self.send("instance_status", self.client.get(url)).await?;
        Self::parse("instance_status", response).await
    }
}

#[async_trait]
impl StorageControlPlane for HttpControlPlane {
    async fn create_snapshot(
        &self,
        region: &str,
        volume_id: &str,
        description: &str,
    ) -> Result<String, ControlPlaneError> {
        let url = self.region_url(region, ("volumes", volume_id), "snapshots")?;
        let request = self
            .client
            .post(url)
            .json(&json!({ "description": description }));
        let response = self.send("create_snapshot", request).await?;
        let body: SnapshotResponse = Self::parse("create_snapshot", response).await?;
        Ok(body.snapshot_id)
    }
}
