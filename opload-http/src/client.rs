//! reqwest implementation of the operations gateway

use crate::config::ClientConfig;
use crate::errors::HttpError;
use async_trait::async_trait;
use opload_core::{
    routes, CreateOperationRequest, Operation, OperationId, OperationsGateway, RemoteError,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Uninstrumented client of the operations service.
///
/// Holds one pooled reqwest client; clone-free sharing goes through
/// [`SharedGateway`](opload_core::SharedGateway).
#[derive(Debug, Clone)]
pub struct OperationsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OperationsClient {
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        let parsed = Url::parse(&config.base_url).map_err(|e| HttpError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl {
                url: config.base_url,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        debug!(
            "Creating operations client for {} with timeout: {}s",
            config.base_url,
            config.timeout.as_secs()
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body.
    ///
    /// `route` is the template the failure is attributed to, never the
    /// concrete path.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        route: &str,
    ) -> Result<T, RemoteError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(route, e))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} answered {}", route, status);
            return Err(RemoteError::Status {
                route: route.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(route, e))?;

        serde_json::from_slice(&body).map_err(|e| RemoteError::InvalidPayload {
            route: route.to_string(),
            message: e.to_string(),
        })
    }

    fn transport_error(&self, route: &str, error: reqwest::Error) -> RemoteError {
        if error.is_timeout() {
            RemoteError::Timeout {
                route: route.to_string(),
                timeout: self.timeout,
            }
        } else {
            RemoteError::Transport {
                route: route.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl OperationsGateway for OperationsClient {
    async fn create_operation(&self) -> Result<Operation, RemoteError> {
        let payload = CreateOperationRequest::default();
        let request = self.client.post(self.url(routes::OPERATIONS)).json(&payload);
        self.execute(request, routes::OPERATIONS).await
    }

    async fn get_operation(&self, operation_id: OperationId) -> Result<Operation, RemoteError> {
        let request = self.client.get(self.url(&routes::operation_path(operation_id)));
        self.execute(request, routes::OPERATION).await
    }

    async fn get_operations(&self) -> Result<Vec<Operation>, RemoteError> {
        let request = self.client.get(self.url(routes::OPERATIONS));
        self.execute(request, routes::OPERATIONS).await
    }
}
