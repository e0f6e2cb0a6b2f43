//! Request pipeline for the storefront API.
//!
//! # Design
//! `ApiClient` holds a read-only `ClientConfig` and a `Transport`, and is
//! cheap to clone. A call is split into three stages:
//!
//! 1. `build_request` turns an `Endpoint` plus optional headers and body into
//!    an `HttpRequest` without touching the network.
//! 2. The transport executes it.
//! 3. `parse_response` checks the HTTP status and unwraps the envelope.
//!
//! Stages 1 and 3 are pure, so they are tested without a server. Every stage
//! returns an already classified `ApiError`.

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::envelope;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Client over the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the request for `endpoint`.
    ///
    /// Caller headers override the defaults on a case-insensitive key match.
    /// With a body, `Content-Type: application/json` is set last.
    pub fn build_request<B>(
        &self,
        endpoint: Endpoint,
        headers: Option<&[(String, String)]>,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let base_url = &self.config.base_url;
        match Url::parse(base_url) {
            Ok(base) if base.has_host() => {}
            Ok(_) => {
                tracing::warn!(url = %base_url, "base URL has no host");
                return Err(ApiError::InvalidUrl(base_url.clone()));
            }
            Err(e) => {
                tracing::warn!(url = %base_url, error = %e, "invalid base URL");
                return Err(ApiError::InvalidUrl(base_url.clone()));
            }
        }
        let raw = format!("{}{}", base_url.trim_end_matches('/'), endpoint.path());
        let url = Url::parse(&raw).map_err(|e| {
            tracing::warn!(url = %raw, error = %e, "invalid request URL");
            ApiError::InvalidUrl(raw.clone())
        })?;

        let mut merged = merge_headers(self.config.default_headers(), headers.unwrap_or_default());

        let body = match body {
            Some(body) => {
                let bytes = serde_json::to_vec(body)
                    .map_err(|e| ApiError::RequestEncodingFailed(e.to_string()))?;
                merged = merge_headers(
                    merged,
                    &[(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
                );
                Some(bytes)
            }
            None => None,
        };

        Ok(HttpRequest {
            method: endpoint.http_method(),
            url,
            headers: merged,
            body,
        })
    }

    /// Check the transport status and decode the envelope payload as `T`.
    pub fn parse_response<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
    ) -> Result<T, ApiError> {
        if !response.is_success() {
            return Err(ApiError::RequestFailed(format!(
                "Request failed with status code: {}",
                response.status
            )));
        }
        envelope::decode(&response.body)
    }

    /// Run the full pipeline for `endpoint`.
    pub async fn request<T, B>(
        &self,
        endpoint: Endpoint,
        headers: Option<&[(String, String)]>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.build_request(endpoint, headers, body)?;
        tracing::debug!(
            endpoint = endpoint.name(),
            method = %request.method,
            url = %request.url,
            has_body = request.body.is_some(),
            "sending request"
        );

        let response = self.transport.execute(request).await?;
        let result = self.parse_response(&response);
        match &result {
            Ok(_) => tracing::debug!(
                endpoint = endpoint.name(),
                status = response.status,
                "request succeeded"
            ),
            Err(e) => tracing::warn!(
                endpoint = endpoint.name(),
                status = response.status,
                kind = e.kind(),
                error = %e,
                "request failed"
            ),
        }
        result
    }

    /// `request` with no extra headers and no body.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        self.request::<T, ()>(endpoint, None, None).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

/// Merge `overrides` into `defaults`. A matching key (ASCII case-insensitive)
/// replaces the default's value in place; new keys are appended in order.
pub fn merge_headers(
    mut defaults: Vec<(String, String)>,
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    for (name, value) in overrides {
        match defaults
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value.clone(),
            None => defaults.push((name.clone(), value.clone())),
        }
    }
    defaults
}
