//! Outbound HTTP calls to downstream services.
//!
//! # Responsibilities
//! - Guard against unusable base addresses before touching the network
//! - Build requests with the endpoint's timeout and Authorization secret
//! - Place parameters per method (query for GET/DELETE, JSON body otherwise)
//! - Normalize response bodies and translate failures

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use url::Url;

use crate::client::envelope::Payload;
use crate::config::schema::EndpointConfig;
use crate::config::validation::points_at_self;
use crate::observability::metrics;

/// Request parameters, placed according to the HTTP method.
pub type Params = Map<String, Value>;

/// Failures surfaced by [`RemoteServiceClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint configuration cannot produce a usable request. An
    /// operator mistake, not a transient condition.
    #[error("{service} service is misconfigured: {reason}")]
    Configuration {
        service: &'static str,
        reason: String,
    },

    /// The downstream service could not be reached within the budget.
    #[error("could not reach the {service} service at {base_url}: {reason}")]
    Connection {
        service: &'static str,
        base_url: String,
        reason: String,
    },

    /// The downstream service rejected the request (4xx). The status mirrors
    /// into the caller's own response.
    #[error("{service} service returned {status}")]
    RemoteClient {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The downstream service failed (5xx or an unexpected transport error).
    #[error("{service} service failed with {status}")]
    RemoteServer {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
}

/// HTTP client bound to one downstream service endpoint.
///
/// Stateless across calls apart from the immutable endpoint configuration;
/// the underlying HTTP client is built per call, the way each request stands
/// alone in the no-retry model.
#[derive(Debug, Clone)]
pub struct RemoteServiceClient {
    service: &'static str,
    endpoint: EndpointConfig,
    local_addr: Option<SocketAddr>,
}

impl RemoteServiceClient {
    /// Create a client for `endpoint`. `local_addr` is our own listener; any
    /// call whose base address loops back to it fails with a configuration
    /// error before a connection is attempted.
    pub fn new(
        service: &'static str,
        endpoint: EndpointConfig,
        local_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            service,
            endpoint,
            local_addr,
        }
    }

    /// Send one request and normalize the response.
    pub async fn perform_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        extra_headers: HeaderMap,
    ) -> Result<Payload, ClientError> {
        let base = self.base_url()?;
        let url = self.request_url(&base, path)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.endpoint.timeout_secs))
            .build()
            .map_err(|e| self.configuration(format!("failed to build HTTP client: {e}")))?;

        let mut request = http.request(method.clone(), url).headers(extra_headers);
        if let Some(secret) = &self.endpoint.secret {
            request = request.header(AUTHORIZATION, secret.as_str());
        }
        if !params.is_empty() {
            request = if method == Method::GET || method == Method::DELETE {
                request.query(&query_pairs(params))
            } else {
                request.json(params)
            };
        }

        tracing::debug!(
            service = self.service,
            method = %method,
            path,
            "calling downstream service"
        );
        let start = Instant::now();

        let result = self.execute(request).await;
        metrics::record_upstream(self.service, outcome(&result), start);
        result
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Payload, ClientError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        if status.is_client_error() {
            // The expected rejection channel (e.g. a book that does not
            // exist); the caller decides whether it is an anomaly.
            return Err(ClientError::RemoteClient {
                service: self.service,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::RemoteServer {
                service: self.service,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(Payload::decode(&body))
    }

    /// The configured base address, checked before every call: it must be
    /// present, parseable, and must not point back at our own listener.
    fn base_url(&self) -> Result<Url, ClientError> {
        if self.endpoint.base_url.is_empty() {
            return Err(self.configuration(
                "base_url is not set; check the [services] section of the config file",
            ));
        }
        let url = Url::parse(&self.endpoint.base_url).map_err(|e| {
            self.configuration(format!(
                "base_url {:?} is not a valid URL: {e}",
                self.endpoint.base_url
            ))
        })?;
        if let Some(local) = self.local_addr {
            if points_at_self(&url, local) {
                return Err(self.configuration(format!(
                    "base_url {} points at this service's own listener ({local}); \
                     it must name the downstream service",
                    self.endpoint.base_url
                )));
            }
        }
        Ok(url)
    }

    fn request_url(&self, base: &Url, path: &str) -> Result<Url, ClientError> {
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| self.configuration(format!("invalid request path {path:?}: {e}")))
    }

    fn configuration(&self, reason: impl Into<String>) -> ClientError {
        ClientError::Configuration {
            service: self.service,
            reason: reason.into(),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> ClientError {
        if error.is_timeout() || error.is_connect() {
            ClientError::Connection {
                service: self.service,
                base_url: self.endpoint.base_url.clone(),
                reason: error.to_string(),
            }
        } else {
            ClientError::RemoteServer {
                service: self.service,
                status: error.status().unwrap_or(StatusCode::BAD_GATEWAY),
                body: error.to_string(),
            }
        }
    }
}

/// Query-string rendering: strings go in bare, everything else as its JSON
/// text.
fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

fn outcome(result: &Result<Payload, ClientError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ClientError::Configuration { .. }) => "configuration",
        Err(ClientError::Connection { .. }) => "connection",
        Err(ClientError::RemoteClient { .. }) => "rejected",
        Err(ClientError::RemoteServer { .. }) => "failed",
    }
}
