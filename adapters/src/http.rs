//! HTTP implementation of the `RemoteGateway` trait.
//!
//! This file contains the reqwest-backed client, the translation of
//! transport failures and HTTP statuses into `GatewayError` categories, and
//! the connectivity notification hook.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::GatewayError;
use crate::message;
use crate::notify::{Notifier, StderrNotifier, CONNECTIVITY_MESSAGE};
use crate::{ApiRequest, Method, RemoteGateway};

pub struct HttpGateway {
    client: Client,
    base: Url,
    notifier: Arc<dyn Notifier>,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        Self::with_notifier(base_url, timeout, Arc::new(StderrNotifier::default()))
    }

    pub fn with_notifier(
        base_url: &str,
        timeout: Option<Duration>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, GatewayError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| GatewayError::InvalidAddress(format!("{base_url}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidAddress(format!("{base_url}: not a base address")));
        }
        // Request paths are appended below the base path, never replacing it.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::Network(format!("Cannot build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base,
            notifier,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|err| GatewayError::InvalidAddress(format!("{path}: {err}")))
    }

    fn connectivity_failure(&self, request: &ApiRequest, err: reqwest::Error) -> GatewayError {
        warn!(method = %request.method, path = %request.path, "no response: {err}");
        self.notifier.connectivity_lost(CONNECTIVITY_MESSAGE);
        GatewayError::Network(err.to_string())
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let url = self.url_for(&request.path)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
        }
        .header(CONTENT_TYPE, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return Err(self.connectivity_failure(&request, err)),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(self.connectivity_failure(&request, err)),
        };

        if !status.is_success() {
            let server_message = message::extract(&text);
            warn!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "request rejected"
            );
            return Err(GatewayError::from_status(status.as_u16(), server_message));
        }

        decode_body(&request.path, &text)
    }
}

/// Empty success bodies decode to `null`, which unit-returning calls accept.
fn decode_body(path: &str, text: &str) -> Result<Value, GatewayError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        // Some endpoints answer a bare confirmation string.
        Err(_) if !text.trim_start().starts_with(['{', '[']) => {
            Ok(Value::String(text.trim().to_string()))
        }
        Err(err) => Err(GatewayError::MalformedResponse {
            path: path.to_string(),
            reason: err.to_string(),
        }),
    }
}
