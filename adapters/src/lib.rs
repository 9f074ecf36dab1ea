//! Core `adapters` crate for abstracting interactions with the SIGEP backend.
//!
//! This crate defines the `RemoteGateway` trait, which outlines the single
//! request/response contract every screen composes its calls through, and
//! provides the concrete HTTP implementation along with the typed models of
//! each endpoint.

pub mod endpoints;
pub mod errors;
pub mod http;
pub mod message;
pub mod models;
pub mod notify;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use errors::GatewayError;
pub use http::HttpGateway;
pub use notify::{Notifier, StderrNotifier, WriterNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        f.write_str(name)
    }
}

/// A request relative to the gateway's base address.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, GatewayError> {
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn put<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, GatewayError> {
        Ok(Self {
            method: Method::Put,
            path: path.into(),
            query: Vec::new(),
            body: Some(serde_json::to_value(body)?),
        })
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// The uniform contract between screens and the backend.
///
/// Implementations return the decoded JSON body of a successful response, or
/// a categorized [`GatewayError`]. No implementation retries.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, GatewayError>;
}

/// Sends `request` and decodes the response into the endpoint's schema.
///
/// A body that does not match `T` fails with [`GatewayError::MalformedResponse`]
/// instead of being rendered half-populated.
pub async fn call<T, G>(gateway: &G, request: ApiRequest) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
    G: RemoteGateway + ?Sized,
{
    let path = request.path.clone();
    let value = gateway.send(request).await?;
    serde_json::from_value(value).map_err(|err| GatewayError::MalformedResponse {
        path,
        reason: err.to_string(),
    })
}

/// Sends `request`, ignoring whatever body comes back.
pub async fn execute<G>(gateway: &G, request: ApiRequest) -> Result<(), GatewayError>
where
    G: RemoteGateway + ?Sized,
{
    gateway.send(request).await.map(|_| ())
}
