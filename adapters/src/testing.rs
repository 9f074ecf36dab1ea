//! In-memory gateway for exercising screens without a backend.
//!
//! Responses are scripted per `(method, path)` and consumed in order; every
//! request is recorded so tests can assert on exactly what was sent.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::GatewayError;
use crate::{ApiRequest, Method, RemoteGateway};

type Script = Box<dyn Fn() -> Result<Value, GatewayError> + Send + Sync>;

#[derive(Default)]
pub struct ScriptedGateway {
    scripts: Mutex<HashMap<(Method, String), VecDeque<Script>>>,
    sticky: Mutex<HashMap<(Method, String), Script>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers the next matching call with `value`.
    pub fn respond(&self, method: Method, path: &str, value: Value) -> &Self {
        self.push(method, path, Box::new(move || Ok(value.clone())))
    }

    /// Answers the next matching call with the error `make` builds.
    pub fn fail<F>(&self, method: Method, path: &str, make: F) -> &Self
    where
        F: Fn() -> GatewayError + Send + Sync + 'static,
    {
        self.push(method, path, Box::new(move || Err(make())))
    }

    /// Answers every matching call with `value` once the queue is drained.
    pub fn always(&self, method: Method, path: &str, value: Value) -> &Self {
        if let Ok(mut sticky) = self.sticky.lock() {
            sticky.insert(
                (method, path.to_string()),
                Box::new(move || Ok(value.clone())),
            );
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    fn push(&self, method: Method, path: &str, script: Script) -> &Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts
                .entry((method, path.to_string()))
                .or_default()
                .push_back(script);
        }
        self
    }

    fn next(&self, key: &(Method, String)) -> Option<Result<Value, GatewayError>> {
        let queued = self
            .scripts
            .lock()
            .ok()
            .and_then(|mut scripts| scripts.get_mut(key).and_then(VecDeque::pop_front));
        if let Some(script) = queued {
            return Some(script());
        }
        let sticky = self.sticky.lock().ok()?;
        sticky.get(key).map(|script| script())
    }
}

#[async_trait]
impl RemoteGateway for ScriptedGateway {
    async fn send(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let key = (request.method, request.path.clone());
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.next(&key).unwrap_or_else(|| {
            Err(GatewayError::Server {
                status: 404,
                message: Some(format!("sin respuesta programada para {} {}", key.0, key.1)),
            })
        })
    }
}
