use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ApiConfig;

/// Failure reported by the remote service or the transport in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The API answered `ok: false`; carries its error code.
    #[error("{0}")]
    Api(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("cannot encode request: {0}")]
    Encode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

/// Form fields for one API method call, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiArgs(Vec<(String, String)>);

impl ApiArgs {
    /// Flatten a typed request into form fields. Strings go as-is, numbers
    /// and booleans as literals, arrays and objects as compact JSON. Empty
    /// strings, empty arrays and nulls are left out.
    pub fn from_request<T: Serialize>(request: &T) -> Result<Self, RemoteError> {
        let value =
            serde_json::to_value(request).map_err(|e| RemoteError::Encode(e.to_string()))?;
        let fields = match value {
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, value)| form_value(value).map(|v| (key, v)))
                .collect(),
            Value::Null => Vec::new(),
            other => {
                return Err(RemoteError::Encode(format!(
                    "expected an object, got {other}"
                )))
            }
        };
        Ok(Self(fields))
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.0
    }
}

fn form_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// One synchronous RPC per API method.
pub trait RemoteService {
    fn call(&self, method: &str, args: &ApiArgs) -> Result<Value, RemoteError>;
}

/// Check the `ok` flag of a Web API response and drop it from the payload.
pub fn into_payload(body: Value) -> Result<Value, RemoteError> {
    let map = match body {
        Value::Object(map) => map,
        other => return Err(RemoteError::Decode(format!("expected an object, got {other}"))),
    };
    match map.get("ok").and_then(Value::as_bool) {
        Some(true) => Ok(Value::Object(
            map.into_iter().filter(|(key, _)| key != "ok").collect(),
        )),
        Some(false) => Err(RemoteError::Api(
            map.get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string(),
        )),
        _ => Err(RemoteError::Decode("missing ok flag".into())),
    }
}

/// Blocking Slack Web API client.
pub struct SlackClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl SlackClient {
    pub fn new(config: &ApiConfig, token: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("slack-shell/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        if token.is_empty() {
            warn!("no API token configured, calls will be rejected with not_authed");
        }

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl RemoteService for SlackClient {
    fn call(&self, method: &str, args: &ApiArgs) -> Result<Value, RemoteError> {
        let url = format!("{}/{}", self.base_url, method);
        let started = Instant::now();

        let mut request = self.http.post(&url).form(args.fields());
        if !self.token.is_empty() {
            request = request.bearer_auth(&self.token);
        }

        let response = request.send().map_err(|e| {
            debug!(method, elapsed = ?started.elapsed(), error = %e, "remote call failed");
            RemoteError::from(e)
        })?;
        let status = response.status();
        let body: Value = response
            .json()
            .map_err(|e| RemoteError::Decode(format!("HTTP {status}: {e}")))?;

        debug!(
            method,
            %status,
            elapsed = ?started.elapsed(),
            "remote call finished"
        );

        into_payload(body)
    }
}
