//! Recording stand-in for the remote service.

use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::params::ParameterMap;
use crate::remote::{into_payload, ApiArgs, RemoteError, RemoteService};

/// Answers each method with a canned body (or `{}`) and records every call.
#[derive(Default)]
pub struct FakeApi {
    responses: HashMap<String, Value>,
    calls: RefCell<Vec<(String, ApiArgs)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful response; the `ok` flag is added for you.
    pub fn respond(mut self, method: &str, mut payload: Value) -> Self {
        if let Value::Object(map) = &mut payload {
            map.insert("ok".into(), Value::Bool(true));
        }
        self.responses.insert(method.to_string(), payload);
        self
    }

    pub fn fail(mut self, method: &str, error: &str) -> Self {
        self.responses
            .insert(method.to_string(), json!({"ok": false, "error": error}));
        self
    }

    pub fn calls(&self) -> Vec<(String, ApiArgs)> {
        self.calls.borrow().clone()
    }

    /// Args of the only call made. Panics unless exactly one call happened.
    pub fn single_call(&self) -> (String, ApiArgs) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

impl RemoteService for FakeApi {
    fn call(&self, method: &str, args: &ApiArgs) -> Result<Value, RemoteError> {
        self.calls
            .borrow_mut()
            .push((method.to_string(), args.clone()));
        let body = self
            .responses
            .get(method)
            .cloned()
            .unwrap_or_else(|| json!({"ok": true}));
        into_payload(body)
    }
}

pub fn params(pairs: &[(&str, &str)]) -> ParameterMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
