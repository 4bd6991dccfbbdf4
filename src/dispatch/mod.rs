//! Routing of `resource.action` commands to typed handlers.
//!
//! Routing is two-level: the resource picks a table of actions, the action
//! picks a handler. Each handler coerces the raw [`ParameterMap`] into its
//! own request struct, makes the remote call and normalizes the payload.

mod auth;
mod chat;
mod conversations;
mod emoji;
mod files;
mod im;
mod search;
mod stars;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::error::DispatchError;
use crate::params::{ParamReader, ParameterMap};
use crate::remote::{ApiArgs, RemoteService};

/// `Some` payload to print, `None` for calls that only acknowledge.
pub type HandlerResult = Result<Option<Value>, DispatchError>;

type HandlerFn = fn(&Call<'_>, &ParamReader<'_>) -> HandlerResult;

/// One action of a resource, spelled the way the remote API spells it.
pub(crate) struct Route {
    action: &'static str,
    handler: HandlerFn,
}

impl Route {
    pub(crate) const fn new(action: &'static str, handler: HandlerFn) -> Self {
        Self { action, handler }
    }
}

const RESOURCES: &[(&str, &[Route])] = &[
    ("auth", auth::ROUTES),
    ("channels", conversations::ROUTES),
    ("groups", conversations::GROUP_ROUTES),
    ("files", files::ROUTES),
    ("chat", chat::ROUTES),
    ("emoji", emoji::ROUTES),
    ("im", im::ROUTES),
    ("search", search::ROUTES),
    ("stars", stars::ROUTES),
    ("users", users::ROUTES),
];

struct ResourceTable {
    name: &'static str,
    actions: HashMap<String, &'static Route>,
}

lazy_static! {
    static ref ROUTING: HashMap<String, ResourceTable> = RESOURCES
        .iter()
        .map(|&(name, routes)| {
            let actions = routes
                .iter()
                .map(|route| (route.action.to_ascii_lowercase(), route))
                .collect();
            (name.to_ascii_lowercase(), ResourceTable { name, actions })
        })
        .collect();
}

/// Context handed to a handler: the canonical method name and the service
/// to call it on.
pub struct Call<'a> {
    api: &'a dyn RemoteService,
    resource: &'static str,
    method: String,
}

impl Call<'_> {
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Call this command's own method.
    pub fn send<T: Serialize>(&self, request: &T) -> Result<Value, DispatchError> {
        self.send_to(&self.method, request)
    }

    /// Call another method on the same service (`search.all` fans out).
    pub fn send_to<T: Serialize>(&self, method: &str, request: &T) -> Result<Value, DispatchError> {
        let args = ApiArgs::from_request(request)?;
        debug!(method, fields = args.fields().len(), "calling remote method");
        self.api.call(method, &args).map_err(|e| {
            debug!(method, error = %e, "remote method failed");
            DispatchError::from(e)
        })
    }
}

/// Routes commands to handlers and runs them against one remote service.
pub struct Dispatcher<'a> {
    api: &'a dyn RemoteService,
}

impl<'a> Dispatcher<'a> {
    pub fn new(api: &'a dyn RemoteService) -> Self {
        Self { api }
    }

    pub fn dispatch(&self, command: &str, params: &ParameterMap) -> HandlerResult {
        let (resource, action) = split_command(command)?;

        let table = ROUTING
            .get(&resource.to_ascii_lowercase())
            .ok_or_else(|| DispatchError::UnsupportedResource(resource.to_string()))?;
        let route = table.actions.get(&action.to_ascii_lowercase()).ok_or_else(|| {
            DispatchError::UnsupportedAction {
                resource: resource.to_string(),
                action: action.to_string(),
            }
        })?;

        let call = Call {
            api: self.api,
            resource: table.name,
            method: format!("{}.{}", table.name, route.action),
        };
        debug!(command = %call.method, params = params.len(), "dispatching");
        (route.handler)(&call, &ParamReader::new(params))
    }
}

/// A request struct built from raw parameters.
pub(crate) trait FromParams: Sized + Serialize {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError>;
}

/// Send the request and print the payload as returned.
pub(crate) fn forward<T: FromParams>(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = T::from_params(p)?;
    Ok(Some(call.send(&request)?))
}

/// Send the request and print only the acknowledgement.
pub(crate) fn acknowledge<T: FromParams>(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = T::from_params(p)?;
    call.send(&request)?;
    Ok(None)
}

fn split_command(command: &str) -> Result<(&str, &str), DispatchError> {
    match command.split_once('.') {
        Some((resource, action))
            if !resource.is_empty() && !action.is_empty() && !action.contains('.') =>
        {
            Ok((resource, action))
        }
        _ => Err(DispatchError::MalformedCommand(command.to_string())),
    }
}

/// Keep only `keys` from a payload, in that order. Missing keys become null
/// so every command of a kind prints the same shape.
pub(crate) fn pick(payload: &Value, keys: &[&str]) -> Value {
    let mut out = Map::new();
    for key in keys {
        out.insert(
            key.to_string(),
            payload.get(*key).cloned().unwrap_or(Value::Null),
        );
    }
    Value::Object(out)
}
