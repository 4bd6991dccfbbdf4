//! `search.*`. All three actions share one argument set.

use serde::Serialize;
use serde_json::json;

use super::{Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::{IntPolicy, ParamReader};

pub(crate) const ROUTES: &[Route] = &[
    Route::new("all", all),
    Route::new("files", files),
    Route::new("messages", messages),
];

#[derive(Debug, Serialize, PartialEq)]
struct SearchArgs {
    query: String,
    /// `score` or `timestamp`.
    sort: String,
    /// `asc` or `desc`.
    sort_dir: String,
    highlight: bool,
    count: i64,
    page: i64,
}

impl FromParams for SearchArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            query: p.string("query", ""),
            sort: p.string("sort", "score"),
            sort_dir: p.string("sort_dir", "desc"),
            highlight: p.int("highlight", 0, IntPolicy::Fallback)? == 1,
            count: p.int("count", 100, IntPolicy::Strict)?,
            page: p.int("page", 1, IntPolicy::Strict)?,
        })
    }
}

/// Messages and files are fetched with two separate calls; either failing
/// fails the command.
fn all(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = SearchArgs::from_params(p)?;
    let messages = call.send_to("search.messages", &request)?;
    let files = call.send_to("search.files", &request)?;
    Ok(Some(json!({
        "query": request.query,
        "messages": messages.get("messages").cloned().unwrap_or_default(),
        "files": files.get("files").cloned().unwrap_or_default(),
    })))
}

fn files(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = SearchArgs::from_params(p)?;
    let payload = call.send(&request)?;
    Ok(Some(json!({
        "query": request.query,
        "files": payload.get("files").cloned().unwrap_or_default(),
    })))
}

fn messages(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = SearchArgs::from_params(p)?;
    let payload = call.send(&request)?;
    Ok(Some(json!({
        "query": request.query,
        "messages": payload.get("messages").cloned().unwrap_or_default(),
    })))
}
