//! `stars.list`.

use serde::Serialize;

use super::{pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::{IntPolicy, ParamReader};

pub(crate) const ROUTES: &[Route] = &[Route::new("list", list)];

/// An empty `user` means the token's own user.
#[derive(Debug, Serialize, PartialEq)]
struct StarsArgs {
    user: String,
    count: i64,
    page: i64,
}

impl FromParams for StarsArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            user: p.string("user", ""),
            count: p.int("count", 100, IntPolicy::Strict)?,
            page: p.int("page", 1, IntPolicy::Strict)?,
        })
    }
}

fn list(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&StarsArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["items", "paging"])))
}
