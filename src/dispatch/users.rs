//! `users.*`.

use serde::Serialize;

use super::{acknowledge, forward, pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::ParamReader;

pub(crate) const ROUTES: &[Route] = &[
    Route::new("getPresence", forward::<UserArgs>),
    Route::new("info", forward::<UserArgs>),
    Route::new("list", list),
    Route::new("setActive", set_active),
    Route::new("setPresence", acknowledge::<PresenceArgs>),
];

#[derive(Debug, Serialize, PartialEq)]
struct UserArgs {
    user: String,
}

impl FromParams for UserArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            user: p.string("user", ""),
        })
    }
}

/// `auto` or `away`; the API validates the value.
#[derive(Debug, Serialize, PartialEq)]
struct PresenceArgs {
    presence: String,
}

impl FromParams for PresenceArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            presence: p.string("presence", ""),
        })
    }
}

fn list(call: &Call<'_>, _p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&())?;
    Ok(Some(pick(&payload, &["members"])))
}

fn set_active(call: &Call<'_>, _p: &ParamReader<'_>) -> HandlerResult {
    call.send(&())?;
    Ok(None)
}
