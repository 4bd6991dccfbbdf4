//! `im.*`: direct message channels.

use serde::Serialize;
use serde_json::json;

use super::conversations::{ChannelArgs, HistoryArgs, MarkArgs};
use super::{acknowledge, forward, pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::ParamReader;

pub(crate) const ROUTES: &[Route] = &[
    Route::new("close", close),
    Route::new("history", forward::<HistoryArgs>),
    Route::new("list", list),
    Route::new("mark", acknowledge::<MarkArgs>),
    Route::new("open", open),
];

fn close(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&ChannelArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["no_op", "already_closed"])))
}

fn list(call: &Call<'_>, _p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&())?;
    Ok(Some(pick(&payload, &["ims"])))
}

#[derive(Debug, Serialize, PartialEq)]
struct OpenArgs {
    user: String,
}

impl FromParams for OpenArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            user: p.string("user", ""),
        })
    }
}

fn open(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&OpenArgs::from_params(p)?)?;
    Ok(Some(json!({
        "no_op": payload.get("no_op").cloned().unwrap_or_default(),
        "already_open": payload.get("already_open").cloned().unwrap_or_default(),
        "channel": {
            "id": payload.pointer("/channel/id").cloned().unwrap_or_default(),
        },
    })))
}
