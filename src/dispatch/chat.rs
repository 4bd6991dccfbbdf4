//! `chat.*`: posting, editing and deleting messages.

use serde::Serialize;
use serde_json::Value;

use super::{pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::{IntPolicy, ParamReader};

pub(crate) const ROUTES: &[Route] = &[
    Route::new("delete", delete),
    Route::new("postMessage", post_message),
    Route::new("update", update),
];

#[derive(Debug, Serialize, PartialEq)]
struct DeleteArgs {
    channel: String,
    ts: String,
}

impl FromParams for DeleteArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            ts: p.string("ts", ""),
        })
    }
}

fn delete(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&DeleteArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["channel", "ts"])))
}

/// Every option `chat.postMessage` understands from the command line.
#[derive(Debug, Serialize, PartialEq)]
struct PostMessageArgs {
    channel: String,
    text: String,
    username: String,
    parse: String,
    /// `1` turns `@name` and `#channel` into links.
    link_names: i64,
    attachments: Vec<Value>,
    unfurl_links: bool,
    unfurl_media: bool,
    icon_url: String,
    icon_emoji: String,
}

impl FromParams for PostMessageArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            text: p.string("text", ""),
            username: p.string("username", ""),
            parse: p.string("parse", ""),
            link_names: p.int("link_names", 0, IntPolicy::Fallback)?,
            attachments: p.json("attachments", "[]")?,
            unfurl_links: p.bool("unfurl_links", false),
            unfurl_media: p.bool("unfurl_media", false),
            icon_url: p.string("icon_url", ""),
            icon_emoji: p.string("icon_emoji", ""),
        })
    }
}

fn post_message(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&PostMessageArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["channel", "ts"])))
}

#[derive(Debug, Serialize, PartialEq)]
struct UpdateArgs {
    channel: String,
    ts: String,
    text: String,
}

impl FromParams for UpdateArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            ts: p.string("ts", ""),
            text: p.string("text", ""),
        })
    }
}

fn update(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&UpdateArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["channel", "ts", "text"])))
}
