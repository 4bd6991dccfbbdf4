//! `files.*`.

use serde::Serialize;
use std::path::Path;

use super::{forward, pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::{IntPolicy, ParamReader};

pub(crate) const ROUTES: &[Route] = &[
    Route::new("info", forward::<InfoArgs>),
    Route::new("list", list),
    Route::new("upload", upload),
];

#[derive(Debug, Serialize, PartialEq)]
struct InfoArgs {
    file: String,
    count: i64,
    page: i64,
}

impl FromParams for InfoArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            file: p.string("file", ""),
            count: p.int("count", 100, IntPolicy::Strict)?,
            page: p.int("page", 1, IntPolicy::Strict)?,
        })
    }
}

/// `types` is a comma separated filter such as `images,pdfs`.
#[derive(Debug, Serialize, PartialEq)]
struct ListArgs {
    user: String,
    ts_from: String,
    ts_to: String,
    types: String,
    count: i64,
    page: i64,
}

impl FromParams for ListArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            user: p.string("user", ""),
            ts_from: p.string("ts_from", "0"),
            ts_to: p.string("ts_to", ""),
            types: p.string("types", "all"),
            count: p.int("count", 100, IntPolicy::Strict)?,
            page: p.int("page", 1, IntPolicy::Strict)?,
        })
    }
}

fn list(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&ListArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["files", "paging"])))
}

#[derive(Debug, Serialize, PartialEq)]
struct UploadArgs {
    content: String,
    filetype: String,
    filename: String,
    title: String,
    initial_comment: String,
    /// Comma separated channel ids to share the file into.
    channels: String,
}

impl FromParams for UploadArgs {
    /// A local `file` is read as text and sent as `content`, named after
    /// the file unless `filename` says otherwise.
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        let path = p.string("file", "");
        let (content, default_name) = if path.is_empty() {
            (p.string("content", ""), String::new())
        } else {
            let content =
                std::fs::read_to_string(&path).map_err(|e| DispatchError::InvalidParameter {
                    key: "file".into(),
                    value: path.clone(),
                    reason: e.to_string(),
                })?;
            let name = Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (content, name)
        };

        Ok(Self {
            content,
            filetype: p.string("filetype", ""),
            filename: p.string("filename", &default_name),
            title: p.string("title", ""),
            initial_comment: p.string("initial_comment", ""),
            channels: p.string("channels", ""),
        })
    }
}

fn upload(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&UploadArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["file"])))
}
