//! `channels.*` and `groups.*`. Both resources take the same arguments and
//! differ only in the method prefix, which comes from the [`Call`].

use serde::Serialize;

use super::{acknowledge, forward, pick, Call, FromParams, HandlerResult, Route};
use crate::error::DispatchError;
use crate::params::{IntPolicy, ParamReader};

pub(crate) const ROUTES: &[Route] = &[
    Route::new("archive", acknowledge::<ChannelArgs>),
    Route::new("create", forward::<NameArgs>),
    Route::new("history", forward::<HistoryArgs>),
    Route::new("info", forward::<ChannelArgs>),
    Route::new("invite", forward::<MemberArgs>),
    Route::new("join", forward::<NameArgs>),
    Route::new("kick", acknowledge::<MemberArgs>),
    Route::new("leave", acknowledge::<ChannelArgs>),
    Route::new("list", list),
    Route::new("mark", acknowledge::<MarkArgs>),
    Route::new("rename", forward::<RenameArgs>),
    Route::new("setPurpose", forward::<PurposeArgs>),
    Route::new("setTopic", forward::<TopicArgs>),
    Route::new("unarchive", acknowledge::<ChannelArgs>),
];

/// Private channels have no `join`, but can be closed, opened and forked.
pub(crate) const GROUP_ROUTES: &[Route] = &[
    Route::new("archive", acknowledge::<ChannelArgs>),
    Route::new("close", close),
    Route::new("create", forward::<NameArgs>),
    Route::new("createChild", forward::<ChannelArgs>),
    Route::new("history", forward::<HistoryArgs>),
    Route::new("invite", forward::<MemberArgs>),
    Route::new("kick", acknowledge::<MemberArgs>),
    Route::new("leave", acknowledge::<ChannelArgs>),
    Route::new("list", list),
    Route::new("mark", acknowledge::<MarkArgs>),
    Route::new("open", open),
    Route::new("rename", forward::<RenameArgs>),
    Route::new("setPurpose", forward::<PurposeArgs>),
    Route::new("setTopic", forward::<TopicArgs>),
    Route::new("unarchive", acknowledge::<ChannelArgs>),
];

fn list(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let request = ListArgs::from_params(p)?;
    let payload = call.send(&request)?;
    // The list lives under the resource's own name: `channels` or `groups`.
    Ok(Some(pick(&payload, &[call.resource()])))
}

fn close(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&ChannelArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["no_op", "already_closed"])))
}

fn open(call: &Call<'_>, p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&ChannelArgs::from_params(p)?)?;
    Ok(Some(pick(&payload, &["no_op", "already_open"])))
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ChannelArgs {
    pub channel: String,
}

impl FromParams for ChannelArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct NameArgs {
    pub name: String,
}

impl FromParams for NameArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            name: p.string("name", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct MemberArgs {
    pub channel: String,
    pub user: String,
}

impl FromParams for MemberArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            user: p.string("user", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct MarkArgs {
    pub channel: String,
    pub ts: String,
}

impl FromParams for MarkArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            ts: p.string("ts", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct RenameArgs {
    pub channel: String,
    pub name: String,
}

impl FromParams for RenameArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            name: p.string("name", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct PurposeArgs {
    pub channel: String,
    pub purpose: String,
}

impl FromParams for PurposeArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            purpose: p.string("purpose", ""),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct TopicArgs {
    pub channel: String,
    pub topic: String,
}

impl FromParams for TopicArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            topic: p.string("topic", ""),
        })
    }
}

/// `latest` empty means now; `oldest` defaults to the epoch.
#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct HistoryArgs {
    pub channel: String,
    pub latest: String,
    pub oldest: String,
    pub count: i64,
}

impl FromParams for HistoryArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            channel: p.string("channel", ""),
            latest: p.string("latest", ""),
            oldest: p.string("oldest", "0"),
            count: p.int("count", 100, IntPolicy::Strict)?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct ListArgs {
    pub exclude_archived: bool,
}

impl FromParams for ListArgs {
    fn from_params(p: &ParamReader<'_>) -> Result<Self, DispatchError> {
        Ok(Self {
            exclude_archived: p.bool("exclude_archived", false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{params, FakeApi};
    use super::super::Dispatcher;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_defaults() {
        let api = FakeApi::new().respond(
            "channels.history",
            json!({"messages": [], "has_more": false}),
        );
        let result = Dispatcher::new(&api)
            .dispatch("channels.history", &params(&[("channel", "C1")]))
            .unwrap();
        assert_eq!(result, Some(json!({"messages": [], "has_more": false})));

        let (method, args) = api.single_call();
        assert_eq!(method, "channels.history");
        assert_eq!(args.get("channel"), Some("C1"));
        assert_eq!(args.get("latest"), None);
        assert_eq!(args.get("oldest"), Some("0"));
        assert_eq!(args.get("count"), Some("100"));
    }

    #[test]
    fn test_history_rejects_non_numeric_count() {
        let api = FakeApi::new();
        let result = Dispatcher::new(&api).dispatch(
            "groups.history",
            &params(&[("channel", "G1"), ("count", "lots")]),
        );
        assert!(matches!(
            result,
            Err(DispatchError::InvalidParameter { ref key, .. }) if key == "count"
        ));
        assert!(api.calls().is_empty(), "no remote call on bad input");
    }

    #[test]
    fn test_archive_is_acknowledged_without_payload() {
        let api = FakeApi::new();
        let result = Dispatcher::new(&api)
            .dispatch("channels.archive", &params(&[("channel", "C1")]))
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(api.single_call().0, "channels.archive");
    }

    #[test]
    fn test_list_picks_resource_named_field() {
        let api = FakeApi::new()
            .respond(
                "channels.list",
                json!({"channels": [{"id": "C1"}], "response_metadata": {}}),
            )
            .respond("groups.list", json!({"groups": [{"id": "G1"}]}));
        let dispatcher = Dispatcher::new(&api);

        let channels = dispatcher
            .dispatch("channels.list", &params(&[("exclude_archived", "true")]))
            .unwrap();
        assert_eq!(channels, Some(json!({"channels": [{"id": "C1"}]})));

        let groups = dispatcher.dispatch("groups.list", &params(&[])).unwrap();
        assert_eq!(groups, Some(json!({"groups": [{"id": "G1"}]})));

        let calls = api.calls();
        assert_eq!(calls[0].1.get("exclude_archived"), Some("true"));
        assert_eq!(calls[1].1.get("exclude_archived"), Some("false"));
    }

    #[test]
    fn test_group_close_and_open_shapes() {
        let api = FakeApi::new()
            .respond("groups.close", json!({"no_op": true, "already_closed": true}))
            .respond("groups.open", json!({"no_op": false, "already_open": false}));
        let dispatcher = Dispatcher::new(&api);

        assert_eq!(
            dispatcher
                .dispatch("groups.close", &params(&[("channel", "G1")]))
                .unwrap(),
            Some(json!({"no_op": true, "already_closed": true}))
        );
        assert_eq!(
            dispatcher
                .dispatch("groups.open", &params(&[("channel", "G1")]))
                .unwrap(),
            Some(json!({"no_op": false, "already_open": false}))
        );
    }

    #[test]
    fn test_channels_have_no_close() {
        let api = FakeApi::new();
        assert!(matches!(
            Dispatcher::new(&api).dispatch("channels.close", &params(&[])),
            Err(DispatchError::UnsupportedAction { .. })
        ));
    }

    #[test]
    fn test_set_topic_sends_both_fields() {
        let api = FakeApi::new().respond("channels.setTopic", json!({"topic": "release day"}));
        let result = Dispatcher::new(&api)
            .dispatch(
                "channels.settopic",
                &params(&[("channel", "C1"), ("topic", "release day")]),
            )
            .unwrap();
        assert_eq!(result, Some(json!({"topic": "release day"})));

        let (method, args) = api.single_call();
        assert_eq!(method, "channels.setTopic");
        assert_eq!(args.get("topic"), Some("release day"));
    }
}
