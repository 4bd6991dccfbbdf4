//! `emoji.list`.

use super::{pick, Call, HandlerResult, Route};
use crate::params::ParamReader;

pub(crate) const ROUTES: &[Route] = &[Route::new("list", list)];

fn list(call: &Call<'_>, _p: &ParamReader<'_>) -> HandlerResult {
    let payload = call.send(&())?;
    Ok(Some(pick(&payload, &["emoji"])))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{params, FakeApi};
    use super::super::Dispatcher;
    use serde_json::json;

    #[test]
    fn test_list_wraps_emoji_map() {
        let api = FakeApi::new().respond(
            "emoji.list",
            json!({"emoji": {"shipit": "alias:squirrel"}, "cache_ts": "1.0"}),
        );
        let result = Dispatcher::new(&api)
            .dispatch("emoji.list", &params(&[("ignored", "x")]))
            .unwrap();
        assert_eq!(result, Some(json!({"emoji": {"shipit": "alias:squirrel"}})));
        assert!(api.single_call().1.fields().is_empty());
    }
}
