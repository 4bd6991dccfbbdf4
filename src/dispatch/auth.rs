//! `auth.test`: who does this token belong to.

use super::{Call, HandlerResult, Route};
use crate::params::ParamReader;

pub(crate) const ROUTES: &[Route] = &[Route::new("test", test)];

fn test(call: &Call<'_>, _p: &ParamReader<'_>) -> HandlerResult {
    Ok(Some(call.send(&())?))
}

#[cfg(test)]
mod tests {
    use super::super::testing::{params, FakeApi};
    use super::super::Dispatcher;
    use crate::error::DispatchError;
    use serde_json::json;

    #[test]
    fn test_auth_test_returns_identity() {
        let api = FakeApi::new().respond(
            "auth.test",
            json!({"url": "https://acme.slack.com/", "team": "Acme", "user": "bot", "user_id": "U1"}),
        );
        let result = Dispatcher::new(&api)
            .dispatch("auth.test", &params(&[]))
            .unwrap();
        assert_eq!(
            result,
            Some(json!({"url": "https://acme.slack.com/", "team": "Acme", "user": "bot", "user_id": "U1"}))
        );
    }

    #[test]
    fn test_auth_test_not_authed() {
        let api = FakeApi::new().fail("auth.test", "not_authed");
        assert_eq!(
            Dispatcher::new(&api).dispatch("Auth.Test", &params(&[])),
            Err(DispatchError::RemoteCallFailed("not_authed".into()))
        );
    }
}
