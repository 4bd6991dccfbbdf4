use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::error::DispatchError;

/// Raw `key=value` arguments of one command line. Sorted so that debug
/// output is stable.
pub type ParameterMap = BTreeMap<String, String>;

/// Build the parameter map from the tokens that follow the command word.
///
/// Each token is split on its first `=`; a bare token becomes a key with an
/// empty value. Later duplicates win.
pub fn extract_params<S: AsRef<str>>(tokens: &[S]) -> ParameterMap {
    let mut params = ParameterMap::new();
    for token in tokens {
        let token = token.as_ref();
        match token.split_once('=') {
            Some((key, value)) => {
                params.insert(key.to_string(), strip_quotes(value).to_string());
            }
            None => {
                params.insert(token.to_string(), String::new());
            }
        }
    }
    params
}

/// Remove one layer of matching `"` or `'` around a value.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// What an integer accessor does with a value that is not a base-10 number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPolicy {
    /// Fail the dispatch with `InvalidParameter`.
    Strict,
    /// Quietly use the default.
    Fallback,
}

/// Typed read access to a [`ParameterMap`].
#[derive(Debug, Clone, Copy)]
pub struct ParamReader<'a> {
    params: &'a ParameterMap,
}

impl<'a> ParamReader<'a> {
    pub fn new(params: &'a ParameterMap) -> Self {
        Self { params }
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        self.params
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn int(&self, key: &str, default: i64, policy: IntPolicy) -> Result<i64, DispatchError> {
        let Some(raw) = self.params.get(key) else {
            return Ok(default);
        };
        match raw.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) if policy == IntPolicy::Fallback => Ok(default),
            Err(e) => Err(DispatchError::InvalidParameter {
                key: key.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Only the literal `true` switches a flag on; anything else keeps the
    /// default.
    pub fn bool(&self, key: &str, default: bool) -> bool {
        match self.params.get(key).map(String::as_str) {
            Some("true") => true,
            _ => default,
        }
    }

    pub fn json<T: DeserializeOwned>(&self, key: &str, default: &str) -> Result<T, DispatchError> {
        let raw = self.params.get(key).map(String::as_str).unwrap_or(default);
        serde_json::from_str(raw).map_err(|e| DispatchError::InvalidStructuredParameter {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn map(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_strips_one_layer_of_quotes() {
        let params = extract_params(&["channel=C1", r#"text="hello world""#]);
        assert_eq!(params, map(&[("channel", "C1"), ("text", "hello world")]));

        let params = extract_params(&[r#"text=""quoted"""#, "name='x'"]);
        assert_eq!(params["text"], r#""quoted""#);
        assert_eq!(params["name"], "x");
    }

    #[test]
    fn test_extract_mismatched_quotes_are_kept() {
        let params = extract_params(&[r#"text="hello'"#, r#"a=""#]);
        assert_eq!(params["text"], r#""hello'"#);
        assert_eq!(params["a"], r#"""#);
    }

    #[test]
    fn test_extract_splits_on_first_equals_only() {
        let params = extract_params(&["query=a=b"]);
        assert_eq!(params["query"], "a=b");
    }

    #[test]
    fn test_extract_bare_token_maps_to_empty() {
        let params = extract_params(&["exclude_archived"]);
        assert_eq!(params, map(&[("exclude_archived", "")]));
    }

    #[test]
    fn test_extract_last_duplicate_wins() {
        let params = extract_params(&["user=U1", "user=U2"]);
        assert_eq!(params["user"], "U2");
    }

    #[test]
    fn test_string_accessor_default() {
        let params = map(&[("sort", "timestamp")]);
        let reader = ParamReader::new(&params);
        assert_eq!(reader.string("sort", "score"), "timestamp");
        assert_eq!(reader.string("sort_dir", "desc"), "desc");
    }

    #[test]
    fn test_bool_accessor_only_exact_true() {
        let params = map(&[("unfurl_links", "true")]);
        assert!(ParamReader::new(&params).bool("unfurl_links", false));

        for literal in ["1", "TRUE", "True", "yes", ""] {
            let params = map(&[("unfurl_links", literal)]);
            assert!(
                !ParamReader::new(&params).bool("unfurl_links", false),
                "{literal:?} should keep the default"
            );
        }
        let empty = ParameterMap::new();
        assert!(!ParamReader::new(&empty).bool("unfurl_links", false));
        assert!(ParamReader::new(&empty).bool("unfurl_links", true));
    }

    #[test]
    fn test_int_accessor_fallback_returns_default() {
        let params = map(&[("highlight", "yes")]);
        let reader = ParamReader::new(&params);
        assert_eq!(reader.int("highlight", 0, IntPolicy::Fallback), Ok(0));
    }

    #[test]
    fn test_int_accessor_strict_fails() {
        let params = map(&[("count", "ten")]);
        let reader = ParamReader::new(&params);
        match reader.int("count", 100, IntPolicy::Strict) {
            Err(DispatchError::InvalidParameter { key, value, .. }) => {
                assert_eq!(key, "count");
                assert_eq!(value, "ten");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_int_accessor_parses_and_defaults() {
        let params = map(&[("count", "25")]);
        let reader = ParamReader::new(&params);
        assert_eq!(reader.int("count", 100, IntPolicy::Strict), Ok(25));
        assert_eq!(reader.int("page", 1, IntPolicy::Strict), Ok(1));
    }

    #[test]
    fn test_json_accessor() {
        let params = map(&[("attachments", r#"[{"text":"hi"}]"#)]);
        let reader = ParamReader::new(&params);
        let value: Vec<Value> = reader.json("attachments", "[]").unwrap();
        assert_eq!(value.len(), 1);

        let empty = ParameterMap::new();
        let value: Vec<Value> = ParamReader::new(&empty).json("attachments", "[]").unwrap();
        assert!(value.is_empty());

        let bad = map(&[("attachments", "[{")]);
        let err = ParamReader::new(&bad)
            .json::<Vec<Value>>("attachments", "[]")
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::InvalidStructuredParameter { .. }
        ));
    }
}
