//! Turns a dispatch outcome into the text printed after each command.

use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::dispatch::HandlerResult;

/// How results are printed.
#[derive(Debug, Clone)]
pub struct Renderer {
    indent: Vec<u8>,
    color: bool,
}

impl Renderer {
    pub fn new(indent: usize, color: bool) -> Self {
        Self {
            indent: vec![b' '; indent],
            color,
        }
    }

    /// Rendered response without the trailing newline.
    pub fn render(&self, outcome: &HandlerResult) -> String {
        match outcome {
            Ok(Some(value)) => self.pretty(value),
            Ok(None) => "ok".to_string(),
            Err(e) => {
                let prefix = if self.color {
                    "err:".red().bold().to_string()
                } else {
                    "err:".to_string()
                };
                format!("{prefix} {e}")
            }
        }
    }

    fn pretty(&self, value: &Value) -> String {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        match value.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use serde_json::json;

    #[test]
    fn test_result_is_indented_json() {
        let result = Ok(Some(json!({"channel": "C1", "ts": "123.45"})));
        let out = Renderer::new(4, false).render(&result);
        assert_eq!(out, "{\n    \"channel\": \"C1\",\n    \"ts\": \"123.45\"\n}");
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["channel"], "C1");
        assert_eq!(parsed["ts"], "123.45");
    }

    #[test]
    fn test_indent_is_configurable() {
        let out = Renderer::new(2, false).render(&Ok(Some(json!({"a": [1]}))));
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn test_void_success_is_ok() {
        assert_eq!(Renderer::new(4, false).render(&Ok(None)), "ok");
    }

    #[test]
    fn test_error_line() {
        let err = DispatchError::MalformedCommand("bogus".into());
        assert_eq!(
            Renderer::new(4, false).render(&Err(err)),
            "err: cmd must be resource.action format, not bogus"
        );
    }

    #[test]
    fn test_colored_error_keeps_message() {
        colored::control::set_override(true);
        let err = DispatchError::RemoteCallFailed("not_authed".into());
        let out = Renderer::new(4, true).render(&Err(err));
        assert!(out.contains("err:"));
        assert!(out.ends_with(" not_authed"));
    }
}
