use thiserror::Error;

use crate::remote::RemoteError;

/// Everything that can go wrong between a tokenized line and a rendered
/// result. None of these end the shell; each is printed as one line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("cmd must be resource.action format, not {0}")]
    MalformedCommand(String),

    #[error("{0} has not been supported")]
    UnsupportedResource(String),

    #[error("invalid {resource} action {action}")]
    UnsupportedAction { resource: String, action: String },

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidParameter {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{key} is not valid json: {reason}")]
    InvalidStructuredParameter { key: String, reason: String },

    #[error("{0}")]
    RemoteCallFailed(String),
}

impl From<RemoteError> for DispatchError {
    fn from(err: RemoteError) -> Self {
        match err {
            // Slack error codes are passed through untouched.
            RemoteError::Api(code) => DispatchError::RemoteCallFailed(code),
            other => DispatchError::RemoteCallFailed(other.to_string()),
        }
    }
}
