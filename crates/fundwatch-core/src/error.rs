use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::FundCode;

/// Validation and contract errors exposed by `fundwatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fund code cannot be empty")]
    EmptyFundCode,
    #[error("fund code length {len} exceeds max {max}")]
    FundCodeTooLong { len: usize, max: usize },
    #[error("fund code contains invalid character '{ch}' at index {index}")]
    FundCodeInvalidChar { ch: char, index: usize },

    #[error("min_rise must be non-negative: {value}")]
    NegativeMinRise { value: String },
    #[error("max_fall must be non-positive: {value}")]
    PositiveMaxFall { value: String },

    #[error("max_concurrency must be greater than zero")]
    ZeroConcurrency,
}

/// Classification of a single fetch failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Connection, timeout or body read failure.
    Transport(String),
    /// Upstream answered with a non-2xx status.
    UpstreamStatus(u16),
    /// Body could not be decoded after JSONP unwrapping.
    Parse { message: String, body: String },
    /// The shared run deadline expired before the fetch completed.
    DeadlineExceeded,
    /// The raw identifier was rejected before dispatch.
    InvalidCode(ValidationError),
    /// The spawned fetch task panicked or was cancelled.
    TaskFailed(String),
}

impl Display for FetchErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "do request: {message}"),
            Self::UpstreamStatus(status) => write!(f, "upstream returned status {status}"),
            Self::Parse { message, body } => write!(f, "unmarshal: {message}, body:{body}"),
            Self::DeadlineExceeded => f.write_str("context deadline exceeded"),
            Self::InvalidCode(error) => write!(f, "invalid code: {error}"),
            Self::TaskFailed(message) => write!(f, "fetch task failed: {message}"),
        }
    }
}

/// Per-identifier fetch failure, always tagged with the code that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code:{code}: {kind}")]
pub struct FetchError {
    code: String,
    kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(code: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            code: code.into(),
            kind,
        }
    }

    pub fn transport(code: &FundCode, message: impl Into<String>) -> Self {
        Self::new(code.as_str(), FetchErrorKind::Transport(message.into()))
    }

    pub fn upstream_status(code: &FundCode, status: u16) -> Self {
        Self::new(code.as_str(), FetchErrorKind::UpstreamStatus(status))
    }

    pub fn parse(code: &FundCode, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(
            code.as_str(),
            FetchErrorKind::Parse {
                message: message.into(),
                body: body.into(),
            },
        )
    }

    pub fn deadline_exceeded(code: &FundCode) -> Self {
        Self::new(code.as_str(), FetchErrorKind::DeadlineExceeded)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }
}

/// Failure of a notification channel.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("empty title")]
    EmptyTitle,
    #[error("empty serverchan key")]
    MissingKey,
    #[error("webhook transport error: {0}")]
    Transport(String),
    #[error("server return {status}")]
    Status { status: u16, body: String },
    #[error("build email: {0}")]
    EmailBuild(String),
    #[error("send email: {source}, content:{content}")]
    Email {
        content: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_is_tagged_with_code() {
        let code = FundCode::parse("180012").expect("valid code");
        let error = FetchError::upstream_status(&code, 502);

        assert_eq!(error.to_string(), "code:180012: upstream returned status 502");
        assert_eq!(error.code(), "180012");
    }

    #[test]
    fn parse_error_keeps_offending_body() {
        let code = FundCode::parse("003095").expect("valid code");
        let error = FetchError::parse(&code, "expected value", "<html>");

        assert!(error.to_string().contains("body:<html>"));
    }
}
