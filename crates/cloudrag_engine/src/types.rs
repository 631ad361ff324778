use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Id assigned by `cloudrag_core` when it dispatches; the same value as `cloudrag_core::RequestId`.
pub type RequestId = u64;

/// One backend call. Text-carrying variants are expected to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAction {
    Query { text: String },
    Agent { text: String },
    Refresh,
    Summary,
    Health,
    Errors,
}

#[derive(Serialize)]
struct QueryBody<'a> {
    q: &'a str,
}

#[derive(Serialize)]
struct AgentBody<'a> {
    query: &'a str,
}

impl BackendAction {
    pub fn method(&self) -> Method {
        match self {
            BackendAction::Query { .. } | BackendAction::Agent { .. } | BackendAction::Refresh => {
                Method::POST
            }
            BackendAction::Summary | BackendAction::Health | BackendAction::Errors => Method::GET,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            BackendAction::Query { .. } => "/query",
            BackendAction::Agent { .. } => "/agent",
            BackendAction::Refresh => "/refresh",
            BackendAction::Summary => "/summary",
            BackendAction::Health => "/health",
            BackendAction::Errors => "/errors",
        }
    }

    /// JSON request body; `None` for actions that send no body.
    pub fn body(&self) -> Option<String> {
        let body = match self {
            BackendAction::Query { text } => serde_json::to_string(&QueryBody { q: text }),
            BackendAction::Agent { text } => serde_json::to_string(&AgentBody { query: text }),
            _ => return None,
        };
        body.ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Completed {
        request_id: RequestId,
        result: Result<Value, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request failed: {kind} ({message})")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    InvalidBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidBody => write!(f, "invalid json body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
