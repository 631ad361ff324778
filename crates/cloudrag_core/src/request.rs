use std::fmt;

/// Dispatch id, passed unchanged to `cloudrag_engine` as its `RequestId`.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Query,
    Agent,
    Refresh,
    Summary,
    Health,
    Errors,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionKind::Query => "query",
            ActionKind::Agent => "agent",
            ActionKind::Refresh => "refresh",
            ActionKind::Summary => "summary",
            ActionKind::Health => "health",
            ActionKind::Errors => "errors",
        };
        f.write_str(label)
    }
}

/// One user action, ready to be sent to the backend.
///
/// Text-carrying variants are only constructed through [`Request::query`] and
/// [`Request::agent`], which guarantee the text is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Query { text: String },
    Agent { text: String },
    Refresh,
    Summary,
    Health,
    Errors,
}

impl Request {
    pub fn query(text: &str) -> Option<Self> {
        non_empty(text).map(|text| Request::Query { text })
    }

    pub fn agent(text: &str) -> Option<Self> {
        non_empty(text).map(|text| Request::Agent { text })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Request::Query { .. } => ActionKind::Query,
            Request::Agent { .. } => ActionKind::Agent,
            Request::Refresh => ActionKind::Refresh,
            Request::Summary => ActionKind::Summary,
            Request::Health => ActionKind::Health,
            Request::Errors => ActionKind::Errors,
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
