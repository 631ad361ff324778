use crate::RequestId;

/// Decoded JSON body on success, display message on transport or HTTP failure.
pub type ActionOutcome = Result<serde_json::Value, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the question input.
    InputChanged(String),
    /// User submitted the current input as a log query.
    QuerySubmitted,
    /// User submitted the current input to the agent endpoint.
    AgentSubmitted,
    /// User asked the backend to pull and ingest logs.
    RefreshClicked,
    /// User requested the log summary.
    SummaryClicked,
    /// User requested the health report.
    HealthClicked,
    /// User requested the error log listing.
    ErrorsClicked,
    /// Engine finished a dispatched request.
    ActionCompleted {
        request_id: RequestId,
        finished_at: Option<String>,
        outcome: ActionOutcome,
    },
}
