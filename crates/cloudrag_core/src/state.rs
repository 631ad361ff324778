use serde_json::Value;

use crate::view_model::{AppViewModel, ResultView};
use crate::{normalize, ActionKind, ActionOutcome, QueryAnswer, RequestId};

/// The single populated result slot, one per action family.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActiveResult {
    #[default]
    None,
    Refresh(Value),
    Query(Option<QueryAnswer>),
    Summary(Value),
    Health(Value),
    Errors(Value),
    Agent(Value),
}

impl ActiveResult {
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveResult::None)
    }

    /// Route a successful reply body into the slot for `kind`.
    ///
    /// Only query replies are normalized; every other body is kept verbatim.
    pub fn from_body(kind: ActionKind, body: Value) -> Self {
        match kind {
            ActionKind::Query => ActiveResult::Query(normalize(body.get("result"))),
            ActionKind::Agent => ActiveResult::Agent(body),
            ActionKind::Refresh => ActiveResult::Refresh(body),
            ActionKind::Summary => ActiveResult::Summary(body),
            ActionKind::Health => ActiveResult::Health(body),
            ActionKind::Errors => ActiveResult::Errors(body),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Started,
    Succeeded(ActiveResult),
    Failed(String),
}

/// What the presentation shell displays: loading flag, error, one result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub loading: bool,
    pub error: Option<String>,
    pub active: ActiveResult,
}

impl ViewState {
    /// Pure transition function. Every event replaces both the error and the
    /// result, so a terminal state never carries data from an earlier cycle.
    pub fn transition(self, event: ViewEvent) -> Self {
        match event {
            ViewEvent::Started => Self {
                loading: true,
                error: None,
                active: ActiveResult::None,
            },
            ViewEvent::Succeeded(active) => Self {
                loading: false,
                error: None,
                active,
            },
            ViewEvent::Failed(message) => Self {
                loading: false,
                error: Some(message),
                active: ActiveResult::None,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if !self.active.is_none() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    view: ViewState,
    input: String,
    in_flight: Option<InFlight>,
    last_request_id: RequestId,
    notice: Option<String>,
    finished_at: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.view.loading
    }

    /// Id of the outstanding request, if any.
    pub fn pending_request_id(&self) -> Option<RequestId> {
        self.in_flight.map(|flight| flight.request_id)
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.view.phase();
        AppViewModel {
            phase,
            controls_enabled: phase != Phase::Loading,
            pending: self.in_flight.map(|flight| flight.kind),
            input: self.input.clone(),
            error: self.view.error.clone(),
            result: ResultView::from_active(&self.view.active),
            notice: self.notice.clone(),
            finished_at: self.finished_at.clone(),
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.dirty = true;
    }

    /// Enter `Loading` for a new request and return its id.
    pub(crate) fn begin(&mut self, kind: ActionKind) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight = Some(InFlight { request_id, kind });
        self.view = std::mem::take(&mut self.view).transition(ViewEvent::Started);
        self.notice = None;
        self.finished_at = None;
        self.dirty = true;
        request_id
    }

    /// Leave `Loading` with the outcome of the in-flight request.
    ///
    /// Completions for any other request id are dropped.
    pub(crate) fn complete(
        &mut self,
        request_id: RequestId,
        finished_at: Option<String>,
        outcome: ActionOutcome,
    ) {
        let flight = match self.in_flight {
            Some(flight) if flight.request_id == request_id => flight,
            _ => return,
        };
        self.in_flight = None;

        let event = match outcome {
            Ok(body) => ViewEvent::Succeeded(ActiveResult::from_body(flight.kind, body)),
            Err(message) => ViewEvent::Failed(message),
        };
        self.view = std::mem::take(&mut self.view).transition(event);
        self.finished_at = finished_at;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn started_clears_previous_error_and_result() {
        let failed = ViewState::default().transition(ViewEvent::Failed("boom".into()));
        assert_eq!(failed.phase(), Phase::Failed);

        let loading = failed.transition(ViewEvent::Started);
        assert_eq!(loading, ViewState { loading: true, error: None, active: ActiveResult::None });
        assert_eq!(loading.phase(), Phase::Loading);
    }

    #[test]
    fn failure_clears_result() {
        let succeeded = ViewState::default()
            .transition(ViewEvent::Succeeded(ActiveResult::Health(json!({"ok": true}))));
        assert_eq!(succeeded.phase(), Phase::Success);

        let failed = succeeded.transition(ViewEvent::Failed("x".into()));
        assert!(failed.active.is_none());
        assert!(!failed.loading);
    }

    #[test]
    fn success_with_null_answer_is_still_success() {
        let state = ViewState::default().transition(ViewEvent::Succeeded(ActiveResult::Query(None)));
        assert_eq!(state.phase(), Phase::Success);
        assert_eq!(state.error, None);
    }

    #[test]
    fn pending_request_id_follows_the_in_flight_request() {
        let mut state = AppState::new();
        assert_eq!(state.pending_request_id(), None);

        let first = state.begin(ActionKind::Health);
        assert_eq!(state.pending_request_id(), Some(first));

        state.complete(first + 1, None, Ok(json!({})));
        assert_eq!(state.pending_request_id(), Some(first));

        state.complete(first, None, Ok(json!({})));
        assert_eq!(state.pending_request_id(), None);
    }
}
