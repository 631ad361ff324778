use serde_json::Value;

use crate::{ActionKind, ActiveResult, Phase, QueryAnswer, RefreshReport};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    /// False while a request is in flight; the shell must not accept new actions.
    pub controls_enabled: bool,
    pub pending: Option<ActionKind>,
    pub input: String,
    pub error: Option<String>,
    pub result: ResultView,
    /// Validation feedback that is not an error state (e.g. blank question).
    pub notice: Option<String>,
    pub finished_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultView {
    #[default]
    Empty,
    Answer(QueryAnswer),
    /// The query succeeded but carried no structured answer.
    NoAnswer,
    Refresh {
        report: Option<RefreshReport>,
        raw: Value,
    },
    Raw {
        kind: ActionKind,
        body: Value,
    },
}

impl ResultView {
    pub(crate) fn from_active(active: &ActiveResult) -> Self {
        match active {
            ActiveResult::None => ResultView::Empty,
            ActiveResult::Query(Some(answer)) => ResultView::Answer(answer.clone()),
            ActiveResult::Query(None) => ResultView::NoAnswer,
            ActiveResult::Refresh(body) => ResultView::Refresh {
                report: RefreshReport::from_value(body),
                raw: body.clone(),
            },
            ActiveResult::Summary(body) => raw(ActionKind::Summary, body),
            ActiveResult::Health(body) => raw(ActionKind::Health, body),
            ActiveResult::Errors(body) => raw(ActionKind::Errors, body),
            ActiveResult::Agent(body) => raw(ActionKind::Agent, body),
        }
    }
}

fn raw(kind: ActionKind, body: &Value) -> ResultView {
    ResultView::Raw {
        kind,
        body: body.clone(),
    }
}
