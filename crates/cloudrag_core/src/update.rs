use crate::{AppState, Effect, Msg, Request};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::QuerySubmitted => match Request::query(state.input()) {
            Some(request) => dispatch(&mut state, request),
            None => reject_blank(&mut state),
        },
        Msg::AgentSubmitted => match Request::agent(state.input()) {
            Some(request) => dispatch(&mut state, request),
            None => reject_blank(&mut state),
        },
        Msg::RefreshClicked => dispatch(&mut state, Request::Refresh),
        Msg::SummaryClicked => dispatch(&mut state, Request::Summary),
        Msg::HealthClicked => dispatch(&mut state, Request::Health),
        Msg::ErrorsClicked => dispatch(&mut state, Request::Errors),
        Msg::ActionCompleted {
            request_id,
            finished_at,
            outcome,
        } => {
            state.complete(request_id, finished_at, outcome);
            Vec::new()
        }
    };

    (state, effects)
}

/// Single-flight: a trigger while a request is outstanding is ignored.
fn dispatch(state: &mut AppState, request: Request) -> Vec<Effect> {
    if state.is_loading() {
        return Vec::new();
    }
    let request_id = state.begin(request.kind());
    vec![Effect::Dispatch {
        request_id,
        request,
    }]
}

fn reject_blank(state: &mut AppState) -> Vec<Effect> {
    if !state.is_loading() {
        state.set_notice("Type a question first.");
    }
    Vec::new()
}
