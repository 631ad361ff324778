//! CloudRAG core: pure state machine, response normalizer and view-model helpers.
mod effect;
mod msg;
mod normalize;
mod report;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ActionOutcome, Msg};
pub use normalize::{normalize, normalize_text, QueryAnswer, NO_ANSWER};
pub use report::RefreshReport;
pub use request::{ActionKind, Request, RequestId};
pub use state::{ActiveResult, AppState, Phase, ViewEvent, ViewState};
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
