use crate::{Request, RequestId};

/// Work the shell must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `request` to the backend and report back with `Msg::ActionCompleted`.
    Dispatch {
        request_id: RequestId,
        request: Request,
    },
}
