//! CloudRAG engine: backend HTTP client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{BackendClient, ClientSettings, ReqwestClient, DEFAULT_API_BASE};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{BackendAction, ClientError, EngineEvent, FailureKind, RequestId};
