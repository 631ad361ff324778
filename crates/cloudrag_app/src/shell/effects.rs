use std::sync::{mpsc, Arc};

use anyhow::Context;
use chrono::Utc;
use cloudrag_core::{Effect, Msg, Request};
use cloudrag_engine::{BackendAction, EngineEvent, EngineHandle, EventSink, ReqwestClient};
use engine_logging::engine_info;

use super::config::AppConfig;
use super::ShellEvent;

pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(config: &AppConfig, tx: mpsc::Sender<ShellEvent>) -> anyhow::Result<Self> {
        let client = ReqwestClient::new(config.client_settings())
            .with_context(|| format!("invalid backend address {:?}", config.api_base))?;
        let engine = EngineHandle::new(Arc::new(client), Arc::new(MsgSink { tx }))
            .context("failed to start request engine")?;
        Ok(Self { engine })
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch {
                    request_id,
                    request,
                } => {
                    engine_info!("Dispatch request_id={} kind={}", request_id, request.kind());
                    self.engine.send(request_id, map_request(request));
                }
            }
        }
    }
}

/// Feeds engine completions back into the shell loop as messages.
struct MsgSink {
    tx: mpsc::Sender<ShellEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self
            .tx
            .send(ShellEvent::Msg(completion_msg(event, Utc::now().to_rfc3339())));
    }
}

fn completion_msg(event: EngineEvent, finished_at: String) -> Msg {
    match event {
        EngineEvent::Completed { request_id, result } => Msg::ActionCompleted {
            request_id,
            finished_at: Some(finished_at),
            outcome: result.map_err(|err| err.to_string()),
        },
    }
}

fn map_request(request: Request) -> BackendAction {
    match request {
        Request::Query { text } => BackendAction::Query { text },
        Request::Agent { text } => BackendAction::Agent { text },
        Request::Refresh => BackendAction::Refresh,
        Request::Summary => BackendAction::Summary,
        Request::Health => BackendAction::Health,
        Request::Errors => BackendAction::Errors,
    }
}
