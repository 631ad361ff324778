use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use engine_logging::{engine_info, engine_warn};

use crate::client::BackendClient;
use crate::{BackendAction, EngineEvent, RequestId};

/// Receives engine events on the engine's worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Send {
        request_id: RequestId,
        action: BackendAction,
    },
}

/// Runs backend calls on a background tokio runtime.
///
/// Dropping the handle stops the worker and abandons requests still in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn BackendClient>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("cloudrag-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, sink.as_ref()).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn send(&self, request_id: RequestId, action: BackendAction) {
        if self
            .cmd_tx
            .send(EngineCommand::Send { request_id, action })
            .is_err()
        {
            engine_warn!("Engine worker is gone; request {} was not sent", request_id);
        }
    }
}

async fn handle_command(client: &dyn BackendClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Send { request_id, action } => {
            let started = Instant::now();
            let result = client.send(&action).await;
            let elapsed = started.elapsed();
            match &result {
                Ok(_) => engine_info!(
                    "{} {} request_id={} ok in {:?}",
                    action.method(),
                    action.path(),
                    request_id,
                    elapsed
                ),
                Err(err) => engine_warn!(
                    "{} {} request_id={} failed in {:?}: {}",
                    action.method(),
                    action.path(),
                    request_id,
                    elapsed,
                    err
                ),
            }
            sink.emit(EngineEvent::Completed { request_id, result });
        }
    }
}
