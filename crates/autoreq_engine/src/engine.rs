use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use autoreq_logging::{autoreq_debug, autoreq_error, autoreq_info};
use tokio_util::sync::CancellationToken;

use crate::client::{AnalysisClient, ClientSettings, ReqwestAnalysisClient};
use crate::{AnalysisError, EngineEvent, FailureKind, RequestId};

enum EngineCommand {
    Submit {
        request_id: RequestId,
        github_url: String,
    },
    Cancel {
        request_id: RequestId,
    },
}

type PendingRequests = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs analysis requests on a background tokio runtime.
///
/// Commands are accepted from any thread; completions are read back with
/// [`EngineHandle::try_recv`] or [`EngineHandle::recv_timeout`].
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestAnalysisClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn AnalysisClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_command_loop(client, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, request_id: RequestId, github_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            github_url: github_url.into(),
        });
    }

    /// Aborts an outstanding request; it then completes as `Cancelled`.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Waits up to `timeout` for the next completion.
    ///
    /// `Disconnected` means the engine thread is gone and no further events
    /// will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }
}

fn run_command_loop(
    client: Arc<dyn AnalysisClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            autoreq_error!("Failed to start engine runtime: {}", err);
            fail_all_commands(cmd_rx, &event_tx, &err.to_string());
            return;
        }
    };
    let pending: PendingRequests = Arc::new(Mutex::new(HashMap::new()));

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Submit {
                request_id,
                github_url,
            } => {
                let token = CancellationToken::new();
                if let Ok(mut map) = pending.lock() {
                    map.insert(request_id, token.clone());
                }
                let client = client.clone();
                let event_tx = event_tx.clone();
                let pending = pending.clone();
                runtime.spawn(async move {
                    let result = tokio::select! {
                        result = client.analyze(&github_url) => result,
                        () = token.cancelled() => {
                            Err(AnalysisError::new(FailureKind::Cancelled, "superseded"))
                        }
                    };
                    if let Ok(mut map) = pending.lock() {
                        map.remove(&request_id);
                    }
                    autoreq_info!(
                        "Request {} finished: {}",
                        request_id,
                        match &result {
                            Ok(_) => "ok".to_string(),
                            Err(err) => err.to_string(),
                        }
                    );
                    let _ = event_tx.send(EngineEvent::AnalysisCompleted { request_id, result });
                });
            }
            EngineCommand::Cancel { request_id } => {
                let token = pending
                    .lock()
                    .ok()
                    .and_then(|mut map| map.remove(&request_id));
                match token {
                    Some(token) => token.cancel(),
                    None => autoreq_debug!("Cancel for unknown request {}", request_id),
                }
            }
        }
    }
}

/// Without a runtime nothing can run; answer every submission with a failure
/// so callers never wait forever.
fn fail_all_commands(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: &mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(command) = cmd_rx.recv() {
        if let EngineCommand::Submit { request_id, .. } = command {
            let _ = event_tx.send(EngineEvent::AnalysisCompleted {
                request_id,
                result: Err(AnalysisError::new(FailureKind::Network, reason)),
            });
        }
    }
}
