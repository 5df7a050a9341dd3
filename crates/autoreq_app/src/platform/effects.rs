use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use autoreq_core::{Effect, FailureCategory, FailureReason, Msg};
use autoreq_engine::{AnalysisError, AtomicFileWriter, EngineEvent, EngineHandle, FailureKind};
use autoreq_logging::{autoreq_info, autoreq_warn};

use super::clipboard;
use super::config::Settings;

/// How long the forwarding thread blocks on the engine before looping.
const EVENT_POLL: Duration = Duration::from_millis(100);

/// Executes effects from the core and reports their outcomes back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    writer: AtomicFileWriter,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(settings: &Settings, msg_tx: mpsc::Sender<Msg>) -> Self {
        autoreq_info!("Analysis endpoint: {}", settings.client.endpoint);
        let engine = EngineHandle::new(settings.client.clone());
        let runner = Self {
            engine,
            writer: AtomicFileWriter::new(settings.output_dir.clone()),
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    request_id,
                    github_url,
                } => {
                    self.engine.submit(request_id, github_url);
                }
                Effect::CancelAnalysis { request_id } => {
                    self.engine.cancel(request_id);
                }
                Effect::CopyToClipboard { text } => {
                    let result = clipboard::copy_to_clipboard(&text).map_err(|err| {
                        autoreq_warn!("Clipboard copy failed: {:#}", err);
                        format!("{err:#}")
                    });
                    let _ = self.msg_tx.send(Msg::CopyFinished(result));
                }
                Effect::SaveManifest { text } => {
                    let result: Result<PathBuf, String> = self.writer.save(&text).map_err(|err| {
                        autoreq_warn!("Saving manifest failed: {}", err);
                        err.to_string()
                    });
                    let _ = self.msg_tx.send(Msg::SaveFinished(result));
                }
            }
        }
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || forward_events(|| engine.recv_timeout(EVENT_POLL), &msg_tx));
    }
}

/// Turns engine completions into messages until either channel hangs up.
fn forward_events(
    mut recv: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    msg_tx: &mpsc::Sender<Msg>,
) {
    loop {
        match recv() {
            Ok(event) => {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                autoreq_warn!("Engine event channel closed; no more results will arrive");
                break;
            }
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { request_id, result } => Msg::AnalysisResolved {
            request_id,
            outcome: result.map_err(map_failure),
        },
    }
}

fn map_failure(err: AnalysisError) -> FailureReason {
    let kind = match err.kind {
        FailureKind::HttpStatus(code) => FailureCategory::HttpStatus(code),
        FailureKind::Timeout => FailureCategory::Timeout,
        FailureKind::MalformedResponse | FailureKind::TooLarge { .. } => {
            FailureCategory::MalformedResponse
        }
        FailureKind::InvalidUrl | FailureKind::Network | FailureKind::Cancelled => {
            FailureCategory::Transport
        }
    };
    FailureReason::new(kind, err.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(result: Result<String, AnalysisError>) -> Msg {
        map_event(EngineEvent::AnalysisCompleted {
            request_id: 3,
            result,
        })
    }

    #[test]
    fn success_maps_to_resolved_manifest() {
        assert_eq!(
            completed(Ok("flask\n".into())),
            Msg::AnalysisResolved {
                request_id: 3,
                outcome: Ok("flask\n".into()),
            }
        );
    }

    #[test]
    fn failures_keep_status_code_and_message() {
        let err = AnalysisError {
            kind: FailureKind::HttpStatus(400),
            message: "Cloning failed".into(),
        };
        assert_eq!(
            completed(Err(err)),
            Msg::AnalysisResolved {
                request_id: 3,
                outcome: Err(FailureReason::new(
                    FailureCategory::HttpStatus(400),
                    "Cloning failed"
                )),
            }
        );
    }

    #[test]
    fn forwarding_stops_when_engine_hangs_up() {
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut replies = vec![
            Err(RecvTimeoutError::Disconnected),
            Ok(EngineEvent::AnalysisCompleted {
                request_id: 3,
                result: Ok("flask\n".into()),
            }),
            Err(RecvTimeoutError::Timeout),
        ];
        let mut calls = 0;
        forward_events(
            || {
                calls += 1;
                replies.pop().unwrap_or(Err(RecvTimeoutError::Disconnected))
            },
            &msg_tx,
        );

        assert_eq!(calls, 3);
        assert_eq!(
            msg_rx.try_iter().collect::<Vec<_>>(),
            vec![Msg::AnalysisResolved {
                request_id: 3,
                outcome: Ok("flask\n".into()),
            }]
        );
    }

    #[test]
    fn forwarding_stops_when_app_hangs_up() {
        let (msg_tx, msg_rx) = mpsc::channel();
        drop(msg_rx);
        let mut calls = 0;
        forward_events(
            || {
                calls += 1;
                Ok(EngineEvent::AnalysisCompleted {
                    request_id: 1,
                    result: Ok(String::new()),
                })
            },
            &msg_tx,
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn oversized_and_network_errors_are_categorized() {
        let too_large = AnalysisError {
            kind: FailureKind::TooLarge {
                max_bytes: 1,
                actual: Some(2),
            },
            message: String::new(),
        };
        assert_eq!(
            map_failure(too_large).kind,
            FailureCategory::MalformedResponse
        );
        let network = AnalysisError {
            kind: FailureKind::Network,
            message: "connection refused".into(),
        };
        assert_eq!(map_failure(network).kind, FailureCategory::Transport);
    }
}
