use autoreq_logging::{autoreq_debug, autoreq_info, autoreq_warn};

use crate::{validate_repo_url, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(value) => {
            state.set_input(value);
            Vec::new()
        }
        Msg::InputCharTyped(ch) => {
            state.push_input_char(ch);
            Vec::new()
        }
        Msg::InputBackspace => {
            state.pop_input_char();
            Vec::new()
        }
        Msg::Submitted => match validate_repo_url(state.input()) {
            Ok(github_url) => {
                let (request_id, superseded) = state.begin_request();
                autoreq_info!("Submitting request_id={} url={}", request_id, github_url);
                let mut effects = Vec::with_capacity(2);
                if let Some(stale) = superseded {
                    autoreq_debug!("Request {} superseded by {}", stale, request_id);
                    effects.push(Effect::CancelAnalysis { request_id: stale });
                }
                effects.push(Effect::SubmitAnalysis {
                    request_id,
                    github_url,
                });
                effects
            }
            Err(hint) => {
                state.set_validation(hint);
                Vec::new()
            }
        },
        Msg::AnalysisResolved {
            request_id,
            outcome,
        } => {
            let failure = outcome.as_ref().err().cloned();
            if state.resolve(request_id, outcome) {
                match failure {
                    Some(reason) => autoreq_warn!("Request {} failed: {}", request_id, reason),
                    None => autoreq_info!(
                        "Request {} succeeded ({} bytes)",
                        request_id,
                        state.manifest().len()
                    ),
                }
            } else {
                autoreq_debug!("Discarding stale resolution for request {}", request_id);
            }
            Vec::new()
        }
        Msg::CopyClicked => manifest_effect(&state, |text| Effect::CopyToClipboard { text }),
        Msg::SaveClicked => manifest_effect(&state, |text| Effect::SaveManifest { text }),
        Msg::CopyFinished(result) => {
            state.set_notice(match result {
                Ok(()) => "Copied to clipboard".to_string(),
                Err(err) => format!("Copy failed: {err}"),
            });
            Vec::new()
        }
        Msg::SaveFinished(result) => {
            state.set_notice(match result {
                Ok(path) => format!("Saved to {}", path.display()),
                Err(err) => format!("Save failed: {err}"),
            });
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Emits an effect carrying the manifest verbatim, or nothing when it is empty.
fn manifest_effect(state: &AppState, make: impl FnOnce(String) -> Effect) -> Vec<Effect> {
    let manifest = state.manifest();
    if manifest.is_empty() {
        Vec::new()
    } else {
        vec![make(manifest.to_owned())]
    }
}
