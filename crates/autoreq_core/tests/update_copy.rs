use std::path::PathBuf;

use autoreq_core::{update, AppState, Effect, Msg};

fn with_manifest(manifest: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::InputChanged("https://github.com/acme/widget.git".into()),
    );
    let (state, _) = update(state, Msg::Submitted);
    let (state, _) = update(
        state,
        Msg::AnalysisResolved {
            request_id: 1,
            outcome: Ok(manifest.to_string()),
        },
    );
    state
}

#[test]
fn copy_without_result_is_noop() {
    let (_state, effects) = update(AppState::new(), Msg::CopyClicked);
    assert!(effects.is_empty());

    let (_state, effects) = update(with_manifest(""), Msg::CopyClicked);
    assert!(effects.is_empty());
}

#[test]
fn copy_emits_manifest_verbatim() {
    let (_state, effects) = update(with_manifest("flask\nrequests\n"), Msg::CopyClicked);
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "flask\nrequests\n".to_string()
        }]
    );
}

#[test]
fn copy_while_in_flight_is_noop() {
    let state = with_manifest("flask\n");
    let (state, _) = update(state, Msg::Submitted);
    let (_state, effects) = update(state, Msg::CopyClicked);
    assert!(effects.is_empty());
}

#[test]
fn save_emits_manifest_only_when_present() {
    let (_state, effects) = update(AppState::new(), Msg::SaveClicked);
    assert!(effects.is_empty());

    let (_state, effects) = update(with_manifest("numpy==1.26.0\n"), Msg::SaveClicked);
    assert_eq!(
        effects,
        vec![Effect::SaveManifest {
            text: "numpy==1.26.0\n".to_string()
        }]
    );
}

#[test]
fn completion_notices_are_shown() {
    let (state, _) = update(with_manifest("flask\n"), Msg::CopyFinished(Ok(())));
    assert_eq!(state.view().notice.as_deref(), Some("Copied to clipboard"));

    let (state, _) = update(state, Msg::CopyFinished(Err("no display".into())));
    assert_eq!(state.view().notice.as_deref(), Some("Copy failed: no display"));

    let (state, _) = update(
        state,
        Msg::SaveFinished(Ok(PathBuf::from("out/requirements.txt"))),
    );
    let notice = state.view().notice.unwrap();
    assert!(notice.starts_with("Saved to "));
    assert!(notice.ends_with("requirements.txt"));
}
