use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use autoreq_core::{update, AppState, Msg, RequestStatus};
use autoreq_logging::autoreq_info;

use super::config::Settings;
use super::effects::EffectRunner;

/// Slack on top of the request deadline before the run gives up waiting.
const GRACE: Duration = Duration::from_secs(5);

/// Submits `url` once, writes the manifest to `out` and optionally saves it.
pub fn run_once(
    settings: &Settings,
    url: &str,
    save: bool,
    out: &mut impl Write,
) -> Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, msg_tx);

    let (state, _) = update(AppState::new(), Msg::InputChanged(url.to_string()));
    let (mut state, effects) = update(state, Msg::Submitted);
    if effects.is_empty() {
        let hint = state.view().validation.unwrap_or_default();
        bail!("{hint}");
    }
    runner.enqueue(effects);

    let deadline = settings.client.request_timeout.saturating_add(GRACE);
    while state.is_in_flight() {
        let msg = msg_rx
            .recv_timeout(deadline)
            .context("analysis service did not answer")?;
        state = update(state, msg).0;
    }

    let manifest = match state.status() {
        RequestStatus::Succeeded { manifest } => manifest.clone(),
        RequestStatus::Failed { reason } => bail!("{reason}"),
        RequestStatus::Idle | RequestStatus::InFlight { .. } => bail!("request did not complete"),
    };

    out.write_all(manifest.as_bytes()).context("Failed to write manifest")?;
    out.flush().context("Failed to flush manifest output")?;

    if save {
        if manifest.is_empty() {
            autoreq_info!("Manifest is empty; nothing saved");
            return Ok(());
        }
        let (next, effects) = update(state, Msg::SaveClicked);
        state = next;
        runner.enqueue(effects);
        let msg = msg_rx
            .recv_timeout(GRACE)
            .context("saving the manifest did not finish")?;
        if let Msg::SaveFinished(Err(err)) = &msg {
            bail!("could not save manifest: {err}");
        }
        state = update(state, msg).0;
        if let Some(notice) = state.view().notice {
            eprintln!("{notice}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoreq_engine::{ClientSettings, MANIFEST_FIELD, MANIFEST_FILENAME};
    use log::LevelFilter;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REPO: &str = "https://github.com/acme/widget.git";

    fn settings_for(server: &MockServer, output_dir: &Path) -> Settings {
        Settings {
            client: ClientSettings {
                endpoint: format!("{}/clone-repo/", server.uri()),
                request_timeout: Duration::from_secs(5),
                ..ClientSettings::default()
            },
            output_dir: output_dir.to_path_buf(),
            log_level: LevelFilter::Info,
        }
    }

    async fn answering(status: u16, body: serde_json::Value, expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    /// Runs the blocking one-shot flow off the async test runtime.
    async fn run(settings: Settings, url: &str, save: bool) -> (Result<()>, String) {
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let mut out = Vec::new();
            let result = run_once(&settings, &url, save, &mut out);
            (result, String::from_utf8(out).unwrap())
        })
        .await
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn prints_manifest_on_success() {
        let server = answering(200, json!({ MANIFEST_FIELD: "flask==3.0.0\n" }), 1).await;
        let temp = TempDir::new().unwrap();

        let (result, printed) = run(settings_for(&server, temp.path()), REPO, false).await;
        result.unwrap();
        assert_eq!(printed, "flask==3.0.0\n");
        assert!(!temp.path().join(MANIFEST_FILENAME).exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn save_writes_manifest_into_output_dir() {
        let server = answering(200, json!({ MANIFEST_FIELD: "numpy==1.26.0\n" }), 1).await;
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("out");

        let (result, printed) = run(settings_for(&server, &output_dir), REPO, true).await;
        result.unwrap();
        assert_eq!(printed, "numpy==1.26.0\n");
        assert_eq!(
            std::fs::read_to_string(output_dir.join(MANIFEST_FILENAME)).unwrap(),
            "numpy==1.26.0\n"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_manifest_is_not_saved() {
        let server = answering(200, json!({ MANIFEST_FIELD: "" }), 1).await;
        let temp = TempDir::new().unwrap();

        let (result, printed) = run(settings_for(&server, temp.path()), REPO, true).await;
        result.unwrap();
        assert_eq!(printed, "");
        assert!(!temp.path().join(MANIFEST_FILENAME).exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_fails_the_run() {
        let server = answering(500, json!({}), 1).await;
        let temp = TempDir::new().unwrap();

        let (result, printed) = run(settings_for(&server, temp.path()), REPO, true).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"), "unexpected error: {err}");
        assert_eq!(printed, "");
        assert!(!temp.path().join(MANIFEST_FILENAME).exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn invalid_url_fails_without_a_request() {
        let server = answering(200, json!({ MANIFEST_FIELD: "flask\n" }), 0).await;
        let temp = TempDir::new().unwrap();

        let (result, printed) = run(settings_for(&server, temp.path()), "not a url", false).await;
        let err = result.unwrap_err();
        assert!(!err.to_string().is_empty());
        assert_eq!(printed, "");
    }
}
