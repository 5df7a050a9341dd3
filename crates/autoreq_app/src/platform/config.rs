//! Settings resolution: CLI flag > environment > `autoreq.ron` > defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use autoreq_engine::ClientSettings;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cli::Cli;

pub const CONFIG_FILENAME: &str = "autoreq.ron";
pub const ENV_ENDPOINT: &str = "AUTOREQ_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "AUTOREQ_TIMEOUT_SECS";
/// Longest request deadline accepted from any layer (one hour).
pub const MAX_TIMEOUT_SECS: u64 = 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// On-disk configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: client.endpoint,
            request_timeout_secs: client.request_timeout.as_secs(),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            max_response_bytes: client.max_response_bytes,
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub output_dir: PathBuf,
    pub log_level: LevelFilter,
}

/// Reads a config file; `Ok(None)` when it does not exist.
pub fn load_file_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Merges all configuration layers.
///
/// Returns the settings plus warnings to log once the logger is up. An
/// explicitly requested config file that is missing or broken is an error; the
/// implicit `./autoreq.ron` only produces a warning.
pub fn resolve_settings(
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<(Settings, Vec<String>)> {
    let mut warnings = Vec::new();

    let file = match &cli.config {
        Some(path) => load_file_config(path)?
            .ok_or_else(|| anyhow::anyhow!("config file {path:?} does not exist"))?,
        None => match load_file_config(Path::new(CONFIG_FILENAME)) {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                warnings.push(format!("{err}; using defaults"));
                FileConfig::default()
            }
        },
    };

    let env_timeout = env(ENV_TIMEOUT_SECS).and_then(|raw| match raw.trim().parse::<u64>() {
        Ok(secs) => Some(secs),
        Err(_) => {
            warnings.push(format!("ignoring {ENV_TIMEOUT_SECS}={raw:?}: not a number"));
            None
        }
    });

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env(ENV_ENDPOINT).filter(|value| !value.trim().is_empty()))
        .unwrap_or(file.endpoint);
    let request_timeout_secs = clamp_timeout(
        "request timeout",
        cli.timeout_secs.or(env_timeout).unwrap_or(file.request_timeout_secs),
        &mut warnings,
    );
    let connect_timeout_secs =
        clamp_timeout("connect timeout", file.connect_timeout_secs, &mut warnings);

    let level_name = cli.log_level.clone().unwrap_or(file.log_level);
    let log_level = autoreq_logging::parse_level(&level_name).unwrap_or_else(|| {
        warnings.push(format!("unknown log level {level_name:?}; using info"));
        LevelFilter::Info
    });

    let settings = Settings {
        client: ClientSettings {
            endpoint,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_response_bytes: file.max_response_bytes,
        },
        output_dir: cli.output_dir.clone().unwrap_or(file.output_dir),
        log_level,
    };
    Ok((settings, warnings))
}

/// Keeps a timeout within `1..=MAX_TIMEOUT_SECS`, warning when it had to move.
fn clamp_timeout(what: &str, secs: u64, warnings: &mut Vec<String>) -> u64 {
    let clamped = secs.clamp(1, MAX_TIMEOUT_SECS);
    if clamped != secs {
        warnings.push(format!("{what} of {secs}s is out of range; using {clamped}s"));
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn cli_with_config(path: PathBuf) -> Cli {
        Cli {
            config: Some(path),
            ..Cli::default()
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let loaded = load_file_config(&temp.path().join(CONFIG_FILENAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"(endpoint: "https://reqs.example.com/clone-repo/")"#).unwrap();

        let config = load_file_config(&path).unwrap().unwrap();
        assert_eq!(config.endpoint, "https://reqs.example.com/clone-repo/");
        assert_eq!(
            config.request_timeout_secs,
            FileConfig::default().request_timeout_secs
        );
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(endpoint: ").unwrap();

        let err = load_file_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.ron");
        fs::write(
            &path,
            r#"(endpoint: "http://file.example/", request_timeout_secs: 30, log_level: "debug")"#,
        )
        .unwrap();

        let env = |key: &str| match key {
            ENV_ENDPOINT => Some("http://env.example/".to_string()),
            ENV_TIMEOUT_SECS => Some("45".to_string()),
            _ => None,
        };

        let (settings, warnings) = resolve_settings(&cli_with_config(path.clone()), env).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(settings.client.endpoint, "http://env.example/");
        assert_eq!(settings.client.request_timeout, Duration::from_secs(45));
        assert_eq!(settings.log_level, LevelFilter::Debug);

        let cli = Cli {
            endpoint: Some("http://cli.example/".to_string()),
            timeout_secs: Some(5),
            ..cli_with_config(path.clone())
        };
        let (settings, _) = resolve_settings(&cli, env).unwrap();
        assert_eq!(settings.client.endpoint, "http://cli.example/");
        assert_eq!(settings.client.request_timeout, Duration::from_secs(5));

        let (settings, _) = resolve_settings(&cli_with_config(path), no_env).unwrap();
        assert_eq!(settings.client.endpoint, "http://file.example/");
        assert_eq!(settings.client.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn bad_env_timeout_is_ignored_with_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.ron");
        fs::write(&path, "()").unwrap();
        let env = |key: &str| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string());

        let (settings, warnings) = resolve_settings(&cli_with_config(path), env).unwrap();
        assert_eq!(
            settings.client.request_timeout,
            ClientSettings::default().request_timeout
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn huge_timeout_is_capped_with_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.ron");
        fs::write(&path, "(connect_timeout_secs: 0)").unwrap();
        let cli = Cli {
            timeout_secs: Some(u64::MAX),
            ..cli_with_config(path)
        };

        let (settings, warnings) = resolve_settings(&cli, no_env).unwrap();
        assert_eq!(
            settings.client.request_timeout,
            Duration::from_secs(MAX_TIMEOUT_SECS)
        );
        assert_eq!(settings.client.connect_timeout, Duration::from_secs(1));
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("request timeout"));
        assert!(warnings[1].contains("connect timeout"));
        // One-shot mode adds its grace period on top of this deadline.
        assert!(settings
            .client
            .request_timeout
            .checked_add(Duration::from_secs(5))
            .is_some());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cli = cli_with_config(temp.path().join("absent.ron"));
        assert!(resolve_settings(&cli, no_env).is_err());
    }
}
