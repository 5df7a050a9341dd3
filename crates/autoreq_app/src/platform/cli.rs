use std::path::PathBuf;

use clap::Parser;

/// Generate a requirements.txt for a Python repository on GitHub.
///
/// Without `--url` an interactive terminal form is started.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "autoreq", version, about)]
pub struct Cli {
    /// Analysis service endpoint (overrides AUTOREQ_ENDPOINT and the config file)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Seconds to wait for the analysis service before giving up
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file to read instead of ./autoreq.ron
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory the manifest is saved into
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace, off)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Analyze this repository once, print the manifest and exit
    #[arg(long, value_name = "REPO_URL")]
    pub url: Option<String>,

    /// With --url, also save the manifest into the output directory
    #[arg(long, requires = "url")]
    pub save: bool,
}
