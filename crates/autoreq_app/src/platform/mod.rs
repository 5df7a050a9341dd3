//! Everything that touches the outside world: terminal, clipboard, disk, env.
pub mod cli;

mod app;
mod clipboard;
mod config;
mod effects;
mod headless;
mod logging;
mod ui;

use anyhow::Result;
use autoreq_logging::autoreq_warn;

use self::cli::Cli;
use self::logging::LogDestination;

pub fn run(cli: Cli) -> Result<()> {
    let (settings, warnings) = config::resolve_settings(&cli, |key| std::env::var(key).ok())?;

    let destination = if cli.url.is_some() {
        LogDestination::Terminal
    } else {
        LogDestination::File
    };
    logging::initialize(destination, settings.log_level);
    for warning in warnings {
        autoreq_warn!("{}", warning);
    }

    match cli.url.as_deref() {
        Some(url) => {
            let mut stdout = std::io::stdout().lock();
            headless::run_once(&settings, url, cli.save, &mut stdout)
        }
        None => app::run_app(&settings),
    }
}
