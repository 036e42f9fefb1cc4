//! Whitecat Board Agent
//!
//! Background agent that discovers Whitecat boards on USB serial ports,
//! keeps a connection to one of them, and reports when it is unplugged.

mod agent;
mod error;
mod lifecycle;
mod logging;
mod paths;
mod settings;

use std::process::ExitCode;
use std::time::Duration;

use error::AgentError;
use lifecycle::{LaunchFlags, RunMode};
use logging::LogTarget;
use paths::AppPaths;
use settings::Settings;

/// Delay applied with `-r`
const START_DELAY: Duration = Duration::from_secs(2);

fn main() -> ExitCode {
    let flags = LaunchFlags::parse(std::env::args().skip(1));

    if flags.delay_start {
        std::thread::sleep(START_DELAY);
    }

    match run(flags.mode()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("whitecat-agent: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mode: RunMode) -> Result<(), AgentError> {
    if mode == RunMode::PrintVersion {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let paths = AppPaths::resolve()?;

    let target = match mode {
        RunMode::Respawn => return lifecycle::respawn(&paths.exe),
        RunMode::Logged { to_file: true } => LogTarget::File(paths.log_file()),
        RunMode::Logged { to_file: false } => LogTarget::Discard,
        _ => LogTarget::Stderr,
    };
    logging::init(&target)?;

    tracing::info!(
        "Starting Whitecat agent {} from {}",
        env!("CARGO_PKG_VERSION"),
        paths.app_folder.display()
    );
    tracing::debug!("Data directory: {}", paths.data_dir.display());
    if mode.wants_tray() {
        tracing::info!("Running as background service");
    }

    let settings_path = paths.settings_file();
    let settings = Settings::load(&settings_path);
    if !settings_path.exists() {
        if let Err(e) = settings.save(&settings_path) {
            tracing::warn!("{}", e);
        }
    }

    agent::run(settings)
}
