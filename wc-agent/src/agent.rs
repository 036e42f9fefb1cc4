//! Agent runtime
//!
//! Hosts the board supervisor on a blocking worker, forwards its events, and
//! turns Ctrl-C / SIGTERM into a stop request.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wc_detect::PortScanner;
use wc_supervisor::{BoardEvent, ChannelNotifier, ControlFlags, SerialAttacher, Supervisor};

use crate::error::AgentError;
use crate::settings::Settings;

/// Capacity of the supervisor event channel
const EVENT_CAPACITY: usize = 256;

/// Run the board monitor until a shutdown signal arrives
pub fn run(settings: Settings) -> Result<(), AgentError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AgentError::Runtime)?;

    runtime.block_on(serve(settings))
}

async fn serve(settings: Settings) -> Result<(), AgentError> {
    let flags = ControlFlags::new();
    let (notifier, events) = ChannelNotifier::new(EVENT_CAPACITY);

    let supervisor = Supervisor::with_config(
        settings.devices.clone(),
        PortScanner::new(),
        SerialAttacher::with_config(settings.attach_config()),
        notifier,
        flags.clone(),
        settings.supervisor_config(),
    );

    let monitor = tokio::task::spawn_blocking(move || supervisor.run());
    let forwarder = tokio::spawn(forward_events(events));
    info!("Agent started");

    shutdown_signal().await;
    info!("Shutting down");
    flags.request_stop();

    monitor.await?;
    // The notifier went away with the supervisor, so the forwarder drains and ends
    if let Err(e) = forwarder.await {
        warn!("Event forwarder failed: {}", e);
    }

    info!("Exiting");
    Ok(())
}

/// Log supervisor events, collapsing repeated scan status updates
async fn forward_events(mut events: mpsc::Receiver<BoardEvent>) {
    let mut last_status: Option<String> = None;

    while let Some(event) = events.recv().await {
        match &event {
            BoardEvent::BoardUpdate(status) => {
                if last_status.as_deref() != Some(status.as_str()) {
                    info!(event = event.name(), "{}", status);
                    last_status = Some(status.clone());
                }
            }
            BoardEvent::BoardDetached => {
                info!(event = event.name(), "Board detached");
                last_status = None;
            }
        }
    }

    debug!("Event stream closed");
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
                return;
            }
            Err(e) => warn!("Cannot listen for SIGTERM: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
