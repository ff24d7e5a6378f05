use clap::ArgMatches;
use tracing::{error, info};

use huddle_core::events;
use huddle_core::{RefreshCoordinator, RefreshOutcome};

use super::{load_config_with_warning, resolve_paths};

pub(crate) fn handle_reload_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let notify = matches.get_flag("notify");
    info!(event = "cli.reload_started", notify = notify);

    let paths = resolve_paths()?;
    let config = load_config_with_warning(&paths);
    let coordinator = RefreshCoordinator::for_paths(&config, &paths).inspect_err(|e| {
        eprintln!("Reload failed: {}", e);
        error!(event = "cli.reload_failed", error = %e);
    })?;

    match coordinator.start_refresh(notify) {
        Ok(RefreshOutcome::Completed { events, error, .. }) => {
            match error {
                Some(message) => println!("Calendar reported an error: {}", message),
                None => println!("Loaded {} event(s)", events),
            }
            info!(event = "cli.reload_completed", events = events);
            Ok(())
        }
        Ok(RefreshOutcome::AlreadyRunning) => {
            println!("A reload is already running");
            Ok(())
        }
        Err(e) => {
            eprintln!("Reload failed: {}", e);
            error!(event = "cli.reload_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub(crate) fn handle_force_reload_command() -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.force_reload_started");

    let paths = resolve_paths()?;
    let config = load_config_with_warning(&paths);
    let coordinator = RefreshCoordinator::for_paths(&config, &paths).inspect_err(|e| {
        eprintln!("Could not start reload: {}", e);
        error!(event = "cli.force_reload_failed", error = %e);
    })?;

    match coordinator.force_refresh() {
        Ok(true) => {
            println!("Reloading events in the background");
            info!(event = "cli.force_reload_completed", launched = true);
            Ok(())
        }
        Ok(false) => {
            println!("A reload is already running");
            info!(event = "cli.force_reload_completed", launched = false);
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not start reload: {}", e);
            error!(event = "cli.force_reload_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
