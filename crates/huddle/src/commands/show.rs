use clap::ArgMatches;
use tracing::{error, info};

use huddle_core::events;
use huddle_core::source::reveal_event;

use super::{load_config_with_warning, resolve_paths};

pub(crate) fn handle_show_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let calendar = matches
        .get_one::<String>("calendar")
        .ok_or("Calendar argument is required")?;
    let event_id = matches
        .get_one::<String>("event")
        .ok_or("Event argument is required")?;

    info!(event = "cli.show_started", calendar = %calendar, event_id = %event_id);

    let paths = resolve_paths()?;
    let config = load_config_with_warning(&paths);

    match reveal_event(&config.reveal_command, calendar, event_id) {
        Ok(()) => {
            info!(event = "cli.show_completed", event_id = %event_id);
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not show event: {}", e);
            error!(event = "cli.show_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
