use clap::ArgMatches;
use tracing::{error, warn};

use huddle_core::config::{self, Config};
use huddle_core::events;
use huddle_paths::HuddlePaths;

mod feedback;
mod query;
mod reload;
mod show;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("query", sub_matches)) => query::handle_query_command(sub_matches),
        Some(("reload", sub_matches)) => reload::handle_reload_command(sub_matches),
        Some(("force-reload", _)) => reload::handle_force_reload_command(),
        Some(("show", sub_matches)) => show::handle_show_command(sub_matches),
        Some((name, _)) => {
            error!(event = "cli.command_unknown", command = name);
            Err("Unknown command".into())
        }
        None => query::handle_query_command(matches),
    }
}

/// Resolve the data directory, reporting failure to the user.
fn resolve_paths() -> Result<HuddlePaths, Box<dyn std::error::Error>> {
    HuddlePaths::resolve().map_err(|e| {
        eprintln!("Error: {}", e);
        error!(event = "cli.paths.resolve_failed", error = %e);
        e.into()
    })
}

/// Load configuration with warning on errors.
///
/// Falls back to defaults if loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning(paths: &HuddlePaths) -> Config {
    match config::load_hierarchy(paths) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check {} and the huddle environment variables.",
                e,
                paths.user_config().display()
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            Config::default()
        }
    }
}
