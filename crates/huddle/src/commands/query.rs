use clap::ArgMatches;
use tracing::{error, info};

use huddle_core::events;
use huddle_core::{QueryPipeline, RefreshCoordinator};

use super::feedback::Feedback;
use super::{load_config_with_warning, resolve_paths};

pub(crate) fn handle_query_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let query = matches
        .get_many::<String>("query")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let query = query.trim();

    info!(event = "cli.query_started", query = query);

    let paths = resolve_paths()?;
    let config = load_config_with_warning(&paths);
    let coordinator = RefreshCoordinator::for_paths(&config, &paths).inspect_err(|e| {
        eprintln!("Error: {}", e);
        error!(event = "cli.query_failed", error = %e);
    })?;

    let feedback = match QueryPipeline::new(&config, &coordinator).query(query, config.max_cache_age)
    {
        Ok(response) => Feedback::from_response(&response, query, &paths),
        Err(e) => {
            eprintln!("Error: {}", e);
            error!(event = "cli.query_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    println!("{}", serde_json::to_string(&feedback)?);

    info!(
        event = "cli.query_completed",
        items = feedback.items.len(),
        rerun = feedback.rerun.is_some(),
    );
    Ok(())
}
