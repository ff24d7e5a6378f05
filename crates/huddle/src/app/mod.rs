mod events;
mod global;


use clap::Command;

pub fn build_cli() -> Command {
    global::root_command()
        .subcommand(events::query_command())
        .subcommand(events::reload_command())
        .subcommand(events::force_reload_command())
        .subcommand(events::show_command())
}
