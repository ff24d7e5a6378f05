use clap::{Arg, ArgAction, Command};

pub fn query_command() -> Command {
    Command::new("query")
        .about("Search cached events and print launcher feedback")
        .arg(
            Arg::new("query")
                .help("Words to match against event titles")
                .num_args(0..),
        )
}

pub fn reload_command() -> Command {
    Command::new("reload")
        .about("Fetch events from the calendar and refresh the cache")
        .arg(
            Arg::new("notify")
                .long("notify")
                .help("Show a desktop notification when the reload finishes")
                .action(ArgAction::SetTrue),
        )
}

pub fn force_reload_command() -> Command {
    Command::new("force-reload")
        .about("Start a background reload unless one is already running")
}

pub fn show_command() -> Command {
    Command::new("show")
        .about("Reveal an event in the calendar application")
        .arg(
            Arg::new("calendar")
                .long("calendar")
                .help("Calendar the event belongs to")
                .required(true),
        )
        .arg(
            Arg::new("event")
                .long("event")
                .help("UID of the event")
                .required(true),
        )
}
