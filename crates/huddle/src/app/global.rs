use clap::{Arg, ArgAction, Command};

pub fn root_command() -> Command {
    Command::new("huddle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find upcoming video conferences in your calendars")
        .long_about("huddle searches cached calendar events for video-conference links and prints the matches as JSON feedback for a launcher UI. The cache is refreshed in the background when it gets old, so searches never wait on the calendar.\n\nLaunchers should run 'huddle query <words>'. A bare 'huddle <words>' is a shortcut for typing at a terminal, and a first word that names a subcommand (reload, force-reload, show, query) runs that subcommand instead of searching for it.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("query")
                .help("Search events by title (same as 'huddle query')")
                .num_args(0..),
        )
        .args_conflicts_with_subcommands(true)
}
