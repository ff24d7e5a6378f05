use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MAX_CACHE_SECONDS: u64 = 600;
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;
pub const DEFAULT_SOURCE_COMMAND: &str = "huddle-events";
pub const DEFAULT_REVEAL_COMMAND: &str = "huddle-show";

/// Runtime configuration, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cached events older than this trigger a background refresh.
    pub max_cache_age: Duration,
    /// How many days of events the data source is asked for.
    pub lookahead_days: u32,
    /// Accounts to search. Empty means every account.
    pub accounts: BTreeSet<String>,
    /// Calendars to search. Empty means every calendar.
    pub calendars: BTreeSet<String>,
    /// Case-insensitive video-conference URL matchers, in configured order.
    pub patterns: Vec<Regex>,
    /// Program that prints the event payload as JSON.
    pub source_command: String,
    /// Program that reveals an event in the calendar application.
    pub reveal_command: String,
    /// Mask image for colored icons. `None` means the data-dir default.
    pub icon_template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_age: Duration::from_secs(DEFAULT_MAX_CACHE_SECONDS),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            accounts: BTreeSet::new(),
            calendars: BTreeSet::new(),
            patterns: Vec::new(),
            source_command: DEFAULT_SOURCE_COMMAND.to_string(),
            reveal_command: DEFAULT_REVEAL_COMMAND.to_string(),
            icon_template: None,
        }
    }
}

impl Config {
    pub fn account_allowed(&self, account: &str) -> bool {
        self.accounts.is_empty() || self.accounts.contains(account)
    }

    pub fn calendar_allowed(&self, calendar: &str) -> bool {
        self.calendars.is_empty() || self.calendars.contains(calendar)
    }
}

/// On-disk shape of `config.toml`. Every field is optional so a partial file
/// only overrides what it names.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub max_cache_seconds: Option<u64>,
    pub lookahead_days: Option<u32>,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub calendars: Vec<String>,
    #[serde(default)]
    pub regexes: Vec<String>,
    pub source_command: Option<String>,
    pub reveal_command: Option<String>,
    pub icon_template: Option<PathBuf>,
}
