//! Configuration loading and merging logic.
//!
//! Configuration is assembled in the following order (later sources override
//! earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.huddle/config.toml` (optional)
//! 3. **Environment** - `max_cache_seconds`, `lookahead_days`, `source_command`,
//!    `reveal_command`, `icon_template`, and any number of `account_*`,
//!    `calendar_*` and `regex_*` variables
//!
//! Allow-lists and patterns from the file and the environment are combined,
//! not replaced. A malformed number or pattern is logged and skipped so the
//! remaining settings still apply.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use huddle_paths::HuddlePaths;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::config::errors::ConfigError;
use crate::config::types::{Config, ConfigFile};

const ACCOUNT_PREFIX: &str = "account_";
const CALENDAR_PREFIX: &str = "calendar_";
const REGEX_PREFIX: &str = "regex_";

/// Load configuration from the user config file and the process environment.
///
/// A missing config file is not an error. Variables that are not valid
/// unicode are ignored.
pub fn load_hierarchy(paths: &HuddlePaths) -> Result<Config, ConfigError> {
    let vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    load_from(Some(&paths.user_config()), vars)
}

/// Build a [`Config`] from an optional config file and a set of variables.
pub fn load_from<I>(config_file: Option<&Path>, vars: I) -> Result<Config, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut config = Config::default();
    let mut raw_patterns: Vec<String> = Vec::new();

    if let Some(path) = config_file
        && let Some(file) = load_config_file(path)?
    {
        raw_patterns.extend(file.regexes.iter().cloned());
        config = merge_file(config, file);
    }

    // Sorted so `regex_*` variables apply in a stable order regardless of how
    // the environment happens to be laid out.
    let vars: BTreeMap<String, String> = vars.into_iter().collect();

    if let Some(value) = non_empty(&vars, "max_cache_seconds")
        && let Some(seconds) = parse_or_skip::<u64>("max_cache_seconds", value)
    {
        config.max_cache_age = Duration::from_secs(seconds);
    }
    if let Some(value) = non_empty(&vars, "lookahead_days")
        && let Some(days) = parse_or_skip::<u32>("lookahead_days", value)
    {
        config.lookahead_days = days;
    }
    if let Some(value) = non_empty(&vars, "source_command") {
        config.source_command = value.to_string();
    }
    if let Some(value) = non_empty(&vars, "reveal_command") {
        config.reveal_command = value.to_string();
    }
    if let Some(value) = non_empty(&vars, "icon_template") {
        config.icon_template = Some(PathBuf::from(value));
    }

    for (key, value) in &vars {
        if key.starts_with(ACCOUNT_PREFIX) && !value.is_empty() {
            debug!(event = "core.config.account_added", account = %value);
            config.accounts.insert(value.clone());
        } else if key.starts_with(CALENDAR_PREFIX) && !value.is_empty() {
            debug!(event = "core.config.calendar_added", calendar = %value);
            config.calendars.insert(value.clone());
        } else if key.starts_with(REGEX_PREFIX) && !value.is_empty() {
            raw_patterns.push(value.clone());
        }
    }

    config.patterns = compile_patterns(&raw_patterns);

    debug!(
        event = "core.config.load_completed",
        max_cache_seconds = config.max_cache_age.as_secs(),
        lookahead_days = config.lookahead_days,
        accounts = config.accounts.len(),
        calendars = config.calendars.len(),
        patterns = config.patterns.len(),
    );

    Ok(config)
}

/// Compile URL matchers case-insensitively.
///
/// A pattern that fails to compile is logged and dropped; the rest still load.
pub fn compile_patterns(raw: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::with_capacity(raw.len());
    for pattern in raw {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(rx) => {
                debug!(event = "core.config.pattern_added", pattern = %pattern);
                compiled.push(rx);
            }
            Err(e) => {
                warn!(
                    event = "core.config.pattern_invalid",
                    pattern = %pattern,
                    error = %e,
                    "Skipping invalid regex"
                );
            }
        }
    }
    compiled
}

/// Read `config.toml`. Returns `Ok(None)` when the file does not exist.
fn load_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.config.file_not_found", path = %path.display());
            return Ok(None);
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(file))
}

fn merge_file(base: Config, file: ConfigFile) -> Config {
    let mut accounts = base.accounts;
    accounts.extend(file.accounts.into_iter().filter(|a| !a.is_empty()));
    let mut calendars = base.calendars;
    calendars.extend(file.calendars.into_iter().filter(|c| !c.is_empty()));

    Config {
        max_cache_age: file
            .max_cache_seconds
            .map(Duration::from_secs)
            .unwrap_or(base.max_cache_age),
        lookahead_days: file.lookahead_days.unwrap_or(base.lookahead_days),
        accounts,
        calendars,
        patterns: base.patterns,
        source_command: file.source_command.unwrap_or(base.source_command),
        reveal_command: file.reveal_command.unwrap_or(base.reveal_command),
        icon_template: file.icon_template.or(base.icon_template),
    }
}

fn non_empty<'a>(vars: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// `None` (with a warning) when `value` is not a number, leaving the setting
/// at whatever the defaults or the config file gave it.
fn parse_or_skip<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    parse_number(key, value)
        .inspect_err(|e| {
            warn!(
                event = "core.config.value_invalid",
                key = key,
                error = %e,
                "Ignoring invalid value"
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_file_or_vars() {
        let config = load_from(None, Vec::new()).unwrap();
        assert_eq!(config.max_cache_age, Duration::from_secs(600));
        assert_eq!(config.lookahead_days, 7);
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_env_overrides_numbers() {
        let config = load_from(
            None,
            vars(&[("max_cache_seconds", "120"), ("lookahead_days", "3")]),
        )
        .unwrap();
        assert_eq!(config.max_cache_age, Duration::from_secs(120));
        assert_eq!(config.lookahead_days, 3);
    }

    #[test]
    fn test_empty_env_value_keeps_default() {
        let config = load_from(None, vars(&[("max_cache_seconds", "")])).unwrap();
        assert_eq!(config.max_cache_age, Duration::from_secs(600));
    }

    #[test]
    fn test_invalid_number_keeps_other_settings() {
        let config = load_from(
            None,
            vars(&[
                ("lookahead_days", "abc"),
                ("max_cache_seconds", "120"),
                ("account_1", "Work"),
                ("regex_meet", r"https://meet\.example/\S+"),
            ]),
        )
        .unwrap();
        assert_eq!(config.lookahead_days, 7);
        assert_eq!(config.max_cache_age, Duration::from_secs(120));
        assert!(config.accounts.contains("Work"));
        assert_eq!(config.patterns.len(), 1);
    }

    #[test]
    fn test_invalid_number_keeps_file_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "max_cache_seconds = 300\n").unwrap();

        let config = load_from(Some(&path), vars(&[("max_cache_seconds", "-5")])).unwrap();
        assert_eq!(config.max_cache_age, Duration::from_secs(300));
    }

    #[test]
    fn test_parse_number_reports_key_and_value() {
        match parse_number::<u32>("lookahead_days", "a week") {
            Err(ConfigError::InvalidValue { key, value }) => {
                assert_eq!(key, "lookahead_days");
                assert_eq!(value, "a week");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn test_prefixed_variables_collected() {
        let config = load_from(
            None,
            vars(&[
                ("account_1", "Work"),
                ("account_2", ""),
                ("calendar_main", "Meetings"),
                ("regex_zoom", r"https://\S+\.zoom\.us/j/\S+"),
            ]),
        )
        .unwrap();
        assert_eq!(config.accounts.len(), 1);
        assert!(config.accounts.contains("Work"));
        assert!(config.calendars.contains("Meetings"));
        assert_eq!(config.patterns.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_skipped_others_kept() {
        let config = load_from(
            None,
            vars(&[("regex_a", "https://meet(("), ("regex_b", r"https://meet\.example/\S+")]),
        )
        .unwrap();
        assert_eq!(config.patterns.len(), 1);
        assert!(config.patterns[0].is_match("https://meet.example/abc"));
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        let patterns = compile_patterns(&[r"https://meet\.example/\S+".to_string()]);
        assert!(patterns[0].is_match("HTTPS://MEET.EXAMPLE/ABC"));
    }

    #[test]
    fn test_file_then_env_layering() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
max_cache_seconds = 300
lookahead_days = 14
accounts = ["Work"]
regexes = ['https://teams\.example/\S+']
source_command = "/opt/events"
"#,
        )
        .unwrap();

        let config = load_from(
            Some(&path),
            vars(&[("lookahead_days", "2"), ("account_x", "Side")]),
        )
        .unwrap();

        assert_eq!(config.max_cache_age, Duration::from_secs(300));
        assert_eq!(config.lookahead_days, 2);
        assert!(config.accounts.contains("Work"));
        assert!(config.accounts.contains("Side"));
        assert_eq!(config.patterns.len(), 1);
        assert_eq!(config.source_command, "/opt/events");
    }

    #[test]
    fn test_missing_file_is_not_error() {
        let temp = TempDir::new().unwrap();
        let config = load_from(Some(&temp.path().join("nope.toml")), Vec::new());
        assert!(config.is_ok());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "max_cache_seconds = [").unwrap();

        let result = load_from(Some(&path), Vec::new());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_hierarchy_reads_process_environment() {
        let temp = TempDir::new().unwrap();
        let paths = HuddlePaths::from_dir(temp.path().to_path_buf());

        temp_env::with_vars(
            [
                ("max_cache_seconds", Some("42")),
                ("calendar_test_only", Some("Standups")),
            ],
            || {
                let config = load_hierarchy(&paths).unwrap();
                assert_eq!(config.max_cache_age, Duration::from_secs(42));
                assert!(config.calendars.contains("Standups"));
            },
        );
    }
}
