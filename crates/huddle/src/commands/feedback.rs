//! JSON feedback consumed by the launcher UI.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use huddle_core::QueryResponse;
use huddle_paths::HuddlePaths;

/// Seconds after which the UI should run the query again.
pub const RERUN_INTERVAL: f64 = 0.2;

#[derive(Debug, Serialize)]
pub struct Feedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rerun: Option<f64>,
    pub items: Vec<Item>,
}

#[derive(Debug, Serialize)]
pub struct Item {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    pub valid: bool,
    pub icon: Icon,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct Icon {
    pub path: PathBuf,
}

impl Item {
    fn notice(title: &str, subtitle: &str, icon: &Path) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            arg: None,
            valid: false,
            icon: Icon {
                path: icon.to_path_buf(),
            },
            variables: BTreeMap::new(),
        }
    }
}

/// The "Reload Events" action shows for queries like `re`, `rel`, `reload`.
fn offers_reload(query: &str) -> bool {
    query.chars().count() > 1 && "reload".starts_with(query)
}

impl Feedback {
    pub fn from_response(response: &QueryResponse, query: &str, paths: &HuddlePaths) -> Self {
        let rerun = response.still_loading.then_some(RERUN_INTERVAL);
        let info_icon = paths.icon_template();

        if let Some(message) = &response.error {
            return Self {
                rerun,
                items: vec![Item::notice(
                    message,
                    "Check calendar access, then reload",
                    &info_icon,
                )],
            };
        }

        if !response.has_data {
            let item = if response.still_loading {
                Item::notice(
                    "Loading Events…",
                    "Results should appear momentarily",
                    &info_icon,
                )
            } else {
                Item::notice("No Data", "Could not load calendar data", &info_icon)
            };
            return Self {
                rerun,
                items: vec![item],
            };
        }

        let mut items: Vec<Item> = response
            .results
            .iter()
            .map(|result| Item {
                title: result.title.clone(),
                subtitle: result.subtitle.clone(),
                arg: Some(result.url.clone()),
                valid: true,
                icon: Icon {
                    path: result.icon.clone(),
                },
                variables: BTreeMap::from([
                    ("calendar_name".to_string(), result.calendar.clone()),
                    ("event_id".to_string(), result.uid.clone()),
                ]),
            })
            .collect();

        if offers_reload(query) {
            items.push(Item {
                arg: Some("reload".to_string()),
                valid: true,
                ..Item::notice(
                    "Reload Events",
                    "Update cached events from the calendar",
                    &paths.reload_icon(),
                )
            });
        }

        if items.is_empty() {
            let warning = if query.is_empty() {
                "No Video Conferences"
            } else {
                "No Matching Events"
            };
            items.push(Item::notice(warning, "", &info_icon));
        }

        Self { rerun, items }
    }
}
