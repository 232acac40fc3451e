//! Launch records as served by the remote catalog.
//!
//! A [`Launch`] is deserialized straight from the JSON the API returns and is
//! never mutated afterwards. The list only ever replaces or appends whole
//! records.
//!
//! ```rust
//! use launch_browser::launch::{Launch, LaunchStatus};
//!
//! let json = r#"{
//!     "flight_number": 6,
//!     "mission_name": "Falcon 9 Test Flight",
//!     "upcoming": false,
//!     "launch_success": true,
//!     "rocket": { "rocket_name": "Falcon 9" },
//!     "launch_date_utc": "2010-06-04T18:45:00.000Z",
//!     "launch_site": { "site_name_long": "Cape Canaveral Air Force Station Space Launch Complex 40" },
//!     "links": { "mission_patch_small": null, "video_link": null, "article_link": null },
//!     "details": null
//! }"#;
//!
//! let launch: Launch = serde_json::from_str(json).unwrap();
//! assert_eq!(launch.id(), 6);
//! assert_eq!(launch.status(), LaunchStatus::Success);
//! assert!(launch.matches("falcon"));
//! ```

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the remote source.
pub type LaunchId = u32;

/// A single launch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    /// Unique flight number, used as the record id.
    pub flight_number: LaunchId,
    /// Display name.
    pub mission_name: String,
    /// Whether the launch has not happened yet.
    #[serde(default)]
    pub upcoming: bool,
    /// Outcome of a past launch. `None` when the API has no verdict.
    #[serde(default)]
    pub launch_success: Option<bool>,
    #[serde(default)]
    pub rocket: Rocket,
    /// Launch time in UTC.
    #[serde(default)]
    pub launch_date_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub launch_site: LaunchSite,
    #[serde(default)]
    pub links: Links,
    /// Free-text mission notes.
    #[serde(default)]
    pub details: Option<String>,
}

/// Vehicle reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rocket {
    #[serde(default)]
    pub rocket_name: String,
}

/// Launch site reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSite {
    #[serde(default)]
    pub site_name_long: String,
}

/// Optional media links attached to a launch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub mission_patch_small: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub article_link: Option<String>,
}

/// Status shown on a launch card. Exactly one applies to every launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchStatus {
    Upcoming,
    Success,
    Failed,
}

impl LaunchStatus {
    /// Lowercase badge label.
    pub fn label(self) -> &'static str {
        match self {
            LaunchStatus::Upcoming => "upcoming",
            LaunchStatus::Success => "success",
            LaunchStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Launch {
    pub fn id(&self) -> LaunchId {
        self.flight_number
    }

    /// Derives the card status. `upcoming` wins over the success flag, and a
    /// past launch without a recorded success counts as failed.
    pub fn status(&self) -> LaunchStatus {
        if self.upcoming {
            LaunchStatus::Upcoming
        } else if self.launch_success == Some(true) {
            LaunchStatus::Success
        } else {
            LaunchStatus::Failed
        }
    }

    /// Case-insensitive substring match on the mission name. An empty query
    /// matches everything.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.name_contains(&query.to_lowercase())
    }

    /// `needle` must already be lowercase.
    fn name_contains(&self, needle: &str) -> bool {
        self.mission_name.to_lowercase().contains(needle)
    }

    /// Launch time rendered in the local timezone, if known.
    pub fn local_launch_time(&self) -> Option<String> {
        self.launch_date_utc.map(|at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
    }

    /// Details text with the fallback used on expanded cards.
    pub fn details_or_default(&self) -> &str {
        match self.details.as_deref() {
            Some(details) if !details.trim().is_empty() => details,
            _ => "No details available.",
        }
    }
}

/// Keeps the launches whose mission name contains `query`, preserving order.
pub fn filter_by_name(launches: Vec<Launch>, query: &str) -> Vec<Launch> {
    if query.is_empty() {
        return launches;
    }
    let needle = query.to_lowercase();
    launches
        .into_iter()
        .filter(|launch| launch.name_contains(&needle))
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a past, successful launch with the given id and name.
    pub fn launch(id: LaunchId, name: &str) -> Launch {
        Launch {
            flight_number: id,
            mission_name: name.to_string(),
            upcoming: false,
            launch_success: Some(true),
            rocket: Rocket {
                rocket_name: "Falcon 1".to_string(),
            },
            launch_date_utc: None,
            launch_site: LaunchSite {
                site_name_long: "Kwajalein Atoll Omelek Island".to_string(),
            },
            links: Links::default(),
            details: None,
        }
    }

    /// `count` launches numbered from `first`, named `Mission <id>`.
    pub fn numbered(first: LaunchId, count: usize) -> Vec<Launch> {
        (0..count as LaunchId)
            .map(|offset| launch(first + offset, &format!("Mission {}", first + offset)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::launch;
    use super::*;

    #[test]
    fn test_status_prefers_upcoming() {
        let mut l = launch(1, "Starlink");
        l.upcoming = true;
        l.launch_success = Some(true);
        assert_eq!(l.status(), LaunchStatus::Upcoming);
    }

    #[test]
    fn test_status_missing_verdict_is_failed() {
        let mut l = launch(2, "DemoSat");
        l.launch_success = None;
        assert_eq!(l.status(), LaunchStatus::Failed);
        l.launch_success = Some(false);
        assert_eq!(l.status(), LaunchStatus::Failed);
        assert_eq!(l.status().to_string(), "failed");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let l = launch(3, "Falcon Heavy Test Flight");
        assert!(l.matches("falcon"));
        assert!(l.matches("HEAVY"));
        assert!(l.matches(""));
        assert!(!l.matches("dragon"));
    }

    #[test]
    fn test_filter_by_name_keeps_order() {
        let launches = vec![
            launch(1, "FalconSat"),
            launch(2, "DemoSat"),
            launch(3, "Falcon 9 Test Flight"),
        ];
        let ids: Vec<_> = filter_by_name(launches, "falcon")
            .iter()
            .map(Launch::id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filter_agrees_with_matches() {
        let launches = vec![
            launch(1, "FalconSat"),
            launch(2, "Ñuñoa Sat"),
            launch(3, "CRS-1"),
        ];
        for query in ["", "SAT", "ñuñoa", "crs-", "x"] {
            let expected: Vec<_> = launches
                .iter()
                .filter(|l| l.matches(query))
                .map(Launch::id)
                .collect();
            let filtered: Vec<_> = filter_by_name(launches.clone(), query)
                .iter()
                .map(Launch::id)
                .collect();
            assert_eq!(filtered, expected, "query {query:?}");
        }
    }

    #[test]
    fn test_deserialize_api_shape() {
        let json = r#"{
            "flight_number": 1,
            "mission_name": "FalconSat",
            "upcoming": false,
            "launch_success": false,
            "rocket": { "rocket_id": "falcon1", "rocket_name": "Falcon 1" },
            "launch_date_utc": "2006-03-24T22:30:00.000Z",
            "launch_site": { "site_name_long": "Kwajalein Atoll Omelek Island" },
            "links": {
                "mission_patch_small": "https://images2.imgbox.com/3c/0e/T8iJcSN3_o.png",
                "video_link": "https://www.youtube.com/watch?v=0a_00nJ_Y88",
                "article_link": null
            },
            "details": "Engine failure at 33 seconds and loss of vehicle"
        }"#;
        let l: Launch = serde_json::from_str(json).unwrap();
        assert_eq!(l.id(), 1);
        assert_eq!(l.rocket.rocket_name, "Falcon 1");
        assert_eq!(l.status(), LaunchStatus::Failed);
        assert!(l.links.video_link.is_some());
        assert!(l.links.article_link.is_none());
        assert!(l.local_launch_time().is_some());
    }

    #[test]
    fn test_details_fallback() {
        let mut l = launch(4, "RatSat");
        assert_eq!(l.details_or_default(), "No details available.");
        l.details = Some("  ".to_string());
        assert_eq!(l.details_or_default(), "No details available.");
        l.details = Some("Orbit achieved".to_string());
        assert_eq!(l.details_or_default(), "Orbit achieved");
    }
}
