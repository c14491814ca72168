//! The calendar endpoint used by the Slack Home tab.
//!
//! There is no persistence behind it: every request returns the same two
//! fixture entries, scheduled relative to the time of the request. Posts
//! submitted through Slack are never added here.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A calendar entry as served by `GET /api/calendar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub platform: String,
    pub content: String,
    pub scheduled_time: DateTime<Utc>,
}

/// The in-memory fixture: one post tomorrow, one the day after.
pub fn mock_entries(now: DateTime<Utc>) -> Vec<CalendarEntry> {
    vec![
        CalendarEntry {
            platform: "Twitter".into(),
            content: "Check out our latest product update!".into(),
            scheduled_time: now + Duration::hours(24),
        },
        CalendarEntry {
            platform: "LinkedIn".into(),
            content: "We are hiring! Join our amazing team.".into(),
            scheduled_time: now + Duration::hours(48),
        },
    ]
}

/// Fetch the calendar from a running instance of this service, as the Slack
/// handlers do.
pub async fn fetch(
    client: &reqwest::Client,
    api_base: &str,
) -> Result<Vec<CalendarEntry>, reqwest::Error> {
    client
        .get(format!("{}/api/calendar", api_base.trim_end_matches('/')))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}
