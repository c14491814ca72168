use crate::slack::error::SlackError;
use std::fmt;

/// Sum type representing every way handling a Slack event or interaction can
/// fail. None of these are reported back to the Slack user.
#[derive(Debug)]
pub enum Failure {
    Slack(SlackError),
    CalendarRequestFailed(reqwest::Error),
    /// A modal submission was missing one of its inputs.
    IncompleteSubmission(&'static str),
}

impl From<SlackError> for Failure {
    fn from(e: SlackError) -> Self {
        Failure::Slack(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::Slack(e) => e.to_string(),
            Failure::CalendarRequestFailed(e) => format!("Calendar request failed: {:?}", e),
            Failure::IncompleteSubmission(field) => {
                format!("Submission missing field: {}", field)
            }
        };

        write!(f, "{}", x)
    }
}
