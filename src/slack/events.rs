//! The payloads Slack delivers to us: Events API callbacks, and interactions
//! (button presses and modal submissions).
//!
//! Events arrive as JSON; interactions arrive form-encoded with the JSON in a
//! single `payload` field.
//!
//! <https://api.slack.com/apis/connections/events-api>
//! <https://api.slack.com/interactivity/handling#payloads>

use serde::Deserialize;
use std::collections::HashMap;

/// The outer envelope of an Events API request.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    /// Sent once when the request URL is configured.
    UrlVerification { challenge: String },
    EventCallback { event: Event },
    #[serde(other)]
    Other,
}

/// The events we subscribe to.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    AppHomeOpened { user: String },
    AppMention { user: String, channel: String },
    #[serde(other)]
    Other,
}

/// The form body of an interaction request.
#[derive(Deserialize)]
pub struct InteractionForm {
    pub payload: String,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    BlockActions {
        trigger_id: String,
        user: SlackUser,
        actions: Vec<Action>,
    },
    ViewSubmission {
        user: SlackUser,
        view: SubmittedView,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct SlackUser {
    pub id: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct Action {
    pub action_id: String,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct SubmittedView {
    pub callback_id: String,
    pub state: SubmittedState,
}

/// Input values keyed by block ID, then action ID.
#[derive(Debug, PartialEq, Deserialize)]
pub struct SubmittedState {
    pub values: HashMap<String, HashMap<String, InputValue>>,
}

/// The value of a single input. Which field is set depends on the element.
#[derive(Debug, PartialEq, Deserialize)]
pub struct InputValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub selected_option: Option<SelectedOption>,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

impl SubmittedState {
    fn input(&self, block_id: &str, action_id: &str) -> Option<&InputValue> {
        self.values.get(block_id).and_then(|x| x.get(action_id))
    }

    /// The text typed into a plain text input.
    pub fn text(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.input(block_id, action_id)
            .and_then(|x| x.value.as_deref())
    }

    /// The value of the option chosen in a select.
    pub fn selected(&self, block_id: &str, action_id: &str) -> Option<&str> {
        self.input(block_id, action_id)
            .and_then(|x| x.selected_option.as_ref())
            .map(|x| x.value.as_str())
    }
}
