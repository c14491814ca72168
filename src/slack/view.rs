//! Publish Home tab views and open modals.

use super::{api::SlackClient, block::*, error::SlackError};
use serde::Serialize;
use serde_with::skip_serializing_none;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Home,
    Modal,
}

/// A surface built from blocks.
///
/// <https://api.slack.com/reference/surfaces/views>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    #[serde(rename = "type")]
    pub typ: ViewType,
    pub callback_id: Option<String>,
    pub title: Option<Text>,
    pub submit: Option<Text>,
    pub close: Option<Text>,
    pub blocks: Vec<Block>,
}

impl View {
    pub fn home(callback_id: &str, blocks: Vec<Block>) -> Self {
        View {
            typ: ViewType::Home,
            callback_id: Some(callback_id.into()),
            title: None,
            submit: None,
            close: None,
            blocks,
        }
    }
}

/// <https://api.slack.com/methods/views.publish#args>
#[derive(Serialize)]
struct PublishRequest<'a> {
    user_id: &'a str,
    view: &'a View,
}

/// <https://api.slack.com/methods/views.open#args>
#[derive(Serialize)]
struct OpenRequest<'a> {
    trigger_id: &'a str,
    view: &'a View,
}

impl SlackClient {
    /// Replace a user's Home tab.
    pub async fn publish_view(&self, user_id: &str, view: &View) -> Result<(), SlackError> {
        self.call("/views.publish", &PublishRequest { user_id, view })
            .await
    }

    /// Open a modal in response to an interaction.
    pub async fn open_view(&self, trigger_id: &str, view: &View) -> Result<(), SlackError> {
        self.call("/views.open", &OpenRequest { trigger_id, view })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_home_omits_modal_fields() {
        let v = View::home("home_view", vec![Block::Divider]);

        assert_eq!(
            serde_json::to_value(v).unwrap(),
            json!({"type": "home", "callback_id": "home_view", "blocks": [{"type": "divider"}]})
        );
    }
}
