//! Send messages to a channel or, given a user ID, as a direct message.

use super::{api::SlackClient, block::*, error::SlackError};
use serde::Serialize;

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a str,
    // Used for notifications in the presence of `blocks`.
    text: &'a str,
    #[serde(skip_serializing_if = "no_blocks")]
    blocks: &'a [Block],
}

fn no_blocks(xs: &&[Block]) -> bool {
    xs.is_empty()
}

impl SlackClient {
    /// Post a message. `blocks` may be empty, in which case `text` is
    /// displayed as-is.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        blocks: &[Block],
    ) -> Result<(), SlackError> {
        self.call(
            "/chat.postMessage",
            &MessageRequest {
                channel,
                text,
                blocks,
            },
        )
        .await
    }
}
