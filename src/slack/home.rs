//! The Slack surfaces of the calendar: the Home tab, the new post modal, and
//! the messages sent around them.

use super::{block::*, view::*};
use crate::calendar::CalendarEntry;
use chrono::{DateTime, Utc};

pub const HOME_CALLBACK_ID: &str = "home_view";
pub const ADD_NEW_POST_ACTION: &str = "add_new_post";
pub const NEW_POST_CALLBACK_ID: &str = "new_post_modal";

pub const CONTENT_BLOCK: &str = "content_block";
pub const CONTENT_INPUT: &str = "content_input";
pub const PLATFORM_BLOCK: &str = "platform_block";
pub const PLATFORM_SELECT: &str = "platform_select";

/// The platforms offered by the modal.
const MODAL_PLATFORMS: [&str; 2] = ["Twitter", "LinkedIn"];

const CAPABILITIES: &str = "• View upcoming posts\n• Add new content ideas\n• Check posting schedule\n• Generate content suggestions";

/// The Home tab: a welcome, every calendar entry, and a button to add more.
pub fn home_view(user_id: &str, entries: &[CalendarEntry]) -> View {
    let mut xs = Vec::with_capacity(entries.len() + 3);

    xs.push(Block::Section(Text::mrkdwn(format!(
        "👋 Welcome <@{}>! Here's your Social Media Content Calendar:",
        user_id
    ))));
    xs.push(Block::Divider);
    xs.extend(entries.iter().map(|x| Block::Section(Text::mrkdwn(fmt_entry(x)))));
    xs.push(Block::Actions(vec![Element::Button {
        text: Text::plain("Add New Post"),
        action_id: ADD_NEW_POST_ACTION.into(),
    }]));

    View::home(HOME_CALLBACK_ID, xs)
}

fn fmt_entry(x: &CalendarEntry) -> String {
    format!(
        "*{}*: {}\n_Scheduled for: {}_",
        x.platform,
        x.content,
        fmt_time(&x.scheduled_time)
    )
}

/// For example `6/2/2025, 3:07:00 PM`.
fn fmt_time(t: &DateTime<Utc>) -> String {
    t.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// The fixed-schema modal for adding a post.
pub fn new_post_modal() -> View {
    View {
        typ: ViewType::Modal,
        callback_id: Some(NEW_POST_CALLBACK_ID.into()),
        title: Some(Text::plain("Add New Post")),
        submit: Some(Text::plain("Submit")),
        close: Some(Text::plain("Cancel")),
        blocks: vec![
            Block::Input {
                block_id: CONTENT_BLOCK.into(),
                label: Text::plain("Post Content"),
                element: Element::PlainTextInput {
                    action_id: CONTENT_INPUT.into(),
                },
            },
            Block::Input {
                block_id: PLATFORM_BLOCK.into(),
                label: Text::plain("Platform"),
                element: Element::StaticSelect {
                    action_id: PLATFORM_SELECT.into(),
                    options: MODAL_PLATFORMS
                        .iter()
                        .map(|x| SelectOption::labelled(*x))
                        .collect(),
                },
            },
        ],
    }
}

/// The direct message confirming a submission.
pub fn confirmation_text(platform: &str, content: &str) -> String {
    format!("✅ New post scheduled on *{}*: {}", platform, content)
}

/// The reply to being mentioned in a channel, as notification text and
/// blocks.
pub fn greeting(user_id: &str) -> (String, Vec<Block>) {
    let hello = format!(
        "Hello <@{}>! I'm your Social Media Content Calendar bot.",
        user_id
    );

    let blocks = vec![
        Block::Section(Text::mrkdwn(hello.clone())),
        Block::Section(Text::mrkdwn(
            "I can help you manage your social media calendar. What would you like to do today?",
        )),
        Block::Section(Text::mrkdwn(CAPABILITIES)),
    ];

    (hello, blocks)
}
