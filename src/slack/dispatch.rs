//! What happens in response to each supported event and interaction.
//!
//! Every handler is stateless: the Home tab is rebuilt from the calendar API
//! each time, and submitted posts aren't stored anywhere.

use super::{
    events::{Event, Interaction, SubmittedState},
    home::*,
};
use crate::{calendar, error::Failure, router::Deps};
use tracing::info;

pub async fn on_event(deps: &Deps, event: &Event) -> Result<(), Failure> {
    match event {
        Event::AppHomeOpened { user } => publish_home(deps, user).await,
        Event::AppMention { user, channel } => {
            let (text, blocks) = greeting(user);
            deps.slack_client
                .post_message(channel, &text, &blocks)
                .await?;
            Ok(())
        }
        Event::Other => {
            info!("Ignoring unsupported event");
            Ok(())
        }
    }
}

pub async fn on_interaction(deps: &Deps, interaction: &Interaction) -> Result<(), Failure> {
    match interaction {
        Interaction::BlockActions {
            trigger_id,
            actions,
            ..
        } if actions.iter().any(|x| x.action_id == ADD_NEW_POST_ACTION) => {
            deps.slack_client
                .open_view(trigger_id, &new_post_modal())
                .await?;
            Ok(())
        }
        Interaction::ViewSubmission { user, view } if view.callback_id == NEW_POST_CALLBACK_ID => {
            new_post_submitted(deps, &user.id, &view.state).await
        }
        _ => {
            info!("Ignoring unsupported interaction");
            Ok(())
        }
    }
}

/// Fetch the calendar and render it to the user's Home tab.
async fn publish_home(deps: &Deps, user_id: &str) -> Result<(), Failure> {
    let entries = calendar::fetch(deps.slack_client.http(), &deps.calendar_base)
        .await
        .map_err(Failure::CalendarRequestFailed)?;

    deps.slack_client
        .publish_view(user_id, &home_view(user_id, &entries))
        .await?;

    Ok(())
}

/// Confirm the submission to the user by direct message, then redraw their
/// Home tab.
async fn new_post_submitted(
    deps: &Deps,
    user_id: &str,
    state: &SubmittedState,
) -> Result<(), Failure> {
    let content = state
        .text(CONTENT_BLOCK, CONTENT_INPUT)
        .ok_or(Failure::IncompleteSubmission(CONTENT_INPUT))?;
    let platform = state
        .selected(PLATFORM_BLOCK, PLATFORM_SELECT)
        .ok_or(Failure::IncompleteSubmission(PLATFORM_SELECT))?;

    // A user's ID doubles as the channel of their direct messages with us.
    deps.slack_client
        .post_message(user_id, &confirmation_text(platform, content), &[])
        .await?;

    publish_home(deps, user_id).await
}
