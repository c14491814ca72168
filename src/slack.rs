//! The Slack app: a Home tab listing the calendar, a modal for adding posts,
//! and a greeting when mentioned.
//!
//! Slack delivers events and interactions to [router::slack_router]; each is
//! handled independently in [dispatch], calling back out to Slack's Web API
//! through [api::SlackClient].

pub mod api;
pub mod auth;
pub mod block;
mod dispatch;
pub mod error;
pub mod events;
pub mod home;
pub mod message;
pub mod router;
pub mod view;
