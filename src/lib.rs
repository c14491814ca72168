//! A social-media content calendar.
//!
//! Two halves share this crate:
//!
//! - [client], the state model of the calendar app: an HTTP client wrapper
//!   for the REST backend, the auth and posts stores, and the view state of
//!   each page.
//! - The Slack integration service, run by the `almanac` binary: a small
//!   [router] serving a mock [calendar] endpoint, the [slack] app's Home tab
//!   and modal, and the bundled front end.

pub mod calendar;
pub mod client;
pub mod config;
mod de;
pub mod error;
pub mod post;
pub mod router;
pub mod slack;
