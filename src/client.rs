//! The client-side state model of the calendar app: an HTTP client wrapper,
//! the auth and posts stores, and the view state built on top of them.
//!
//! Data flows one way. A view calls a store action, the action performs a
//! single request through an [http::ApiClient], and the response is merged
//! into the store's state for the view to render.

pub mod ai;
pub mod app;
pub mod auth;
pub mod error;
pub mod guard;
pub mod http;
pub mod posts;
pub mod token;
pub mod view;
