//! The scheduling data model shared by the client state and its views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Posts are owned by the server; an `id` is only ever assigned there.
pub type PostId = i64;

/// The fixed set of platforms a post may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::Instagram,
        Platform::Facebook,
    ];

    /// The wire identifier, as the API expects it.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Twitter
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A scheduled social-media message as returned by the API.
///
/// `status` is assigned by the server (`draft`, `scheduled`, `published`,
/// `failed` have been observed) and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub platform: Platform,
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

/// The body of a create or update request.
// `scheduled_time` is deliberately serialised as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDraft {
    pub content: String,
    pub platform: Platform,
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl PostDraft {
    pub fn new<T: Into<String>>(content: T, platform: Platform) -> Self {
        PostDraft {
            content: content.into(),
            platform,
            scheduled_time: None,
        }
    }

    pub fn scheduled_at(mut self, at: DateTime<Utc>) -> Self {
        self.scheduled_time = Some(at);
        self
    }

    /// The only invariant enforced before a draft leaves the client: content
    /// must not be blank. The platform is guaranteed by its type.
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            Err("Post content must not be empty".into())
        } else {
            Ok(())
        }
    }
}

/// The authenticated account, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

/// Voice requested from the content generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Friendly,
    Humorous,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Professional, Tone::Casual, Tone::Friendly, Tone::Humorous];

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Humorous => "Humorous",
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Professional
    }
}
