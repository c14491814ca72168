//! View state for the pages and components of the app. Views hold only their
//! own form state; anything shared lives in the stores and is passed in.

use super::{
    ai::{self, GenerateRequest, GenerateResponse},
    http::ApiClient,
    posts::{self, PostsState, PostsStore},
};
use crate::post::{Platform, Post, PostDraft, PostId, Tone};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::error;

/// A view whose contents arrive asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::NotLoaded
    }
}

impl<T> ViewState<T> {
    /// Start loading, unless already loaded.
    pub fn begin(&mut self) {
        if let ViewState::NotLoaded = self {
            *self = ViewState::Loading;
        }
    }

    pub fn resolve(&mut self, x: T) {
        *self = ViewState::Loaded(x);
    }

    /// Whether a loading indicator should be shown in place of the view.
    pub fn shows_indicator(&self) -> bool {
        !matches!(self, ViewState::Loaded(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(x) => Some(x),
            _ => None,
        }
    }

    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Loaded(x) => Some(x),
            _ => None,
        }
    }
}

// Navbar

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavItem; 5] = [
    NavItem { name: "Dashboard", href: "/" },
    NavItem { name: "Calendar", href: "/calendar" },
    NavItem { name: "Posts", href: "/posts" },
    NavItem { name: "Analytics", href: "/analytics" },
    NavItem { name: "Settings", href: "/settings" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub item: NavItem,
    pub active: bool,
}

/// The navigation links, with the one matching `current_path` marked active.
pub fn navbar(current_path: &str) -> Vec<NavLink> {
    NAVIGATION
        .iter()
        .map(|item| NavLink {
            item: *item,
            active: item.href == current_path,
        })
        .collect()
}

// Posts page

pub const EMPTY_POSTS_TEXT: &str = "No posts found. Create your first post!";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";

const PREVIEW_LEN: usize = 50;

/// A post as it's displayed in the posts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: PostId,
    pub content: String,
    pub platform: &'static str,
    pub status: String,
    pub scheduled: String,
}

impl From<&Post> for PostRow {
    fn from(p: &Post) -> Self {
        PostRow {
            id: p.id,
            content: preview(&p.content),
            platform: p.platform.name(),
            status: capitalise(&p.status),
            scheduled: fmt_schedule(p.scheduled_time.as_ref()),
        }
    }
}

/// Shorten long content to its first 50 characters followed by an ellipsis.
///
/// ```
/// use almanac::client::view::preview;
///
/// assert_eq!(preview("short"), "short");
/// assert_eq!(preview(&"x".repeat(51)), format!("{}...", "x".repeat(50)));
/// ```
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_LEN) {
        Some((i, _)) => format!("{}...", &content[..i]),
        None => content.to_owned(),
    }
}

/// For example `Mar 4, 2025 3:07 PM`, or `-` when unscheduled.
pub fn fmt_schedule(t: Option<&DateTime<Utc>>) -> String {
    match t {
        Some(t) => t.format("%b %-d, %Y %-I:%M %p").to_string(),
        None => "-".into(),
    }
}

fn capitalise(s: &str) -> String {
    let mut cs = s.chars();
    match cs.next() {
        Some(c) => c.to_uppercase().chain(cs).collect(),
        None => String::new(),
    }
}

/// The posts page: a table over the posts store, plus the create/edit modal.
#[derive(Default)]
pub struct PostsPage {
    store: PostsStore,
    modal: Option<PostModal>,
    loaded: bool,
}

impl PostsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PostsState {
        self.store.state()
    }

    /// The spinner is shown until the first fetch has completed.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn rows(&self) -> Vec<PostRow> {
        self.store.state().posts.iter().map(PostRow::from).collect()
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.store.fetch_posts(api).await;
        self.loaded = true;
    }

    pub fn modal(&self) -> Option<&PostModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut PostModal> {
        self.modal.as_mut()
    }

    pub fn open_create(&mut self) {
        self.modal = Some(PostModal::new(None));
    }

    /// Returns false if no such post is loaded.
    pub fn open_edit(&mut self, id: PostId) -> bool {
        let post = self.store.state().posts.iter().find(|x| x.id == id);

        match post {
            Some(p) => {
                self.modal = Some(PostModal::new(Some(p)));
                true
            }
            None => false,
        }
    }

    /// Closing drops any unsaved form state, AI suggestions included.
    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Submit the open modal. On success the modal closes and the whole list
    /// is fetched again; on failure the modal stays open with its error.
    pub async fn submit_modal(&mut self, api: &ApiClient) -> bool {
        let saved = match self.modal.as_mut() {
            Some(m) => m.submit(api).await.is_some(),
            None => false,
        };

        if saved {
            self.close_modal();
            self.load(api).await;
        }

        saved
    }

    /// Delete a post once `confirm` agrees to [DELETE_CONFIRMATION].
    pub async fn delete<F>(&mut self, api: &ApiClient, id: PostId, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_CONFIRMATION) {
            return false;
        }

        match self.store.delete_post(api, id).await {
            Ok(_) => true,
            Err(e) => {
                error!("Error deleting post: {}", e);
                false
            }
        }
    }
}

// Post modal

const SCHEDULE_INPUT_FMT: &str = "%Y-%m-%dT%H:%M";

/// One entry of a select: the value it stands for and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<T> {
    pub value: T,
    pub label: &'static str,
}

/// The platform select, shared by the modal and the generator.
pub fn platform_choices() -> Vec<Choice<Platform>> {
    Platform::ALL
        .iter()
        .map(|&x| Choice {
            value: x,
            label: x.name(),
        })
        .collect()
}

pub fn tone_choices() -> Vec<Choice<Tone>> {
    Tone::ALL
        .iter()
        .map(|&x| Choice {
            value: x,
            label: x.name(),
        })
        .collect()
}

/// The editable fields of the modal's form. `scheduled_time` holds the raw
/// `datetime-local` input value, empty when unscheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub content: String,
    pub platform: Platform,
    pub scheduled_time: String,
}

impl PostForm {
    pub fn to_draft(&self) -> Result<PostDraft, String> {
        let draft = PostDraft::new(self.content.clone(), self.platform);
        if self.scheduled_time.is_empty() {
            return Ok(draft);
        }

        let naive = NaiveDateTime::parse_from_str(&self.scheduled_time, SCHEDULE_INPUT_FMT)
            .map_err(|_| format!("Invalid schedule time: {}", self.scheduled_time))?;

        Ok(draft.scheduled_at(Utc.from_utc_datetime(&naive)))
    }
}

/// Create a post, or edit an existing one.
pub struct PostModal {
    editing: Option<PostId>,
    pub form: PostForm,
    loading: bool,
    error: Option<String>,
    generator: Option<AiGenerator>,
    suggestions: Vec<String>,
}

impl PostModal {
    pub fn new(post: Option<&Post>) -> Self {
        let form = match post {
            Some(p) => PostForm {
                content: p.content.clone(),
                platform: p.platform,
                scheduled_time: p
                    .scheduled_time
                    .map(|t| t.format(SCHEDULE_INPUT_FMT).to_string())
                    .unwrap_or_default(),
            },
            None => PostForm {
                content: String::new(),
                platform: Platform::default(),
                scheduled_time: String::new(),
            },
        };

        PostModal {
            editing: post.map(|p| p.id),
            form,
            loading: false,
            error: None,
            generator: None,
            suggestions: Vec::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.editing {
            Some(_) => "Edit Post",
            None => "Create Post",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.loading, self.editing) {
            (true, _) => "Saving...",
            (false, Some(_)) => "Update",
            (false, None) => "Create",
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Changing platform invalidates any suggestions generated for the old one.
    pub fn set_platform(&mut self, p: Platform) {
        if self.form.platform != p {
            self.suggestions.clear();
        }
        self.form.platform = p;
    }

    /// Swap the form for the AI generator, starting on the post's platform.
    pub fn open_generator(&mut self) {
        let mut g = AiGenerator::default();
        g.request.platform = self.form.platform;
        self.generator = Some(g);
    }

    pub fn generator(&self) -> Option<&AiGenerator> {
        self.generator.as_ref()
    }

    pub fn generator_mut(&mut self) -> Option<&mut AiGenerator> {
        self.generator.as_mut()
    }

    pub fn set_generator_platform(&mut self, p: Platform) {
        if let Some(g) = self.generator.as_mut() {
            if g.request.platform != p {
                self.suggestions.clear();
            }
            g.request.platform = p;
        }
    }

    pub fn set_generator_tone(&mut self, t: Tone) {
        if let Some(g) = self.generator.as_mut() {
            if g.request.tone != t {
                self.suggestions.clear();
            }
            g.request.tone = t;
        }
    }

    /// Run the generator. On success its content replaces the form's, its
    /// suggestions are offered, and the form is shown again.
    pub async fn generate(&mut self, api: &ApiClient) -> Option<Toast> {
        let g = self.generator.as_mut()?;

        match g.submit(api).await {
            Ok((res, toast)) => {
                self.form.content = res.content;
                self.suggestions = res.suggestions;
                self.generator = None;
                Some(toast)
            }
            Err(toast) => Some(toast),
        }
    }

    pub fn apply_suggestion(&mut self, index: usize) {
        if let Some(s) = self.suggestions.get(index) {
            self.form.content = s.clone();
        }
    }

    /// Create or update depending on whether an existing post was given.
    /// Errors are kept for inline display.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<Post> {
        self.loading = true;
        self.error = None;

        let res = match self.form.to_draft() {
            Err(e) => Err(e),
            Ok(draft) => {
                let res = match self.editing {
                    Some(id) => posts::update(api, id, &draft).await,
                    None => posts::create(api, &draft).await,
                };
                res.map_err(|e| e.message_or("An error occurred"))
            }
        };

        self.loading = false;

        match res {
            Ok(p) => Some(p),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

// AI generator

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

#[derive(Debug, Default)]
pub struct AiGenerator {
    pub request: GenerateRequest,
    is_loading: bool,
}

impl AiGenerator {
    pub fn button_label(&self) -> &'static str {
        if self.is_loading {
            "Generating..."
        } else {
            "Generate Content"
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) -> Result<(GenerateResponse, Toast), Toast> {
        self.is_loading = true;
        let res = ai::generate(api, &self.request).await;
        self.is_loading = false;

        match res {
            Ok(x) => Ok((x, Toast::Success("Content generated successfully!".into()))),
            Err(e) => Err(Toast::Error(e.message_or("Failed to generate content"))),
        }
    }
}
