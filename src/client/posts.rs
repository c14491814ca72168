//! The posts endpoints, and the store that mirrors them locally.
//!
//! The server is the source of truth. Every action performs exactly one call
//! and only applies its change once that call succeeds; a failure leaves the
//! previously held posts untouched.

use super::{
    error::ApiError,
    http::{self, ApiClient},
};
use crate::post::{Post, PostDraft, PostId};

pub async fn list(api: &ApiClient) -> Result<Vec<Post>, ApiError> {
    http::send_json(api.get("/api/posts")).await
}

pub async fn create(api: &ApiClient, draft: &PostDraft) -> Result<Post, ApiError> {
    draft.validate().map_err(ApiError::Invalid)?;
    http::send_json(api.post("/api/posts").json(draft)).await
}

pub async fn update(api: &ApiClient, id: PostId, draft: &PostDraft) -> Result<Post, ApiError> {
    draft.validate().map_err(ApiError::Invalid)?;
    http::send_json(api.put(format!("/api/posts/{}", id)).json(draft)).await
}

pub async fn delete(api: &ApiClient, id: PostId) -> Result<(), ApiError> {
    http::send(api.delete(format!("/api/posts/{}", id))).await?;
    Ok(())
}

/// A snapshot of the posts store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct PostsStore {
    state: PostsState,
}

impl PostsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PostsState {
        &self.state
    }

    /// Replace the local posts with the server's. Failures are recorded in
    /// the state rather than returned.
    pub async fn fetch_posts(&mut self, api: &ApiClient) -> &PostsState {
        self.state.loading = true;

        match list(api).await {
            Ok(posts) => {
                self.state = PostsState {
                    posts,
                    loading: false,
                    error: None,
                }
            }
            Err(e) => self.fail(&e, "Failed to fetch posts"),
        }

        &self.state
    }

    pub async fn create_post(
        &mut self,
        api: &ApiClient,
        draft: &PostDraft,
    ) -> Result<Post, ApiError> {
        self.state.loading = true;

        match create(api, draft).await {
            Ok(post) => {
                self.state.posts.push(post.clone());
                self.succeed();
                Ok(post)
            }
            Err(e) => {
                self.fail(&e, "Failed to create post");
                Err(e)
            }
        }
    }

    pub async fn update_post(
        &mut self,
        api: &ApiClient,
        id: PostId,
        draft: &PostDraft,
    ) -> Result<Post, ApiError> {
        self.state.loading = true;

        match update(api, id, draft).await {
            Ok(post) => {
                for x in self.state.posts.iter_mut().filter(|x| x.id == id) {
                    *x = post.clone();
                }
                self.succeed();
                Ok(post)
            }
            Err(e) => {
                self.fail(&e, "Failed to update post");
                Err(e)
            }
        }
    }

    pub async fn delete_post(&mut self, api: &ApiClient, id: PostId) -> Result<(), ApiError> {
        self.state.loading = true;

        match delete(api, id).await {
            Ok(_) => {
                self.state.posts.retain(|x| x.id != id);
                self.succeed();
                Ok(())
            }
            Err(e) => {
                self.fail(&e, "Failed to delete post");
                Err(e)
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    fn succeed(&mut self) {
        self.state.loading = false;
        self.state.error = None;
    }

    fn fail(&mut self, e: &ApiError, default: &str) {
        self.state.loading = false;
        self.state.error = Some(e.message_or(default));
    }
}
