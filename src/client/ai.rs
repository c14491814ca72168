//! One-shot content generation. No streaming, retry, or cancellation.

use super::{
    error::ApiError,
    http::{self, ApiClient},
};
use crate::post::{Platform, Tone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub platform: Platform,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

pub async fn generate(
    api: &ApiClient,
    req: &GenerateRequest,
) -> Result<GenerateResponse, ApiError> {
    if req.topic.trim().is_empty() {
        return Err(ApiError::Invalid("A topic is required".into()));
    }

    http::send_json(api.post("/api/ai/generate").json(req)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use url::Url;

    #[tokio::test]
    async fn test_generate() {
        let mut srv = mockito::Server::new_async().await;
        let m = srv
            .mock("POST", "/api/ai/generate")
            .match_body(Matcher::Json(serde_json::json!({
                "topic": "launch",
                "platform": "linkedin",
                "tone": "casual"
            })))
            .with_body(r#"{"content": "We launched!", "suggestions": ["a", "b"]}"#)
            .create_async()
            .await;

        let api = ApiClient::new(Url::parse(&srv.url()).unwrap());
        let res = generate(
            &api,
            &GenerateRequest {
                topic: "launch".into(),
                platform: Platform::LinkedIn,
                tone: Tone::Casual,
            },
        )
        .await
        .unwrap();

        m.assert_async().await;
        assert_eq!(res.content, "We launched!");
        assert_eq!(res.suggestions, vec!["a", "b"]);
    }

    #[test]
    fn test_default_request() {
        let req = GenerateRequest::default();
        assert_eq!(req.platform, Platform::Twitter);
        assert_eq!(req.tone, Tone::Professional);
    }
}
