mod error;
mod wire;

use std::time::Duration;

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub use error::ApiError;
pub use wire::{AuthResponse, DraftStory, UserWire};

use crate::stories::Story;

/// Thin client over the story-sharing service. Every method is a single
/// request/response round trip; failures map to `ApiError` and are never
/// retried.
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base =
            Url::parse(base_url).map_err(|_| ApiError::BadBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BadBaseUrl(base_url.to_string()));
        }
        let http = Client::builder()
            .user_agent("stories-cli/0.1")
            .gzip(true)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self { http, base })
    }

    pub async fn fetch_stories(&self) -> Result<Vec<Story>, ApiError> {
        let url = self.endpoint(&["stories"]);
        let resp = self.http.get(url).send().await?;
        let body: wire::StoriesResponse = decode(resp).await?;
        Ok(body.stories)
    }

    pub async fn create_story(&self, token: &str, draft: &DraftStory) -> Result<Story, ApiError> {
        let url = self.endpoint(&["stories"]);
        let body = wire::CreateStoryRequest { token, story: draft };
        let resp = self.http.post(url).json(&body).send().await?;
        let body: wire::StoryResponse = decode(resp).await?;
        Ok(body.story)
    }

    pub async fn delete_story(&self, token: &str, story_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["stories", story_id]);
        self.send_expect_ok(Method::DELETE, url, &wire::TokenBody { token })
            .await
    }

    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint(&["signup"]);
        let body = wire::SignupRequest {
            user: wire::SignupUser {
                username,
                password,
                name,
            },
        };
        let resp = self.http.post(url).json(&body).send().await?;
        decode(resp).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint(&["login"]);
        let body = wire::LoginRequest {
            user: wire::Credentials { username, password },
        };
        let resp = self.http.post(url).json(&body).send().await?;
        decode(resp).await
    }

    pub async fn fetch_user(&self, token: &str, username: &str) -> Result<UserWire, ApiError> {
        let mut url = self.endpoint(&["users", username]);
        url.query_pairs_mut().append_pair("token", token);
        let resp = self.http.get(url).send().await?;
        let body: wire::UserResponse = decode(resp).await?;
        Ok(body.user)
    }

    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id]);
        self.send_expect_ok(Method::POST, url, &wire::TokenBody { token })
            .await
    }

    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username, "favorites", story_id]);
        self.send_expect_ok(Method::DELETE, url, &wire::TokenBody { token })
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base is rejected in new(), so path_segments_mut succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    async fn send_expect_ok<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<(), ApiError> {
        let resp = self.http.request(method, url).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &text))
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let text = resp.text().await?;
    decode_body(status, &text)
}

fn decode_body<T: DeserializeOwned>(status: reqwest::StatusCode, text: &str) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::from_status(status, text));
    }
    Ok(serde_json::from_str(text)?)
}
