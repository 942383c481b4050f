use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::stories::Story;

/// User payload as the service returns it. Signup responses omit the story
/// arrays, so both default to empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWire {
    pub username: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default)]
    pub favorites: Vec<Story>,
    #[serde(default)]
    pub stories: Vec<Story>,
}

/// Fields the user supplies when submitting a new story.
#[derive(Debug, Clone, Serialize)]
pub struct DraftStory {
    pub author: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct StoriesResponse {
    pub stories: Vec<Story>,
}

#[derive(Deserialize)]
pub(super) struct StoryResponse {
    pub story: Story,
}

#[derive(Deserialize)]
pub(super) struct UserResponse {
    pub user: UserWire,
}

#[derive(Deserialize)]
pub struct AuthResponse {
    pub user: UserWire,
    pub token: String,
}

#[derive(Serialize)]
pub(super) struct TokenBody<'a> {
    pub token: &'a str,
}

#[derive(Serialize)]
pub(super) struct CreateStoryRequest<'a> {
    pub token: &'a str,
    pub story: &'a DraftStory,
}

#[derive(Serialize)]
pub(super) struct SignupRequest<'a> {
    pub user: SignupUser<'a>,
}

#[derive(Serialize)]
pub(super) struct SignupUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    pub user: Credentials<'a>,
}

#[derive(Serialize)]
pub(super) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_hydrates_typed_stories() {
        let body = r#"{
            "user": {
                "username": "alice",
                "name": "Alice",
                "createdAt": "2024-03-01T09:30:00.000Z",
                "updatedAt": "2024-03-02T10:00:00.000Z",
                "favorites": [{
                    "storyId": "s-1",
                    "title": "First",
                    "author": "Bob",
                    "url": "https://example.com/first",
                    "username": "bob",
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "updatedAt": "2024-01-01T00:00:00.000Z"
                }],
                "stories": []
            },
            "token": "tok-123"
        }"#;
        let auth: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(auth.token, "tok-123");
        assert_eq!(auth.user.favorites.len(), 1);
        assert_eq!(auth.user.favorites[0].story_id, "s-1");
        assert_eq!(auth.user.favorites[0].created_at.year(), 2024);
    }

    #[test]
    fn signup_response_defaults_empty_story_lists() {
        let body = r#"{
            "user": {
                "username": "carol",
                "name": "Carol",
                "createdAt": "2024-05-05T12:00:00.000Z",
                "updatedAt": "2024-05-05T12:00:00.000Z"
            },
            "token": "tok-456"
        }"#;
        let auth: AuthResponse = serde_json::from_str(body).unwrap();
        assert!(auth.user.favorites.is_empty());
        assert!(auth.user.stories.is_empty());
    }
}
