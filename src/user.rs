use time::OffsetDateTime;

use crate::api::{ApiClient, ApiError, UserWire};
use crate::stories::Story;

/// The authenticated user. `favorites` and `own_stories` hold typed stories
/// hydrated from server responses; `token` is attached after login/signup and
/// sent with every authenticated call.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub token: String,
    pub favorites: Vec<Story>,
    pub own_stories: Vec<Story>,
}

impl User {
    fn from_wire(wire: UserWire, token: String) -> User {
        User {
            username: wire.username,
            name: wire.name,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            token,
            favorites: wire.favorites,
            own_stories: wire.stories,
        }
    }

    /// Register a new account and return the logged-in user.
    pub async fn signup(
        api: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<User, ApiError> {
        let auth = api.signup(username, password, name).await?;
        Ok(User::from_wire(auth.user, auth.token))
    }

    /// Log in an existing account. A 401 surfaces as `ApiError::Unauthorized`.
    pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<User, ApiError> {
        let auth = api.login(username, password).await?;
        Ok(User::from_wire(auth.user, auth.token))
    }

    /// Rebuild a user from persisted credentials. Absent or empty token or
    /// username short-circuits to `Ok(None)` without any network call; this
    /// is the only place stored credentials become an in-memory user.
    pub async fn get_logged_in(
        api: &ApiClient,
        token: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<User>, ApiError> {
        let (Some(token), Some(username)) = (token, username) else {
            return Ok(None);
        };
        if token.is_empty() || username.is_empty() {
            return Ok(None);
        }
        let wire = api.fetch_user(token, username).await?;
        Ok(Some(User::from_wire(wire, token.to_string())))
    }

    /// Overwrite every mutable profile field, including both story lists,
    /// from a fresh profile fetch.
    pub async fn retrieve_details(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let wire = api.fetch_user(&self.token, &self.username).await?;
        self.name = wire.name;
        self.created_at = wire.created_at;
        self.updated_at = wire.updated_at;
        self.favorites = wire.favorites;
        self.own_stories = wire.stories;
        Ok(())
    }

    /// Favorite a story: apply the local change first, then issue the
    /// request. A failed request reverts the local change before the error
    /// surfaces, so the list never claims a toggle the server refused. On
    /// success the full profile is resynced.
    pub async fn add_favorite(&mut self, api: &ApiClient, story: &Story) -> Result<(), ApiError> {
        let applied = if self.is_favorite(&story.story_id) {
            false
        } else {
            self.favorites.insert(0, story.clone());
            true
        };
        if let Err(err) = api
            .add_favorite(&self.token, &self.username, &story.story_id)
            .await
        {
            if applied {
                self.favorites.retain(|s| s.story_id != story.story_id);
            }
            return Err(err);
        }
        self.retrieve_details(api).await
    }

    /// Unfavorite by id, with the same apply-then-rollback contract: the
    /// removed entry goes back to its original position if the request fails.
    pub async fn remove_favorite(
        &mut self,
        api: &ApiClient,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let slot = self.favorites.iter().position(|s| s.story_id == story_id);
        let removed = slot.map(|i| self.favorites.remove(i));
        if let Err(err) = api
            .remove_favorite(&self.token, &self.username, story_id)
            .await
        {
            if let (Some(i), Some(story)) = (slot, removed) {
                self.favorites.insert(i.min(self.favorites.len()), story);
            }
            return Err(err);
        }
        self.retrieve_details(api).await
    }

    pub fn is_favorite(&self, story_id: &str) -> bool {
        self.favorites.iter().any(|s| s.story_id == story_id)
    }

    pub fn owns(&self, story_id: &str) -> bool {
        self.own_stories.iter().any(|s| s.story_id == story_id)
    }
}
