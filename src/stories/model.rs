use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::api::{ApiClient, ApiError, DraftStory};
use crate::user::User;

/// A single shared story. Values are cloned freely between the global list,
/// a user's own-stories list, and a user's favorites; membership anywhere is
/// decided by `story_id`, never by object identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The "all stories" list, rebuilt from the server on each fetch and spliced
/// locally after create/delete to avoid an extra round trip.
#[derive(Debug, Default)]
pub struct StoryList {
    pub stories: Vec<Story>,
}

impl StoryList {
    /// Unauthenticated read of the full story list, in server order.
    pub async fn fetch_all(api: &ApiClient) -> Result<StoryList, ApiError> {
        let stories = api.fetch_stories().await?;
        Ok(StoryList { stories })
    }

    /// Authenticated create. On success the new story lands at the front of
    /// both this list and the user's own-stories; on any failure neither list
    /// is touched.
    pub async fn add_story(
        &mut self,
        api: &ApiClient,
        user: &mut User,
        draft: &DraftStory,
    ) -> Result<Story, ApiError> {
        let story = api.create_story(&user.token, draft).await?;
        self.push_new(user, &story);
        Ok(story)
    }

    /// Authenticated delete by id. The local removal is idempotent: an id
    /// that is no longer present in either list is a silent no-op.
    pub async fn remove_story(
        &mut self,
        api: &ApiClient,
        user: &mut User,
        story_id: &str,
    ) -> Result<(), ApiError> {
        api.delete_story(&user.token, story_id).await?;
        self.drop_story(user, story_id);
        Ok(())
    }

    fn push_new(&mut self, user: &mut User, story: &Story) {
        self.stories.insert(0, story.clone());
        user.own_stories.insert(0, story.clone());
    }

    fn drop_story(&mut self, user: &mut User, story_id: &str) {
        self.stories.retain(|s| s.story_id != story_id);
        user.own_stories.retain(|s| s.story_id != story_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn story(id: &str) -> Story {
        Story {
            story_id: id.to_string(),
            title: format!("title {id}"),
            author: "author".to_string(),
            url: format!("https://example.com/{id}"),
            username: "poster".to_string(),
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00:00 UTC),
        }
    }

    fn user_with_stories(own: Vec<Story>) -> User {
        User {
            username: "alice".to_string(),
            name: "Alice".to_string(),
            created_at: datetime!(2024-01-01 00:00:00 UTC),
            updated_at: datetime!(2024-01-01 00:00:00 UTC),
            token: "tok".to_string(),
            favorites: Vec::new(),
            own_stories: own,
        }
    }

    #[test]
    fn stories_response_decodes_in_server_order() {
        let body = r#"{"stories":[
            {"storyId":"a","title":"A","author":"x","url":"https://e.com/a",
             "username":"u","createdAt":"2024-01-02T00:00:00.000Z","updatedAt":"2024-01-02T00:00:00.000Z"},
            {"storyId":"b","title":"B","author":"y","url":"https://e.com/b",
             "username":"u","createdAt":"2024-01-01T00:00:00.000Z","updatedAt":"2024-01-01T00:00:00.000Z"}
        ]}"#;
        #[derive(Deserialize)]
        struct Envelope {
            stories: Vec<Story>,
        }
        let env: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(env.stories.len(), 2);
        assert_eq!(env.stories[0].story_id, "a");
        assert_eq!(env.stories[1].story_id, "b");
    }

    #[test]
    fn push_new_prepends_to_both_lists() {
        let mut list = StoryList {
            stories: vec![story("old-1"), story("old-2")],
        };
        let mut user = user_with_stories(vec![story("old-1")]);
        let fresh = story("fresh");

        list.push_new(&mut user, &fresh);

        assert_eq!(list.stories.len(), 3);
        assert_eq!(list.stories[0].story_id, "fresh");
        assert_eq!(user.own_stories.len(), 2);
        assert_eq!(user.own_stories[0].story_id, "fresh");
    }

    #[test]
    fn drop_story_removes_matching_entries_from_both_lists() {
        let mut list = StoryList {
            stories: vec![story("keep"), story("gone")],
        };
        let mut user = user_with_stories(vec![story("gone")]);

        list.drop_story(&mut user, "gone");

        assert_eq!(list.stories.len(), 1);
        assert_eq!(list.stories[0].story_id, "keep");
        assert!(user.own_stories.is_empty());
    }

    #[test]
    fn drop_story_is_a_no_op_for_absent_ids() {
        let mut list = StoryList {
            stories: vec![story("keep")],
        };
        let mut user = user_with_stories(vec![story("keep")]);

        list.drop_story(&mut user, "never-existed");

        assert_eq!(list.stories.len(), 1);
        assert_eq!(user.own_stories.len(), 1);
    }

    #[test]
    fn drop_story_matches_independent_copies_by_id() {
        // The same logical story held as two independent copies: removal by
        // id must take out both, since identity is the id alone.
        let mut list = StoryList {
            stories: vec![story("dup"), story("other"), story("dup")],
        };
        let mut user = user_with_stories(vec![story("dup")]);

        list.drop_story(&mut user, "dup");

        assert_eq!(list.stories.len(), 1);
        assert_eq!(list.stories[0].story_id, "other");
        assert!(user.own_stories.is_empty());
    }
}
