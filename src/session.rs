use anyhow::Result;

use crate::api::{ApiClient, ApiError};
use crate::credentials::StoredCredentials;
use crate::stories::StoryList;
use crate::user::User;

/// The two pieces of mutable application state: the last fetched story list
/// and the current user. Handlers receive this explicitly instead of
/// reaching for globals.
#[derive(Default)]
pub struct Session {
    pub stories: StoryList,
    pub user: Option<User>,
}

impl Session {
    /// Startup check: try to rebuild the user from persisted credentials.
    /// Transport or auth failures leave the session logged out rather than
    /// aborting startup; stale credentials are simply ignored.
    pub async fn resume(api: &ApiClient) -> Session {
        let creds = StoredCredentials::load();
        let user = match User::get_logged_in(
            api,
            creds.token.as_deref(),
            creds.username.as_deref(),
        )
        .await
        {
            Ok(user) => user,
            Err(err) => {
                if err.is_unauthorized() {
                    // Stale token; forget it so the next run skips the check
                    let _ = StoredCredentials::clear();
                } else {
                    eprintln!("Could not restore session: {err}");
                }
                None
            }
        };
        Session {
            stories: StoryList::default(),
            user,
        }
    }

    pub async fn login(&mut self, api: &ApiClient, username: &str, password: &str) -> Result<(), ApiError> {
        let user = User::login(api, username, password).await?;
        if let Err(err) = StoredCredentials::remember(&user.token, &user.username) {
            eprintln!("Could not persist session (login will not survive restart): {err}");
        }
        self.user = Some(user);
        Ok(())
    }

    pub async fn signup(
        &mut self,
        api: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let user = User::signup(api, username, password, name).await?;
        if let Err(err) = StoredCredentials::remember(&user.token, &user.username) {
            eprintln!("Could not persist session (login will not survive restart): {err}");
        }
        self.user = Some(user);
        Ok(())
    }

    /// Clear the persisted credentials and drop the in-memory user.
    pub fn logout(&mut self) -> Result<()> {
        StoredCredentials::clear()?;
        self.user = None;
        Ok(())
    }

    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }
}
