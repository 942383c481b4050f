mod model;

pub use model::{Story, StoryList};

use anyhow::Result;
use console::style;
use url::Url;

use crate::api::{ApiClient, DraftStory};
use crate::config::RuntimeConfig;
use crate::session::Session;
use crate::ui::{self, MenuChoice};
use crate::util::sanitize::sanitize_for_terminal;

/// Fetch the full story list and browse it. The list is fetched once on
/// entry and spliced locally afterwards; every selected story opens the
/// per-story action menu.
pub async fn browse_all(
    api: &ApiClient,
    session: &mut Session,
    cfg: &RuntimeConfig,
) -> Result<()> {
    match StoryList::fetch_all(api).await {
        Ok(list) => session.stories = list,
        Err(err) => {
            ui::flash_error(&err.to_string());
            return Ok(());
        }
    }
    loop {
        if session.stories.stories.is_empty() {
            ui::flash_notice("No stories yet.");
            return Ok(());
        }
        let labels: Vec<String> = session
            .stories
            .stories
            .iter()
            .map(|s| story_label(s, session.user.as_ref()))
            .collect();
        match ui::prompt_menu(
            "All stories (b = back, q = quit). Select one for actions.",
            &labels,
            None,
            cfg.header.as_deref(),
        )? {
            MenuChoice::Back => break,
            MenuChoice::Quit => std::process::exit(0),
            MenuChoice::Index(i) => {
                if let Some(story) = session.stories.stories.get(i).cloned() {
                    story_actions(api, session, story).await?;
                }
            }
        }
    }
    Ok(())
}

pub async fn browse_favorites(
    api: &ApiClient,
    session: &mut Session,
    cfg: &RuntimeConfig,
) -> Result<()> {
    loop {
        let Some(user) = session.user.as_ref() else {
            return Ok(());
        };
        if user.favorites.is_empty() {
            ui::flash_notice("No favorites added!");
            return Ok(());
        }
        // Snapshot: the action menu below may unfavorite and shrink the list.
        let favorites: Vec<Story> = user.favorites.clone();
        let labels: Vec<String> = favorites.iter().map(|s| story_label(s, Some(user))).collect();
        match ui::prompt_menu(
            "Favorites (b = back, q = quit).",
            &labels,
            None,
            cfg.header.as_deref(),
        )? {
            MenuChoice::Back => break,
            MenuChoice::Quit => std::process::exit(0),
            MenuChoice::Index(i) => {
                if let Some(story) = favorites.get(i).cloned() {
                    story_actions(api, session, story).await?;
                }
            }
        }
    }
    Ok(())
}

pub async fn browse_my_stories(
    api: &ApiClient,
    session: &mut Session,
    cfg: &RuntimeConfig,
) -> Result<()> {
    loop {
        let Some(user) = session.user.as_ref() else {
            return Ok(());
        };
        if user.own_stories.is_empty() {
            ui::flash_notice("No stories added by user yet!");
            return Ok(());
        }
        let own: Vec<Story> = user.own_stories.clone();
        let labels: Vec<String> = own.iter().map(|s| story_label(s, Some(user))).collect();
        match ui::prompt_menu(
            "My stories (b = back, q = quit).",
            &labels,
            None,
            cfg.header.as_deref(),
        )? {
            MenuChoice::Back => break,
            MenuChoice::Quit => std::process::exit(0),
            MenuChoice::Index(i) => {
                if let Some(story) = own.get(i).cloned() {
                    story_actions(api, session, story).await?;
                }
            }
        }
    }
    Ok(())
}

/// Submit form: author, title, url. The URL is validated before the request
/// so an obviously bad draft never leaves the client.
pub async fn submit_story(api: &ApiClient, session: &mut Session) -> Result<()> {
    if !session.logged_in() {
        return Ok(());
    }
    let author = ui::read_line("Author")?;
    let title = ui::read_line("Title")?;
    let url = ui::read_line("URL")?;
    match Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => {
            ui::flash_error("Story URL must start with http:// or https://");
            return Ok(());
        }
    }

    let draft = DraftStory { author, title, url };
    let Session { stories, user } = session;
    let Some(user) = user.as_mut() else {
        return Ok(());
    };
    match stories.add_story(api, user, &draft).await {
        Ok(story) => ui::flash_notice(&format!(
            "Submitted \"{}\".",
            sanitize_for_terminal(&story.title)
        )),
        Err(err) => ui::flash_error(&err.to_string()),
    }
    Ok(())
}

enum Action {
    Open,
    Favorite,
    Unfavorite,
    Delete,
}

/// Per-story menu: open in browser, toggle favorite, delete when owned.
/// Each action is one awaited request; failures flash and leave the menu up.
async fn story_actions(api: &ApiClient, session: &mut Session, story: Story) -> Result<()> {
    loop {
        let mut labels = vec![format!("Open in browser ({})", host_name(&story.url))];
        let mut actions = vec![Action::Open];
        if let Some(user) = session.user.as_ref() {
            if user.is_favorite(&story.story_id) {
                labels.push("Remove from favorites".to_string());
                actions.push(Action::Unfavorite);
            } else {
                labels.push("Add to favorites".to_string());
                actions.push(Action::Favorite);
            }
            if user.owns(&story.story_id) {
                labels.push("Delete this story".to_string());
                actions.push(Action::Delete);
            }
        }

        let prompt = format!(
            "{} (b = back, q = quit)",
            sanitize_for_terminal(&story.title)
        );
        match ui::prompt_menu(&prompt, &labels, Some(0), None)? {
            MenuChoice::Back => return Ok(()),
            MenuChoice::Quit => std::process::exit(0),
            MenuChoice::Index(i) => match actions[i] {
                Action::Open => {
                    // System default browser; there is no sensible fallback
                    // when the platform has no opener, so report it.
                    if let Err(err) = open::that(&story.url) {
                        ui::flash_error(&format!("Could not open a browser: {err}"));
                    }
                }
                Action::Favorite => {
                    if let Some(user) = session.user.as_mut() {
                        if let Err(err) = user.add_favorite(api, &story).await {
                            ui::flash_error(&err.to_string());
                        }
                    }
                }
                Action::Unfavorite => {
                    if let Some(user) = session.user.as_mut() {
                        if let Err(err) = user.remove_favorite(api, &story.story_id).await {
                            ui::flash_error(&err.to_string());
                        }
                    }
                }
                Action::Delete => {
                    let Session { stories, user } = session;
                    if let Some(user) = user.as_mut() {
                        match stories.remove_story(api, user, &story.story_id).await {
                            Ok(()) => {
                                ui::flash_notice("Story deleted.");
                                return Ok(());
                            }
                            Err(err) => ui::flash_error(&err.to_string()),
                        }
                    }
                }
            },
        }
    }
}

fn story_label(story: &Story, user: Option<&crate::user::User>) -> String {
    let title = sanitize_for_terminal(&story.title);
    let author = sanitize_for_terminal(&story.author);
    let poster = sanitize_for_terminal(&story.username);
    let host = host_name(&story.url);

    let mut label = String::new();
    if let Some(u) = user {
        if u.is_favorite(&story.story_id) {
            label.push_str(&format!("{} ", style("[*]").yellow().bold()));
        } else {
            label.push_str("[ ] ");
        }
    }
    label.push_str(&format!("{title} ({host}) by {author}, posted by {poster}"));
    label
}

/// Display host of a story URL, without a leading "www.".
pub fn host_name(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(u) => {
            let host = u.host_str().unwrap_or("unknown");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::host_name;

    #[test]
    fn host_name_strips_www_prefix() {
        assert_eq!(host_name("https://www.example.com/a/b"), "example.com");
        assert_eq!(host_name("http://news.example.org/x"), "news.example.org");
    }

    #[test]
    fn host_name_of_unparseable_url_is_unknown() {
        assert_eq!(host_name("not a url"), "unknown");
    }
}
