mod api;
mod config;
mod credentials;
mod session;
mod stories;
mod ui;
mod user;
mod util;

use anyhow::Result;
use console::Term;
use std::env;
use time::macros::format_description;

use api::ApiClient;
use session::Session;
use ui::MenuChoice;
use util::sanitize::sanitize_for_terminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Clear terminal at startup for a clean UI
    let _ = Term::stdout().clear_screen();
    // Parse a minimal CLI: optional --config <path-or-url>
    let mut args = env::args().skip(1);
    let mut config_override: Option<String> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(v) = args.next() {
                    config_override = Some(v);
                }
            }
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
    }

    let cfg = config::load(config_override)?;
    let api = ApiClient::new(&cfg.api_base_url)?;

    // Startup check against persisted credentials
    let mut session = Session::resume(&api).await;

    enum Item {
        AllStories,
        Submit,
        Favorites,
        MyStories,
        Profile,
        Logout,
        Login,
        CreateAccount,
        Quit,
    }

    loop {
        let mut labels = vec!["All stories".to_string()];
        let mut items = vec![Item::AllStories];
        if session.logged_in() {
            labels.push("Submit a story".to_string());
            items.push(Item::Submit);
            labels.push("Favorites".to_string());
            items.push(Item::Favorites);
            labels.push("My stories".to_string());
            items.push(Item::MyStories);
            labels.push("Profile".to_string());
            items.push(Item::Profile);
            labels.push("Logout".to_string());
            items.push(Item::Logout);
        } else {
            labels.push("Login".to_string());
            items.push(Item::Login);
            labels.push("Create account".to_string());
            items.push(Item::CreateAccount);
        }
        labels.push("Quit".to_string());
        items.push(Item::Quit);

        let prompt = match session.user.as_ref() {
            Some(u) => format!("Main Menu, logged in as {} (b = quit)", u.username),
            None => "Main Menu (b = quit)".to_string(),
        };
        match ui::prompt_menu(&prompt, &labels, Some(0), cfg.header.as_deref())? {
            MenuChoice::Back | MenuChoice::Quit => break,
            MenuChoice::Index(i) => match items[i] {
                Item::AllStories => stories::browse_all(&api, &mut session, &cfg).await?,
                Item::Submit => stories::submit_story(&api, &mut session).await?,
                Item::Favorites => stories::browse_favorites(&api, &mut session, &cfg).await?,
                Item::MyStories => stories::browse_my_stories(&api, &mut session, &cfg).await?,
                Item::Profile => show_profile(&session),
                Item::Logout => match session.logout() {
                    Ok(()) => ui::flash_notice("Logged out."),
                    Err(e) => ui::flash_error(&format!("Failed to log out: {e}")),
                },
                Item::Login => login_form(&api, &mut session).await?,
                Item::CreateAccount => signup_form(&api, &mut session).await?,
                Item::Quit => break,
            },
        }
    }

    Ok(())
}

async fn login_form(api: &ApiClient, session: &mut Session) -> Result<()> {
    let username = ui::read_line("Username")?;
    let password = ui::read_password("Password")?;
    match session.login(api, &username, &password).await {
        Ok(()) => ui::flash_notice(&format!("Welcome back, {username}.")),
        Err(err) => ui::flash_error(&err.to_string()),
    }
    Ok(())
}

async fn signup_form(api: &ApiClient, session: &mut Session) -> Result<()> {
    let name = ui::read_line("Full name")?;
    let username = ui::read_line("Username")?;
    let password = ui::read_password("Password")?;
    match session.signup(api, &username, &password, &name).await {
        Ok(()) => ui::flash_notice(&format!("Account created. Welcome, {username}.")),
        Err(err) => ui::flash_error(&err.to_string()),
    }
    Ok(())
}

fn show_profile(session: &Session) {
    let Some(user) = session.user.as_ref() else {
        return;
    };
    let term = Term::stdout();
    let _ = term.clear_screen();
    let date = format_description!("[year]-[month]-[day]");
    println!("Name: {}", sanitize_for_terminal(&user.name));
    println!("Username: {}", user.username);
    println!(
        "Account created: {}",
        user.created_at.format(date).unwrap_or_default()
    );
    println!();
    println!("Press any key to return.");
    let _ = term.read_key();
}

fn print_help() {
    println!("stories-cli");
    println!("Usage: stories-cli [--config <path-or-url>]");
    println!("  --config <value>   Path to a config.toml, or an http(s) API base URL");
}
