use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs, path::PathBuf};

/// Session token and username persisted between runs so a login survives a
/// restart. Read once at startup, rewritten after every successful
/// login/signup, deleted on logout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl StoredCredentials {
    pub fn load() -> Self {
        match credentials_file_path() {
            Some(path) => Self::load_from(&path),
            None => StoredCredentials::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if path.is_file() {
            if let Ok(contents) = fs::read_to_string(path) {
                if let Ok(creds) = serde_json::from_str::<StoredCredentials>(&contents) {
                    return creds;
                }
            }
        }
        // Missing or unreadable file just means logged out
        StoredCredentials::default()
    }

    pub fn remember(token: &str, username: &str) -> Result<()> {
        let creds = StoredCredentials {
            token: Some(token.to_string()),
            username: Some(username.to_string()),
        };
        if let Some(path) = credentials_file_path() {
            creds.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn clear() -> Result<()> {
        if let Some(path) = credentials_file_path() {
            if path.is_file() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

fn credentials_file_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("stories-cli");
        p.push("session.json");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("stories-cli");
        p.push("session.json");
        return Some(p);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = env::temp_dir().join(format!("stories-cli-test-{}", std::process::id()));
        let path = dir.join("session.json");
        let creds = StoredCredentials {
            token: Some("tok-abc".to_string()),
            username: Some("alice".to_string()),
        };
        creds.save_to(&path).unwrap();

        let loaded = StoredCredentials::load_from(&path);
        assert_eq!(loaded.token.as_deref(), Some("tok-abc"));
        assert_eq!(loaded.username.as_deref(), Some("alice"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_failure_surfaces_as_an_error() {
        // Parent "directory" is a plain file, so create_dir_all must fail
        // and the caller gets an Err instead of a silent no-op.
        let dir = env::temp_dir().join(format!("stories-cli-blocked-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let creds = StoredCredentials {
            token: Some("tok".to_string()),
            username: Some("alice".to_string()),
        };
        assert!(creds.save_to(&blocker.join("session.json")).is_err());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_loads_as_logged_out() {
        let path = env::temp_dir().join("stories-cli-test-does-not-exist.json");
        let loaded = StoredCredentials::load_from(&path);
        assert!(loaded.token.is_none());
        assert!(loaded.username.is_none());
    }

    #[test]
    fn corrupt_file_loads_as_logged_out() {
        let dir = env::temp_dir().join(format!("stories-cli-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("session.json");
        fs::write(&path, "{not json").unwrap();

        let loaded = StoredCredentials::load_from(&path);
        assert!(loaded.token.is_none());

        let _ = fs::remove_dir_all(&dir);
    }
}
