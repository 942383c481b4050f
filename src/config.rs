use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub api_base_url: Option<String>,
    pub header: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api_base_url: String,
    pub header: Option<String>,
}

pub fn load(override_arg: Option<String>) -> Result<RuntimeConfig> {
    // An override is either a config.toml path or a base URL to use directly.
    if let Some(value) = override_arg {
        let p = PathBuf::from(&value);
        if p.is_file() {
            let txt = fs::read_to_string(&p)
                .with_context(|| format!("failed to read config: {}", value))?;
            let parsed: AppConfig =
                toml::from_str(&txt).with_context(|| format!("failed to parse toml: {}", value))?;
            return Ok(runtime_from(parsed));
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            return Ok(RuntimeConfig {
                api_base_url: value,
                header: None,
            });
        }
        anyhow::bail!("--config expects a config.toml path or an http(s) base URL: {value}");
    }

    // Otherwise, try the default config path
    if let Some(path) = default_config_path() {
        if path.is_file() {
            let txt = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let parsed: AppConfig = toml::from_str(&txt)
                .with_context(|| format!("failed to parse toml: {}", path.display()))?;
            return Ok(runtime_from(parsed));
        }
    }

    // Built-in defaults: the hosted service
    Ok(RuntimeConfig {
        api_base_url: DEFAULT_API_BASE_URL.to_string(),
        header: None,
    })
}

fn runtime_from(parsed: AppConfig) -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: parsed
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        header: parsed.header,
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("stories-cli");
        p.push("config.toml");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("stories-cli");
        p.push("config.toml");
        return Some(p);
    }
    None
}
