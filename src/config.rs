use std::env;

use anyhow::{Result, anyhow};

/// Tracked-player identity and API credentials, read once at startup.
///
/// The display name and tag are only used to locate the player inside each
/// match roster; every per-round comparison afterwards runs on the resolved
/// puuid.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub name: String,
    pub tag: String,
    pub region: String,
    pub offline: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let offline = env_bool("VALO_OFFLINE", false);
        let api_key = env_string("HENRIK_API_KEY");
        let name = env_string("VALORANT_NAME");
        let tag = env_string("VALORANT_TAG");
        let region = env_string("VALORANT_REGION")
            .unwrap_or_else(|| "na".to_string())
            .to_ascii_lowercase();

        let mut missing = Vec::new();
        if name.is_none() {
            missing.push("VALORANT_NAME");
        }
        if tag.is_none() {
            missing.push("VALORANT_TAG");
        }
        if api_key.is_none() && !offline {
            missing.push("HENRIK_API_KEY");
        }
        if !missing.is_empty() {
            return Err(anyhow!(
                "missing environment variables: {} (check your .env file)",
                missing.join(", ")
            ));
        }

        Ok(Self {
            api_key,
            name: name.unwrap_or_default(),
            tag: tag.unwrap_or_default(),
            region,
            offline,
        })
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| {
            let t = v.trim().to_ascii_lowercase();
            !(t.is_empty() || t == "0" || t == "false" || t == "off" || t == "no")
        })
        .unwrap_or(default)
}
