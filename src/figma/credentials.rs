use crate::error::CredentialError;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables checked in order
pub const TOKEN_ENV_VARS: [&str; 2] = ["FIGMA_ACCESS_TOKEN", "FIGMA_TOKEN"];

/// Keys read from `mcpServers.figma.env` in a config file, in order
const CONFIG_TOKEN_KEYS: [&str; 2] = ["FIGMA_ACCESS_TOKEN", "FIGMA_PERSONAL_ACCESS_TOKEN"];

/// Personal access token sent as `X-Figma-Token`
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[cfg(test)]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Config files that may hold a Figma MCP server token, relative to the home directory
pub fn default_candidates(env: impl Fn(&str) -> Option<String>) -> Vec<PathBuf> {
    let Some(home) = env("HOME").or_else(|| env("USERPROFILE")) else {
        return Vec::new();
    };
    let home = PathBuf::from(home);

    vec![
        home.join(".config/claude/config.json"),
        home.join("AppData/Roaming/Claude/config.json"),
    ]
}

/// Resolve the access token from the environment, then from config files.
///
/// The first non-empty value wins. Unreadable or malformed config files are
/// skipped without error.
pub fn resolve_token(
    env: impl Fn(&str) -> Option<String>,
    candidates: &[PathBuf],
) -> Result<Credential, CredentialError> {
    for name in TOKEN_ENV_VARS {
        if let Some(token) = env(name).filter(|t| !t.is_empty()) {
            debug!("Using token from ${}", name);
            return Ok(Credential(token));
        }
    }

    for path in candidates {
        if let Some(token) = token_from_config(path) {
            debug!("Using token from {}", path.display());
            return Ok(Credential(token));
        }
    }

    Err(CredentialError::NotFound {
        searched: candidates.to_vec(),
    })
}

fn token_from_config(path: &Path) -> Option<String> {
    if !path.exists() {
        debug!("Config file {} does not exist", path.display());
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Skipping unreadable config file {}: {}", path.display(), e);
            return None;
        }
    };

    let config: Value = match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            debug!("Skipping malformed config file {}: {}", path.display(), e);
            return None;
        }
    };

    let env = config.pointer("/mcpServers/figma/env")?;
    CONFIG_TOKEN_KEYS
        .iter()
        .filter_map(|key| env.get(key).and_then(Value::as_str))
        .find(|token| !token.is_empty())
        .map(str::to_string)
}
