// Configuration module: resolves the API key and endpoint settings once
// at startup. The key can come from the process environment, a local
// `.env` file, or a per-user secrets file, in that priority order.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the secret key.
pub const KEY_ENV: &str = "OPENAI_API_KEY";

/// Well-formed keys start with this prefix. The check is deliberately
/// shallow: it catches an unset or copy-pasted-wrong key before the
/// first network call, nothing more.
pub const KEY_PREFIX: &str = "sk-";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Process-wide settings, loaded once in `main` and handed to the API
/// client. The model name and temperature are fixed; only the key and
/// the base URL are sourced from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

/// Shape of the optional secrets file. Mirrors a hosted secret store
/// for deployments where exporting environment variables is awkward.
#[derive(Deserialize)]
struct SecretsFile {
    openai_api_key: Option<String>,
}

impl Config {
    /// Load the configuration. `.env` is read first so it can populate
    /// `OPENAI_API_KEY` when the variable is not already exported;
    /// `dotenv` never overwrites an existing variable, which is exactly
    /// the priority we want. If the variable is still empty afterwards,
    /// the secrets file is consulted as a last resort.
    pub fn load() -> Result<Self> {
        // Missing `.env` is fine; most setups export the variable directly.
        dotenv::dotenv().ok();

        let env_key = std::env::var(KEY_ENV).ok();
        let have_env_key = env_key.as_deref().map_or(false, |k| !k.is_empty());

        // The secrets store is only consulted when the variable is still
        // empty, so a broken file cannot shadow a perfectly good key.
        let stored_key = if have_env_key {
            None
        } else {
            match secrets_path() {
                Ok(path) => read_secrets_file(&path)?,
                Err(_) => None,
            }
        };
        let api_key = resolve_key(env_key, stored_key).unwrap_or_default();

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        Ok(Config {
            api_key,
            base_url,
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Shallow well-formedness check used by the startup gate.
    pub fn key_is_well_formed(&self) -> bool {
        self.api_key.starts_with(KEY_PREFIX)
    }

    /// First characters of the key followed by a fixed mask, for the
    /// key-check feedback line. Never returns the whole key.
    pub fn masked_key(&self) -> String {
        let prefix: String = self.api_key.chars().take(8).collect();
        format!("{}******", prefix)
    }
}

/// Pick the effective key: a non-empty environment value wins over a
/// non-empty stored value. Kept as a pure function so the priority
/// order is testable without touching the process environment.
fn resolve_key(env_key: Option<String>, stored_key: Option<String>) -> Option<String> {
    env_key
        .filter(|k| !k.is_empty())
        .or_else(|| stored_key.filter(|k| !k.is_empty()))
}

/// Location of the per-user secrets file.
fn secrets_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("consult").join("secrets.json"))
}

/// Read the key from the secrets file. A missing file simply yields no
/// key; a present-but-unreadable one is reported so the user learns why
/// their stored key is not picked up.
fn read_secrets_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read secrets file {}", path.display()))?;
    let secrets: SecretsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse secrets file {}", path.display()))?;
    Ok(secrets.openai_api_key.filter(|k| !k.is_empty()))
}
