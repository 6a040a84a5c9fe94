use crate::command::{CommandTemplate, Placeholder};
use crate::language::{LanguageCode, DEFAULT_PREFERRED_LANGUAGE};
use crate::select::SelectionPolicy;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "streambest-config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Ingest base URL, the stream key is appended verbatim
    pub ingest: String,
    pub key: String,
    pub pref_language: String,
    /// Take the first audio stream without a language as a primary match
    pub force_untagged_audio: bool,
    pub command: CommandTemplate,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            ingest: "rtmp://localhost/live/".to_string(),
            key: String::new(),
            pref_language: DEFAULT_PREFERRED_LANGUAGE.to_string(),
            force_untagged_audio: false,
            command: CommandTemplate::default_restream(),
        }
    }
}

impl StreamConfig {
    pub fn preferred_language(&self) -> Result<LanguageCode> {
        LanguageCode::parse(&self.pref_language).ok_or_else(|| {
            anyhow::anyhow!("pref_language {:?} is not a valid language code", self.pref_language)
        })
    }

    pub fn selection_policy(&self) -> Result<SelectionPolicy> {
        Ok(SelectionPolicy::new(
            self.preferred_language()?,
            self.force_untagged_audio,
        ))
    }
}

/// Load and validate the config file
///
/// A path that cannot be read is an error. Without a path the defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<StreamConfig> {
    let config = if let Some(config_path) = path {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {:?}: {}", config_path, e)
        })?;

        parse_config(config_path, &contents)?
    } else {
        #[cfg(not(test))]
        tracing::info!("No config path provided, using defaults");
        StreamConfig::default()
    };

    validate_config(&config)?;
    Ok(config)
}

/// `.toml` files are parsed as TOML, anything else as JSON
fn parse_config(path: &Path, contents: &str) -> Result<StreamConfig> {
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str::<StreamConfig>(contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML config: {}", e))
    } else {
        serde_json::from_str::<StreamConfig>(contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON config: {}", e))
    }
}

pub fn validate_config(config: &StreamConfig) -> Result<()> {
    if config.command.is_empty() {
        anyhow::bail!("command cannot be empty");
    }

    config.preferred_language()?;

    if config.command.references(Placeholder::Target) && config.ingest.is_empty() {
        anyhow::bail!("ingest must be set when the command uses $target");
    }

    Ok(())
}
