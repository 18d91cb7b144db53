//! Bot configuration
//!
//! Values are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. The JSON settings file (`appsettings.json` unless told otherwise)
//! 3. `VOTE_BOT_*` environment variables
//! 4. Command-line flags (applied by the binary)
//!
//! The settings file keeps its bot section under `"bot"` or `"TwitchInfo"`,
//! with either snake_case or PascalCase keys:
//!
//! ```json
//! {
//!   "TwitchInfo": {
//!     "AccountName": "pollbot",
//!     "AccessToken": "oauth:...",
//!     "ChannelName": "mychannel"
//!   }
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BotError, Result};

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "appsettings.json";

pub const DEFAULT_ACCOUNT_NAME: &str = "votebot";
pub const DEFAULT_CHANNEL_NAME: &str = "local";
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Resolved bot configuration
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Name the bot posts replies as
    pub account_name: String,
    /// Chat credential; only carried, never logged
    pub access_token: Option<String>,
    /// Channel the bot serves
    pub channel_name: String,
    /// Leading text that marks a chat message as a command
    pub command_prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            account_name: DEFAULT_ACCOUNT_NAME.to_string(),
            access_token: None,
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
        }
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("account_name", &self.account_name)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("channel_name", &self.channel_name)
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// On-disk layout of the settings file
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default, alias = "TwitchInfo")]
    bot: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsSection {
    #[serde(alias = "AccountName")]
    account_name: Option<String>,
    #[serde(alias = "AccessToken")]
    access_token: Option<String>,
    #[serde(alias = "ChannelName")]
    channel_name: Option<String>,
    #[serde(alias = "CommandPrefix")]
    command_prefix: Option<String>,
}

impl BotConfig {
    /// Defaults overlaid with the settings in `json`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: SettingsFile = serde_json::from_str(json)?;
        let mut config = Self::default();
        config.apply_section(settings.bot);
        Ok(config)
    }

    /// Defaults overlaid with the settings file at `path`
    ///
    /// When `required` is false a missing file yields the defaults.
    pub fn from_file(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                tracing::debug!(path = %path.display(), "loaded settings file");
                Self::from_json_str(&json)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(BotError::SettingsRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply `VOTE_BOT_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides looked up through `lookup`
    ///
    /// Recognized keys: `VOTE_BOT_ACCOUNT_NAME`, `VOTE_BOT_ACCESS_TOKEN`,
    /// `VOTE_BOT_CHANNEL`, `VOTE_BOT_PREFIX`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.apply_section(SettingsSection {
            account_name: lookup("VOTE_BOT_ACCOUNT_NAME"),
            access_token: lookup("VOTE_BOT_ACCESS_TOKEN"),
            channel_name: lookup("VOTE_BOT_CHANNEL"),
            command_prefix: lookup("VOTE_BOT_PREFIX"),
        });
    }

    fn apply_section(&mut self, section: SettingsSection) {
        if let Some(account_name) = section.account_name {
            self.account_name = account_name;
        }
        if let Some(token) = section.access_token {
            self.access_token = Some(token);
        }
        if let Some(channel_name) = section.channel_name {
            self.channel_name = channel_name;
        }
        if let Some(prefix) = section.command_prefix {
            self.command_prefix = prefix;
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.account_name.trim().is_empty() {
            return Err(BotError::InvalidConfig("account name must not be empty".to_string()));
        }

        if self.channel_name.trim().is_empty() {
            return Err(BotError::InvalidConfig("channel name must not be empty".to_string()));
        }

        if self.command_prefix.is_empty() || self.command_prefix.chars().any(char::is_whitespace) {
            return Err(BotError::InvalidConfig(format!(
                "command prefix '{}' must be non-empty and contain no whitespace",
                self.command_prefix
            )));
        }

        Ok(())
    }

    /// Log the configuration (token redacted)
    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  Account: {}", self.account_name);
        tracing::info!("  Channel: #{}", self.channel_name);
        tracing::info!("  Command prefix: {}", self.command_prefix);
        tracing::info!(
            "  Access token: {}",
            if self.access_token.is_some() { "set" } else { "not set" }
        );
    }
}
