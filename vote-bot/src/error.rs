use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while setting up or running the bot
#[derive(Error, Debug)]
pub enum BotError {
    /// Settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid JSON for the expected layout
    #[error("Invalid settings: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// Configuration values failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chat channel I/O failed
    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vote-bot operations
pub type Result<T> = std::result::Result<T, BotError>;
