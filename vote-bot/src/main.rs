use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vote_bot::config::DEFAULT_SETTINGS_FILE;
use vote_bot::{BotConfig, ConsoleChannel, LoggingMode, VoteBot};

/// Chat poll bot
///
/// Reads chat messages from stdin as `<name>: <message>` (prefix the name
/// with `@` for a moderator or `#` for the broadcaster) and prints the
/// bot's replies to stdout.
#[derive(Parser, Debug)]
#[command(name = "vote-bot")]
#[command(about = "Single-channel chat poll bot driven from the console")]
#[command(version)]
struct Args {
    /// Settings file (JSON); missing is fine unless given explicitly
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel name, overriding settings and environment
    #[arg(long)]
    channel: Option<String>,

    /// Bot account name, overriding settings and environment
    #[arg(long)]
    account: Option<String>,

    /// Command prefix, overriding settings and environment
    #[arg(long)]
    prefix: Option<String>,

    /// Log output mode (falls back to VOTE_BOT_LOG_MODE)
    #[arg(long, value_enum)]
    log_mode: Option<LoggingMode>,
}

impl Args {
    /// Settings file, environment and flags, in that order
    fn resolve_config(&self) -> Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_file(path, true),
            None => BotConfig::from_file(&PathBuf::from(DEFAULT_SETTINGS_FILE), false),
        }
        .context("Failed to load settings")?;

        config.apply_env_overrides();

        if let Some(channel) = &self.channel {
            config.channel_name = channel.clone();
        }
        if let Some(account) = &self.account {
            config.account_name = account.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.command_prefix = prefix.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.log_mode {
        Some(mode) => vote_bot::init_logging(mode),
        None => vote_bot::init_logging_from_env(),
    }
    .context("Failed to initialize logging")?;

    let config = args.resolve_config()?;
    config.log_summary();

    let bot = VoteBot::new(config);
    let stdin = io::stdin();
    let mut channel = ConsoleChannel::new(bot, stdin.lock(), io::stdout());

    let summary = channel.run().context("Console channel failed")?;
    tracing::info!(
        messages = summary.messages,
        replies = summary.replies,
        skipped = summary.skipped,
        "session ended"
    );

    Ok(())
}
