//! VoteBot - glue between a chat channel and the poll
//!
//! A chat client hands every message it receives to [`VoteBot::handle_message`]
//! and posts back whatever string comes out.

use std::sync::Arc;

use poll_core::PollManager;

use crate::command::ChatCommand;
use crate::config::BotConfig;
use crate::dispatcher::{CommandDispatcher, Issuer};

/// Who is speaking in the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatRole {
    Viewer,
    Moderator,
    Broadcaster,
}

impl ChatRole {
    /// Broadcasters and moderators may run poll administration commands
    pub fn is_privileged(&self) -> bool {
        matches!(self, ChatRole::Moderator | ChatRole::Broadcaster)
    }
}

/// A poll bot for one channel
///
/// # Example
///
/// ```rust
/// use vote_bot::{BotConfig, ChatRole, VoteBot};
///
/// let bot = VoteBot::new(BotConfig::default());
///
/// let reply = bot.handle_message("streamer", ChatRole::Broadcaster, "!newvote cats dogs");
/// assert!(reply.unwrap().starts_with("New Poll started"));
///
/// let reply = bot.handle_message("alice", ChatRole::Viewer, "!vote cats");
/// assert_eq!(reply.as_deref(), Some("alice voted for cats"));
///
/// // Ordinary chat gets no reply
/// assert!(bot.handle_message("alice", ChatRole::Viewer, "hello").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct VoteBot {
    config: BotConfig,
    dispatcher: CommandDispatcher,
}

impl VoteBot {
    /// Create a bot with a fresh poll manager
    pub fn new(config: BotConfig) -> Self {
        Self::with_manager(config, Arc::new(PollManager::new()))
    }

    /// Create a bot around an existing poll manager
    pub fn with_manager(config: BotConfig, polls: Arc<PollManager>) -> Self {
        Self {
            config,
            dispatcher: CommandDispatcher::new(polls),
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Handle one chat message, returning the reply to post
    pub fn handle_message(&self, sender: &str, role: ChatRole, message: &str) -> Option<String> {
        let command = ChatCommand::parse(message, &self.config.command_prefix)?;
        let issuer = Issuer::new(sender, role.is_privileged());

        self.dispatcher.handle(&issuer, &command)
    }
}
