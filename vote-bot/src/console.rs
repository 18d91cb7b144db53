//! Console chat channel
//!
//! A local stand-in for a chat connection: each input line is one chat
//! message written as `<name>: <message>`. A leading `@` on the name marks a
//! moderator and a leading `#` marks the broadcaster.
//!
//! ```text
//! #streamer: !newvote cats dogs
//! [#local] votebot: New Poll started. Vote with '!vote <option>'. The options are cats, dogs
//! alice: !vote cats
//! [#local] votebot: alice voted for cats
//! ```

use std::io::{BufRead, Write};

use crate::bot::{ChatRole, VoteBot};
use crate::error::Result;

/// One message read from the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub sender: String,
    pub role: ChatRole,
    pub message: String,
}

impl ChatLine {
    /// Parse `<name>: <message>`, returning `None` when there is no name
    pub fn parse(line: &str) -> Option<Self> {
        let (who, message) = line.split_once(':')?;
        let who = who.trim();

        let (role, sender) = if let Some(name) = who.strip_prefix('#') {
            (ChatRole::Broadcaster, name)
        } else if let Some(name) = who.strip_prefix('@') {
            (ChatRole::Moderator, name)
        } else {
            (ChatRole::Viewer, who)
        };

        if sender.is_empty() {
            return None;
        }

        Some(Self {
            sender: sender.to_string(),
            role,
            message: message.trim().to_string(),
        })
    }
}

/// Counters for a finished console session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines that parsed as chat messages
    pub messages: usize,
    /// Replies posted back
    pub replies: usize,
    /// Lines skipped because they had no sender
    pub skipped: usize,
}

/// Drives a [`VoteBot`] from line-oriented input
pub struct ConsoleChannel<R, W> {
    bot: VoteBot,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleChannel<R, W> {
    pub fn new(bot: VoteBot, input: R, output: W) -> Self {
        Self { bot, input, output }
    }

    /// Read messages until end of input, posting replies to the output
    pub fn run(&mut self) -> Result<SessionSummary> {
        let channel = self.bot.config().channel_name.clone();
        let account = self.bot.config().account_name.clone();
        let mut summary = SessionSummary::default();

        tracing::info!("{} connected to channel #{}.", account, channel);

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let Some(chat) = ChatLine::parse(&line) else {
                tracing::warn!(line = line.trim_end(), "expected '<name>: <message>'");
                summary.skipped += 1;
                continue;
            };
            summary.messages += 1;

            if let Some(reply) = self.bot.handle_message(&chat.sender, chat.role, &chat.message) {
                writeln!(self.output, "[#{}] {}: {}", channel, account, reply)?;
                self.output.flush()?;
                summary.replies += 1;
            }
        }

        tracing::info!("{} disconnected from channel #{}.", account, channel);
        Ok(summary)
    }

    /// Consume the channel, returning its output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
