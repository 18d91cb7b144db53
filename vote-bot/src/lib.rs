//! # Vote Bot
//!
//! Chat front end for [`poll_core`]: parses `!commands` out of chat
//! messages, checks who may run them, applies them to the channel's poll and
//! produces the reply to post.
//!
//! ## Commands
//!
//! | command | arguments | who |
//! |---|---|---|
//! | `!vote <option>` | exactly one | anyone |
//! | `!newvote <a> <b> ...` | two or more | broadcaster / moderator |
//! | `!enablevote` | none | broadcaster / moderator |
//! | `!disablevote` | none | broadcaster / moderator |
//! | `!options` | none | anyone |
//! | `!winner <option>` | exactly one | broadcaster / moderator |
//!
//! Unknown commands and ordinary chat produce no reply.
//!
//! ## Usage
//!
//! ```rust
//! use vote_bot::{CommandDispatcher, Issuer};
//!
//! fn args(items: &[&str]) -> Vec<String> {
//!     items.iter().map(|s| s.to_string()).collect()
//! }
//!
//! let dispatcher = CommandDispatcher::default();
//!
//! dispatcher.dispatch(&Issuer::moderator("mod"), "newvote", &args(&["red", "blue"]));
//! let reply = dispatcher.dispatch(&Issuer::viewer("alice"), "vote", &args(&["Red"]));
//! assert_eq!(reply.as_deref(), Some("alice voted for Red"));
//!
//! let reply = dispatcher.dispatch(&Issuer::viewer("alice"), "winner", &args(&["red"]));
//! assert_eq!(reply.as_deref(), Some("Not Authorized"));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! chat line ──► ChatCommand::parse ──► CommandDispatcher ──► PollManager
//!                                            │
//!                              Option<String> reply ◄──┘
//! ```

pub mod bot;
pub mod command;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use bot::{ChatRole, VoteBot};
pub use command::{ChatCommand, CommandKind};
pub use config::BotConfig;
pub use console::{ChatLine, ConsoleChannel, SessionSummary};
pub use dispatcher::{CommandDispatcher, CommandRejection, Issuer};
pub use error::{BotError, Result};
pub use logging::{init_logging, init_logging_from_env, LoggingError, LoggingMode};

// Re-export the poll types callers need alongside the bot
pub use poll_core::{Poll, PollError, PollManager, PollReply};
