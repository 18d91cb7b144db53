//! Command dispatch
//!
//! Routes an already-parsed `(issuer, privileged, command, args)` tuple to
//! the [`PollManager`] and returns the reply to post, if any.

use std::sync::Arc;

use poll_core::{PollError, PollManager, PollReply};
use thiserror::Error;

use crate::command::{ChatCommand, CommandKind};

/// Rejections decided by the dispatcher before the poll is consulted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandRejection {
    #[error("Not Authorized")]
    NotAuthorized,

    #[error("There must be exact one winning option")]
    WinnerArguments,
}

/// Who sent a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    pub display_name: String,
    /// Broadcaster or moderator
    pub is_privileged: bool,
}

impl Issuer {
    pub fn new(display_name: impl Into<String>, is_privileged: bool) -> Self {
        Self {
            display_name: display_name.into(),
            is_privileged,
        }
    }

    pub fn viewer(display_name: impl Into<String>) -> Self {
        Self::new(display_name, false)
    }

    pub fn moderator(display_name: impl Into<String>) -> Self {
        Self::new(display_name, true)
    }
}

/// Maps chat commands onto poll operations
///
/// Cheap to clone; clones share the same [`PollManager`].
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    polls: Arc<PollManager>,
}

impl CommandDispatcher {
    pub fn new(polls: Arc<PollManager>) -> Self {
        Self { polls }
    }

    /// The poll manager commands are applied to
    pub fn polls(&self) -> &Arc<PollManager> {
        &self.polls
    }

    /// Handle a parsed chat command
    pub fn handle(&self, issuer: &Issuer, command: &ChatCommand) -> Option<String> {
        self.dispatch(issuer, &command.name, &command.args)
    }

    /// Handle `command` with `args` from `issuer`
    ///
    /// Returns `None` for unknown commands; otherwise the message to post.
    pub fn dispatch(&self, issuer: &Issuer, command: &str, args: &[String]) -> Option<String> {
        let kind = CommandKind::from_name(command)?;

        if kind.requires_privilege() && !issuer.is_privileged {
            tracing::warn!(
                issuer = %issuer.display_name,
                command = %kind,
                "privileged command from unprivileged issuer"
            );
            return Some(CommandRejection::NotAuthorized.to_string());
        }

        let reply = self.execute(kind, issuer, args);
        tracing::debug!(issuer = %issuer.display_name, command = %kind, reply = %reply, "command handled");

        Some(reply)
    }

    fn execute(&self, kind: CommandKind, issuer: &Issuer, args: &[String]) -> String {
        let name = issuer.display_name.as_str();

        let outcome: Result<PollReply, PollError> = match kind {
            CommandKind::Vote => match args {
                [choice] => self.polls.cast_vote(name, choice),
                _ => Err(PollError::UnrecognizedChoice {
                    name: name.to_string(),
                }),
            },
            CommandKind::NewVote => {
                if args.len() < 2 {
                    Err(PollError::NotEnoughOptions)
                } else {
                    self.polls.start_new_poll(args.iter().cloned())
                }
            }
            CommandKind::EnableVote => self.polls.set_voting_enabled(true),
            CommandKind::DisableVote => self.polls.set_voting_enabled(false),
            CommandKind::Options => self.polls.list_options(),
            CommandKind::Winner => {
                if self.polls.current_poll().is_none() {
                    Err(PollError::NoActivePoll)
                } else if let [option] = args {
                    self.polls.query_winners(option)
                } else {
                    return CommandRejection::WinnerArguments.to_string();
                }
            }
        };

        match outcome {
            Ok(reply) => reply.to_string(),
            Err(err) => err.to_string(),
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(PollManager::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unknown_command_is_silent() {
        let dispatcher = CommandDispatcher::default();
        assert_eq!(dispatcher.dispatch(&Issuer::moderator("mod"), "dance", &[]), None);
    }

    #[test]
    fn test_viewer_cannot_start_poll() {
        let dispatcher = CommandDispatcher::default();

        let reply = dispatcher.dispatch(&Issuer::viewer("alice"), "newvote", &args(&["a", "b"]));
        assert_eq!(reply.as_deref(), Some("Not Authorized"));
        assert!(dispatcher.polls().current_poll().is_none());
    }

    #[test]
    fn test_command_names_ignore_case() {
        let dispatcher = CommandDispatcher::default();

        let reply = dispatcher.dispatch(&Issuer::moderator("mod"), "NewVote", &args(&["a", "b"]));
        assert_eq!(
            reply.as_deref(),
            Some("New Poll started. Vote with '!vote <option>'. The options are a, b")
        );
    }

    #[test]
    fn test_vote_needs_exactly_one_argument() {
        let dispatcher = CommandDispatcher::default();
        dispatcher.dispatch(&Issuer::moderator("mod"), "newvote", &args(&["a", "b"]));

        let reply = dispatcher.dispatch(&Issuer::viewer("alice"), "vote", &args(&["a", "b"]));
        assert_eq!(reply.as_deref(), Some("Your option was not recognized alice"));

        let reply = dispatcher.dispatch(&Issuer::viewer("alice"), "vote", &[]);
        assert_eq!(reply.as_deref(), Some("Your option was not recognized alice"));

        assert_eq!(dispatcher.polls().current_poll().unwrap().ballot_count(), 0);
    }

    #[test]
    fn test_winner_needs_exactly_one_argument() {
        let dispatcher = CommandDispatcher::default();
        dispatcher.dispatch(&Issuer::moderator("mod"), "newvote", &args(&["a", "b"]));

        let reply = dispatcher.dispatch(&Issuer::moderator("mod"), "winner", &[]);
        assert_eq!(reply.as_deref(), Some("There must be exact one winning option"));
    }

    #[test]
    fn test_winner_without_poll_reports_no_poll_first() {
        let dispatcher = CommandDispatcher::default();

        for command_args in [args(&[]), args(&["a", "b"])] {
            let reply = dispatcher.dispatch(&Issuer::moderator("mod"), "winner", &command_args);
            assert_eq!(reply.as_deref(), Some("There is no active poll"));
        }
    }
}
