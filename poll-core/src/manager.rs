//! Current-poll slot and command-shaped results
//!
//! The manager holds at most one poll for the channel. Starting a poll swaps
//! in a fresh `Arc<Poll>`; every other operation clones the `Arc` once at
//! entry and works on that instance for the rest of the call, so a
//! concurrent restart never leaves an operation looking at two polls.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{PollError, Result};
use crate::poll::{Poll, VoteRejection, VoteState};
use crate::reply::PollReply;
use crate::vote::VoteInfo;

/// Owner of the channel's current poll
///
/// No authorization happens here; callers gate privileged operations before
/// invoking them.
///
/// # Example
///
/// ```rust
/// use poll_core::{PollError, PollManager};
///
/// let manager = PollManager::new();
/// assert_eq!(manager.cast_vote("alice", "cats"), Err(PollError::NoActivePoll));
///
/// manager.start_new_poll(["cats", "dogs"]).unwrap();
/// let reply = manager.cast_vote("alice", "cats").unwrap();
/// assert_eq!(reply.to_string(), "alice voted for cats");
///
/// let winners = manager.query_winners("cats").unwrap();
/// assert_eq!(winners.to_string(), "1 Person voted for cats: alice");
/// ```
#[derive(Debug, Default)]
pub struct PollManager {
    current: RwLock<Option<Arc<Poll>>>,
}

impl PollManager {
    /// Create a manager with no poll
    pub fn new() -> Self {
        Self::default()
    }

    /// The poll currently held, if any
    ///
    /// Callers may keep the returned `Arc`; its ballots stay readable after
    /// a newer poll replaces it here.
    pub fn current_poll(&self) -> Option<Arc<Poll>> {
        self.current.read().clone()
    }

    /// Replace the current poll with a new one over `options`
    pub fn start_new_poll<I, S>(&self, options: I) -> Result<PollReply>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let poll = Arc::new(Poll::new(options)?);
        let options = poll.options().to_vec();

        let previous = self.current.write().replace(poll);
        tracing::info!(
            options = ?options,
            replaced = previous.is_some(),
            "new poll started"
        );

        Ok(PollReply::Started { options })
    }

    /// Cast `identity`'s vote for `choice` in the current poll
    pub fn cast_vote(&self, identity: &str, choice: &str) -> Result<PollReply> {
        let poll = self.current_poll().ok_or(PollError::NoActivePoll)?;
        let vote = VoteInfo::new(identity, choice)?;

        if !poll.has_option(vote.choice()) {
            return Err(PollError::UnrecognizedChoice {
                name: identity.to_string(),
            });
        }

        match poll.try_vote(&vote) {
            Ok(()) => Ok(PollReply::Voted {
                name: identity.to_string(),
                choice: choice.to_string(),
            }),
            Err(VoteRejection::AlreadyVoted | VoteRejection::VotingDisabled) => {
                Err(PollError::AlreadyVoted {
                    name: identity.to_string(),
                })
            }
            Err(VoteRejection::UnknownOption) => Err(PollError::UnrecognizedChoice {
                name: identity.to_string(),
            }),
        }
    }

    /// Open or close voting on the current poll
    pub fn set_voting_enabled(&self, enabled: bool) -> Result<PollReply> {
        let poll = self.current_poll().ok_or(PollError::NoActivePoll)?;

        if !poll.set_state(VoteState::from_enabled(enabled)) {
            return Err(if enabled {
                PollError::AlreadyEnabled
            } else {
                PollError::AlreadyDisabled
            });
        }

        if enabled {
            Ok(PollReply::VotingEnabled {
                options: poll.options().to_vec(),
            })
        } else {
            Ok(PollReply::VotingDisabled)
        }
    }

    /// The options of the current poll, only while voting is open
    pub fn list_options(&self) -> Result<PollReply> {
        let poll = self
            .current_poll()
            .filter(|poll| poll.is_enabled())
            .ok_or(PollError::NoActivePoll)?;

        Ok(PollReply::Options {
            options: poll.options().to_vec(),
        })
    }

    /// Count and names of everyone who picked `option`
    pub fn query_winners(&self, option: &str) -> Result<PollReply> {
        let poll = self.current_poll().ok_or(PollError::NoActivePoll)?;
        let voters = poll.voters(option)?;

        Ok(PollReply::Winners {
            option: option.to_string(),
            voters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_needs_a_poll() {
        let manager = PollManager::new();

        assert!(manager.current_poll().is_none());
        assert_eq!(manager.cast_vote("a", "b"), Err(PollError::NoActivePoll));
        assert_eq!(manager.set_voting_enabled(true), Err(PollError::NoActivePoll));
        assert_eq!(manager.set_voting_enabled(false), Err(PollError::NoActivePoll));
        assert_eq!(manager.list_options(), Err(PollError::NoActivePoll));
        assert_eq!(manager.query_winners("b"), Err(PollError::NoActivePoll));
    }

    #[test]
    fn test_start_needs_two_options() {
        let manager = PollManager::new();

        let err = manager.start_new_poll(["solo"]).unwrap_err();
        assert_eq!(err.to_string(), "There need to be at least two options for a poll");
        assert!(manager.current_poll().is_none());
    }

    #[test]
    fn test_cast_vote_outcomes() {
        let manager = PollManager::new();
        manager.start_new_poll(["cats", "dogs"]).unwrap();

        assert_eq!(
            manager.cast_vote("alice", "Cats").unwrap().to_string(),
            "alice voted for Cats"
        );
        assert_eq!(
            manager.cast_vote("alice", "dogs"),
            Err(PollError::AlreadyVoted {
                name: "alice".to_string()
            })
        );
        assert_eq!(
            manager.cast_vote("bob", "fish"),
            Err(PollError::UnrecognizedChoice {
                name: "bob".to_string()
            })
        );
        assert_eq!(manager.cast_vote("bob", " "), Err(PollError::InvalidVote));
    }

    #[test]
    fn test_cast_vote_while_closed() {
        let manager = PollManager::new();
        manager.start_new_poll(["cats", "dogs"]).unwrap();
        manager.set_voting_enabled(false).unwrap();

        // A closed poll answers like a refused ballot
        let err = manager.cast_vote("bob", "cats").unwrap_err();
        assert_eq!(err.to_string(), "You can only vote once bob.");
        assert!(!manager.current_poll().unwrap().has_voted("bob"));
    }

    #[test]
    fn test_toggle_voting() {
        let manager = PollManager::new();
        manager.start_new_poll(["a", "b"]).unwrap();

        assert_eq!(manager.set_voting_enabled(true), Err(PollError::AlreadyEnabled));
        assert_eq!(manager.set_voting_enabled(false), Ok(PollReply::VotingDisabled));
        assert_eq!(manager.set_voting_enabled(false), Err(PollError::AlreadyDisabled));
        assert_eq!(manager.list_options(), Err(PollError::NoActivePoll));

        let reply = manager.set_voting_enabled(true).unwrap();
        assert_eq!(
            reply.to_string(),
            "Voting for the poll has been enabled. Vote with '!vote <option>'. The options are a, b"
        );
        assert_eq!(
            manager.list_options().unwrap().to_string(),
            "Vote with '!vote <option>'. The current options are a, b"
        );
    }

    #[test]
    fn test_query_winners() {
        let manager = PollManager::new();
        manager.start_new_poll(["cats", "dogs"]).unwrap();
        manager.cast_vote("alice", "cats").unwrap();
        manager.cast_vote("bob", "CATS").unwrap();

        assert_eq!(
            manager.query_winners("Cats").unwrap().to_string(),
            "2 People voted for Cats: alice, bob"
        );
        assert_eq!(
            manager.query_winners("dogs").unwrap().to_string(),
            "0 People voted for dogs: "
        );
        assert_eq!(manager.query_winners("fish"), Err(PollError::UnknownOption));
    }

    #[test]
    fn test_new_poll_replaces_old_one() {
        let manager = PollManager::new();
        manager.start_new_poll(["cats", "dogs"]).unwrap();
        manager.cast_vote("alice", "cats").unwrap();

        let old = manager.current_poll().unwrap();
        manager.start_new_poll(["red", "blue"]).unwrap();

        // The retained reference still sees its ballots
        assert_eq!(old.voters("cats").unwrap(), vec!["alice".to_string()]);

        // The new poll starts empty and enabled
        let current = manager.current_poll().unwrap();
        assert!(!Arc::ptr_eq(&old, &current));
        assert_eq!(current.ballot_count(), 0);
        assert!(current.is_enabled());
        assert!(manager.cast_vote("alice", "red").is_ok());
    }
}
