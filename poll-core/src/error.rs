//! Error types for poll-core
//!
//! Every variant is an ordinary outcome a chat user can trigger, so the
//! `Display` text is the exact message relayed back to the channel.

use thiserror::Error;

/// Rejections and construction failures for poll operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    /// A poll was started with fewer than two options
    #[error("There need to be at least two options for a poll")]
    NotEnoughOptions,

    /// A vote had an empty voter name or a blank choice
    #[error("A vote needs a voter name and a choice")]
    InvalidVote,

    /// No poll has been started yet, or the poll is closed for listing
    #[error("There is no active poll")]
    NoActivePoll,

    /// The voter picked something that is not one of the poll options
    #[error("Your option was not recognized {name}")]
    UnrecognizedChoice { name: String },

    /// The poll refused the ballot: the voter already has one, or voting is
    /// disabled
    #[error("You can only vote once {name}.")]
    AlreadyVoted { name: String },

    #[error("Voting is already enabled")]
    AlreadyEnabled,

    #[error("Voting is already disabled")]
    AlreadyDisabled,

    /// Voter lookup for an option the poll does not have
    #[error("Option was not recognized")]
    UnknownOption,
}

/// Result type for poll-core operations
pub type Result<T> = std::result::Result<T, PollError>;
