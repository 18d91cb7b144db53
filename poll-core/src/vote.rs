//! A single vote attempt
//!
//! `VoteInfo` is built from parsed chat arguments before it ever reaches a
//! [`Poll`](crate::Poll), so a poll never sees a nameless or blank vote.

use crate::error::{PollError, Result};

/// One voter's attempt to pick an option
///
/// Both fields are validated at construction: the display name must not be
/// empty and the choice must contain something other than whitespace.
///
/// # Example
///
/// ```rust
/// use poll_core::VoteInfo;
///
/// let vote = VoteInfo::new("alice", "Cats").unwrap();
/// assert_eq!(vote.display_name(), "alice");
/// assert_eq!(vote.choice(), "Cats");
///
/// assert!(VoteInfo::new("", "cats").is_err());
/// assert!(VoteInfo::new("alice", "   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteInfo {
    display_name: String,
    choice: String,
}

impl VoteInfo {
    /// Create a vote, rejecting an empty/blank name or choice
    pub fn new(display_name: impl Into<String>, choice: impl Into<String>) -> Result<Self> {
        let display_name = display_name.into();
        let choice = choice.into();

        if display_name.trim().is_empty() || choice.trim().is_empty() {
            return Err(PollError::InvalidVote);
        }

        Ok(Self {
            display_name,
            choice,
        })
    }

    /// The voter's display name, case preserved
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The option as the voter typed it
    pub fn choice(&self) -> &str {
        &self.choice
    }
}
