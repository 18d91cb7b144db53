//! Poll entity and its vote registration rules
//!
//! A [`Poll`] owns a fixed option set, an enabled/disabled toggle and the
//! ballots cast so far. It is safe to share behind an `Arc` and call from any
//! number of threads.
//!
//! # Matching
//!
//! Options and choices are compared through a lower-cased canonical form,
//! while the text a voter typed is what gets stored and reported back.
//!
//! # Architecture
//!
//! ```text
//! Poll
//! ├── options:   Vec<String>            (as given, display order)
//! ├── canonical: Vec<String>            (lower-cased, same order)
//! ├── state:     RwLock<VoteState>
//! ├── ballots:   DashMap<voter, Ballot> (insert-if-absent via entry API)
//! └── next_seq:  AtomicU64              (arrival order for listings)
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use thiserror::Error;

use crate::error::{PollError, Result};
use crate::vote::VoteInfo;

/// Whether a poll currently accepts votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteState {
    Enabled,
    Disabled,
}

impl VoteState {
    /// Map a boolean "voting enabled" flag to a state
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            VoteState::Enabled
        } else {
            VoteState::Disabled
        }
    }
}

impl fmt::Display for VoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteState::Enabled => write!(f, "enabled"),
            VoteState::Disabled => write!(f, "disabled"),
        }
    }
}

/// Why [`Poll::try_vote`] refused a vote
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteRejection {
    #[error("voting is disabled")]
    VotingDisabled,

    #[error("choice does not match any option")]
    UnknownOption,

    #[error("voter already has a ballot")]
    AlreadyVoted,
}

/// A recorded vote
#[derive(Debug, Clone)]
struct Ballot {
    /// Choice exactly as cast
    choice: String,
    /// Lower-cased choice used for matching
    canonical: String,
    /// Arrival order across the whole poll
    seq: u64,
}

fn canonical(text: &str) -> String {
    text.to_lowercase()
}

/// One fixed-option vote with at most one ballot per voter
///
/// # Example
///
/// ```rust
/// use poll_core::{Poll, VoteInfo};
///
/// let poll = Poll::new(["cats", "dogs"]).unwrap();
///
/// assert!(poll.vote(&VoteInfo::new("alice", "cats").unwrap()));
/// // One ballot per voter, even for a different option
/// assert!(!poll.vote(&VoteInfo::new("alice", "dogs").unwrap()));
///
/// assert_eq!(poll.voters("CATS").unwrap(), vec!["alice".to_string()]);
/// assert!(poll.voters("dogs").unwrap().is_empty());
/// assert!(poll.voters("fish").is_err());
/// ```
pub struct Poll {
    options: Vec<String>,
    canonical_options: Vec<String>,
    state: RwLock<VoteState>,
    ballots: DashMap<String, Ballot>,
    next_seq: AtomicU64,
}

impl Poll {
    /// Create an enabled poll
    ///
    /// Fails with [`PollError::NotEnoughOptions`] when fewer than two options
    /// are given. Options that differ only by case are kept as-is; voters
    /// cannot tell them apart.
    pub fn new<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();

        if options.len() < 2 {
            return Err(PollError::NotEnoughOptions);
        }

        let canonical_options = options.iter().map(|o| canonical(o)).collect();

        Ok(Self {
            options,
            canonical_options,
            state: RwLock::new(VoteState::Enabled),
            ballots: DashMap::new(),
            next_seq: AtomicU64::new(0),
        })
    }

    /// The options in the order the poll was started with
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn state(&self) -> VoteState {
        *self.state.read()
    }

    pub fn is_enabled(&self) -> bool {
        self.state() == VoteState::Enabled
    }

    /// Case-insensitive membership test against the option set
    pub fn has_option(&self, option: &str) -> bool {
        let wanted = canonical(option);
        self.canonical_options.iter().any(|o| *o == wanted)
    }

    /// Whether this exact (case-sensitive) display name has a ballot
    pub fn has_voted(&self, display_name: &str) -> bool {
        self.ballots.contains_key(display_name)
    }

    /// Number of ballots cast so far
    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }

    /// Register a vote, returning `true` iff it was accepted
    ///
    /// See [`Poll::try_vote`] for the rules.
    pub fn vote(&self, info: &VoteInfo) -> bool {
        self.try_vote(info).is_ok()
    }

    /// Register a vote, reporting which rule rejected it
    ///
    /// A vote is refused without side effects when voting is disabled or the
    /// choice matches no option. Otherwise the ballot is inserted only if the
    /// voter has none yet; the check and the insert happen under one shard
    /// lock, so concurrent votes from the same voter accept exactly one.
    pub fn try_vote(&self, info: &VoteInfo) -> std::result::Result<(), VoteRejection> {
        if !self.is_enabled() {
            tracing::debug!(voter = info.display_name(), "vote rejected: voting disabled");
            return Err(VoteRejection::VotingDisabled);
        }

        let wanted = canonical(info.choice());
        if !self.canonical_options.contains(&wanted) {
            tracing::debug!(
                voter = info.display_name(),
                choice = info.choice(),
                "vote rejected: unknown option"
            );
            return Err(VoteRejection::UnknownOption);
        }

        match self.ballots.entry(info.display_name().to_string()) {
            Entry::Occupied(_) => {
                tracing::debug!(voter = info.display_name(), "vote rejected: already voted");
                Err(VoteRejection::AlreadyVoted)
            }
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Ballot {
                    choice: info.choice().to_string(),
                    canonical: wanted,
                    seq,
                });
                tracing::debug!(
                    voter = info.display_name(),
                    choice = info.choice(),
                    seq,
                    "ballot recorded"
                );
                Ok(())
            }
        }
    }

    /// Open voting (idempotent)
    pub fn enable_voting(&self) {
        self.set_state(VoteState::Enabled);
    }

    /// Close voting (idempotent)
    pub fn disable_voting(&self) {
        self.set_state(VoteState::Disabled);
    }

    /// Set the state, returning whether it changed
    ///
    /// Compare and set happen under one write lock, so of two concurrent
    /// callers asking for the same state only one observes a change.
    pub fn set_state(&self, target: VoteState) -> bool {
        let mut state = self.state.write();
        if *state == target {
            return false;
        }
        *state = target;
        tracing::info!(state = %target, "poll voting state changed");
        true
    }

    /// Everyone whose ballot matches `option`, in the order they voted
    ///
    /// Returns [`PollError::UnknownOption`] when `option` is not part of the
    /// poll, and an empty list when it is but nobody picked it.
    pub fn voters(&self, option: &str) -> Result<Vec<String>> {
        let wanted = canonical(option);
        if !self.canonical_options.contains(&wanted) {
            return Err(PollError::UnknownOption);
        }

        let mut matched: Vec<(u64, String)> = self
            .ballots
            .iter()
            .filter(|entry| entry.value().canonical == wanted)
            .map(|entry| (entry.value().seq, entry.key().clone()))
            .collect();
        matched.sort_unstable_by_key(|(seq, _)| *seq);

        Ok(matched.into_iter().map(|(_, voter)| voter).collect())
    }

    /// The choice a voter cast, as they typed it
    pub fn choice_of(&self, display_name: &str) -> Option<String> {
        self.ballots
            .get(display_name)
            .map(|ballot| ballot.choice.clone())
    }
}

impl fmt::Debug for Poll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poll")
            .field("options", &self.options)
            .field("state", &self.state())
            .field("ballot_count", &self.ballot_count())
            .finish()
    }
}
