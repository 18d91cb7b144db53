//! Chat Poll Core
//!
//! In-memory, thread-safe polling for a single chat channel: a moderator
//! opens a poll with a fixed set of options, viewers cast one vote each, and
//! the moderator can close voting and ask who picked what.
//!
//! # Features
//!
//! - **One vote per viewer**: ballots are inserted atomically only if the
//!   viewer has none, even under concurrent votes from the same name
//! - **Case-insensitive options**: `!vote CATS` counts for `cats`, while the
//!   text the viewer typed is what gets stored
//! - **Open/closed toggle**: voting can be disabled and re-enabled; ballots
//!   survive the toggle and nobody gets a second vote
//! - **Single current poll**: starting a poll swaps in a fresh instance
//!   without disturbing calls already running against the old one
//!
//! # Quick Start
//!
//! ```rust
//! use poll_core::PollManager;
//!
//! let manager = PollManager::new();
//! manager.start_new_poll(["cats", "dogs"]).unwrap();
//!
//! manager.cast_vote("alice", "cats").unwrap();
//! assert!(manager.cast_vote("alice", "dogs").is_err());
//!
//! manager.set_voting_enabled(false).unwrap();
//! let reply = manager.query_winners("cats").unwrap();
//! assert_eq!(reply.to_string(), "1 Person voted for cats: alice");
//! ```
//!
//! # Architecture
//!
//! ```text
//! PollManager
//!     │
//!     └── current: RwLock<Option<Arc<Poll>>>
//!             │
//!             └── Poll
//!                   ├── options (fixed, >= 2)
//!                   ├── state: Enabled | Disabled
//!                   └── ballots: DashMap<voter, choice>
//! ```

// Modules
pub mod error;
pub mod manager;
pub mod poll;
pub mod reply;
pub mod vote;

// Re-exports - Public API
pub use error::{PollError, Result};
pub use manager::PollManager;
pub use poll::{Poll, VoteRejection, VoteState};
pub use reply::PollReply;
pub use vote::VoteInfo;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::PollError;
    pub use crate::manager::PollManager;
    pub use crate::poll::{Poll, VoteState};
    pub use crate::reply::PollReply;
    pub use crate::vote::VoteInfo;
}
