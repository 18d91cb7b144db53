//! Successful poll outcomes and their chat text

use std::fmt;

/// What a successful [`PollManager`](crate::PollManager) operation produced
///
/// `Display` renders the message the bot posts back to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollReply {
    /// A new poll replaced the current one
    Started { options: Vec<String> },

    /// A ballot was recorded
    Voted { name: String, choice: String },

    /// Voting was reopened
    VotingEnabled { options: Vec<String> },

    /// Voting was closed
    VotingDisabled,

    /// The options of the open poll
    Options { options: Vec<String> },

    /// Who picked a given option
    Winners { option: String, voters: Vec<String> },
}

impl fmt::Display for PollReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollReply::Started { options } => write!(
                f,
                "New Poll started. Vote with '!vote <option>'. The options are {}",
                options.join(", ")
            ),
            PollReply::Voted { name, choice } => write!(f, "{} voted for {}", name, choice),
            PollReply::VotingEnabled { options } => write!(
                f,
                "Voting for the poll has been enabled. Vote with '!vote <option>'. The options are {}",
                options.join(", ")
            ),
            PollReply::VotingDisabled => write!(f, "The voting phase for the poll has ended."),
            PollReply::Options { options } => write!(
                f,
                "Vote with '!vote <option>'. The current options are {}",
                options.join(", ")
            ),
            PollReply::Winners { option, voters } => {
                let noun = if voters.len() == 1 { "Person" } else { "People" };
                write!(
                    f,
                    "{} {} voted for {}: {}",
                    voters.len(),
                    noun,
                    option,
                    voters.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_started_lists_options() {
        let reply = PollReply::Started {
            options: strings(&["cats", "dogs"]),
        };
        assert_eq!(
            reply.to_string(),
            "New Poll started. Vote with '!vote <option>'. The options are cats, dogs"
        );
    }

    #[test]
    fn test_winners_singular_and_plural() {
        let one = PollReply::Winners {
            option: "cats".to_string(),
            voters: strings(&["alice"]),
        };
        assert_eq!(one.to_string(), "1 Person voted for cats: alice");

        let many = PollReply::Winners {
            option: "cats".to_string(),
            voters: strings(&["alice", "bob"]),
        };
        assert_eq!(many.to_string(), "2 People voted for cats: alice, bob");

        let none = PollReply::Winners {
            option: "dogs".to_string(),
            voters: Vec::new(),
        };
        assert_eq!(none.to_string(), "0 People voted for dogs: ");
    }

    #[test]
    fn test_voted_and_disabled() {
        let voted = PollReply::Voted {
            name: "alice".to_string(),
            choice: "Cats".to_string(),
        };
        assert_eq!(voted.to_string(), "alice voted for Cats");
        assert_eq!(
            PollReply::VotingDisabled.to_string(),
            "The voting phase for the poll has ended."
        );
    }
}
