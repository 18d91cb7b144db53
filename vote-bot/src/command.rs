//! Chat command parsing
//!
//! Turns a raw chat message such as `!vote cats` into a command name and its
//! arguments, and maps known names onto [`CommandKind`].

use std::fmt;

/// A command found in a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCommand {
    /// Lower-cased command name without the prefix
    pub name: String,
    /// Whitespace-separated arguments, as typed
    pub args: Vec<String>,
}

impl ChatCommand {
    /// Parse `message` if it starts with `prefix`
    ///
    /// Returns `None` for ordinary chat and for a bare prefix.
    ///
    /// ```rust
    /// use vote_bot::ChatCommand;
    ///
    /// let cmd = ChatCommand::parse("  !NewVote Cats Dogs ", "!").unwrap();
    /// assert_eq!(cmd.name, "newvote");
    /// assert_eq!(cmd.args, vec!["Cats", "Dogs"]);
    ///
    /// assert!(ChatCommand::parse("hello there", "!").is_none());
    /// assert!(ChatCommand::parse("!", "!").is_none());
    /// ```
    pub fn parse(message: &str, prefix: &str) -> Option<Self> {
        let body = message.trim().strip_prefix(prefix)?;

        // "! vote" is chat, not a command
        if body.starts_with(char::is_whitespace) {
            return None;
        }

        let mut tokens = body.split_whitespace();
        let name = tokens.next()?.to_lowercase();
        let args = tokens.map(String::from).collect();

        Some(Self { name, args })
    }

    /// The recognized command, if any
    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_name(&self.name)
    }
}

/// Commands the bot understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `!vote <option>`
    Vote,
    /// `!newvote <option> <option> ...`
    NewVote,
    /// `!enablevote`
    EnableVote,
    /// `!disablevote`
    DisableVote,
    /// `!options`
    Options,
    /// `!winner <option>`
    Winner,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Vote,
        CommandKind::NewVote,
        CommandKind::EnableVote,
        CommandKind::DisableVote,
        CommandKind::Options,
        CommandKind::Winner,
    ];

    /// Look up a command by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Vote => "vote",
            CommandKind::NewVote => "newvote",
            CommandKind::EnableVote => "enablevote",
            CommandKind::DisableVote => "disablevote",
            CommandKind::Options => "options",
            CommandKind::Winner => "winner",
        }
    }

    /// Whether only the broadcaster or a moderator may issue this command
    pub fn requires_privilege(&self) -> bool {
        matches!(
            self,
            CommandKind::NewVote
                | CommandKind::EnableVote
                | CommandKind::DisableVote
                | CommandKind::Winner
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
