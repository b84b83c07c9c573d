//! Command names, usage text and validated requests.

mod help;
mod request;

pub use help::{command_usage, general_usage};
pub use request::{
    CommandRequest, ContributeRequest, Correction, Effort, Environment, FeedbackRequest, Outcome,
    SearchContext, SearchRequest, MIN_QUERY_CHARS,
};

/// Every subcommand `prior` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Search,
    Contribute,
    Feedback,
    Get,
    Retract,
    Status,
    Credits,
    Claim,
    Verify,
}

impl CommandKind {
    pub const ALL: [CommandKind; 9] = [
        CommandKind::Search,
        CommandKind::Contribute,
        CommandKind::Feedback,
        CommandKind::Get,
        CommandKind::Retract,
        CommandKind::Status,
        CommandKind::Credits,
        CommandKind::Claim,
        CommandKind::Verify,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Search => "search",
            CommandKind::Contribute => "contribute",
            CommandKind::Feedback => "feedback",
            CommandKind::Get => "get",
            CommandKind::Retract => "retract",
            CommandKind::Status => "status",
            CommandKind::Credits => "credits",
            CommandKind::Claim => "claim",
            CommandKind::Verify => "verify",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Commands whose arguments may also arrive as a piped JSON document.
    pub fn accepts_stdin(self) -> bool {
        matches!(self, CommandKind::Contribute | CommandKind::Feedback)
    }

    /// Positional part of the usage line.
    fn synopsis(self) -> &'static str {
        match self {
            CommandKind::Search => "<query...>",
            CommandKind::Contribute => "--title <TEXT> --content <TEXT> --tags <a,b,c>",
            CommandKind::Feedback => "<entryId> <useful|not_useful>",
            CommandKind::Get | CommandKind::Retract => "<id>",
            CommandKind::Status | CommandKind::Credits => "",
            CommandKind::Claim => "<email>",
            CommandKind::Verify => "<code>",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            CommandKind::Search => "Search the knowledge base",
            CommandKind::Contribute => "Contribute a new entry",
            CommandKind::Feedback => "Rate an entry you used",
            CommandKind::Get => "Show a single entry",
            CommandKind::Retract => "Retract one of your entries",
            CommandKind::Status => "Show account status",
            CommandKind::Credits => "Show credit balance",
            CommandKind::Claim => "Claim this agent with an email address",
            CommandKind::Verify => "Verify a claim with the emailed code",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CommandKind::from_name("notacommand"), None);
        assert_eq!(CommandKind::from_name("SEARCH"), None);
    }

    #[test]
    fn only_contribute_and_feedback_read_stdin() {
        let readers: Vec<_> = CommandKind::ALL
            .into_iter()
            .filter(|k| k.accepts_stdin())
            .collect();
        assert_eq!(readers, vec![CommandKind::Contribute, CommandKind::Feedback]);
    }
}
