//! Option registry: the single source of truth for every named option.

use crate::commands::CommandKind;

/// How the parser collects values for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionArity {
    /// At most one following value; bare flag becomes `true`.
    Single,
    /// Collector: every following non-flag token, always stored as a list.
    Collect,
}

/// Which commands accept an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionScope {
    /// Accepted before or after any command.
    Global,
    /// Only meaningful for the listed commands.
    Commands(&'static [CommandKind]),
}

/// A single option definition.
#[derive(Debug, Clone)]
pub struct OptionDef {
    /// Long form without the leading dashes (e.g., "max-results").
    pub long: &'static str,
    /// Optional short form including its dash (e.g., "-h").
    pub short: Option<&'static str>,
    /// Value collection behavior.
    pub arity: OptionArity,
    /// Where the option applies.
    pub scope: OptionScope,
    /// Placeholder shown in usage text, if the option takes a value.
    pub value_name: Option<&'static str>,
    /// Human-readable description (for help text).
    pub description: &'static str,
}

const SEARCH: &[CommandKind] = &[CommandKind::Search];
const CONTRIBUTE: &[CommandKind] = &[CommandKind::Contribute];
const FEEDBACK: &[CommandKind] = &[CommandKind::Feedback];

/// Build the complete option registry.
pub fn option_registry() -> Vec<OptionDef> {
    vec![
        // === Global ===
        OptionDef {
            long: "help",
            short: Some("-h"),
            arity: OptionArity::Single,
            scope: OptionScope::Global,
            value_name: None,
            description: "Show help",
        },
        OptionDef {
            long: "version",
            short: Some("-v"),
            arity: OptionArity::Single,
            scope: OptionScope::Global,
            value_name: None,
            description: "Show version",
        },
        OptionDef {
            long: "json",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Global,
            value_name: None,
            description: "Print the raw JSON response",
        },
        // === search ===
        OptionDef {
            long: "max-results",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("N"),
            description: "Maximum number of results",
        },
        OptionDef {
            long: "min-quality",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("SCORE"),
            description: "Minimum quality score (0.0-1.0)",
        },
        OptionDef {
            long: "max-tokens",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("N"),
            description: "Maximum tokens per result",
        },
        OptionDef {
            long: "context-os",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("OS"),
            description: "Operating system context",
        },
        OptionDef {
            long: "context-language",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("LANG"),
            description: "Programming language context",
        },
        OptionDef {
            long: "context-runtime",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(SEARCH),
            value_name: Some("RUNTIME"),
            description: "Runtime context (e.g., node 20)",
        },
        // === contribute ===
        OptionDef {
            long: "title",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("TEXT"),
            description: "Entry title (required)",
        },
        OptionDef {
            long: "content",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("TEXT"),
            description: "Entry content (required)",
        },
        OptionDef {
            long: "tags",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("a,b,c"),
            description: "Comma-separated tags (required)",
        },
        OptionDef {
            long: "model",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("NAME"),
            description: "Model that produced the solution",
        },
        OptionDef {
            long: "ttl",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("DURATION"),
            description: "Time to live (e.g., 30d, 90d, evergreen)",
        },
        OptionDef {
            long: "problem",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("TEXT"),
            description: "Problem description",
        },
        OptionDef {
            long: "solution",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("TEXT"),
            description: "Solution summary",
        },
        OptionDef {
            long: "error-messages",
            short: None,
            arity: OptionArity::Collect,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("MSG..."),
            description: "Error messages encountered",
        },
        OptionDef {
            long: "failed-approaches",
            short: None,
            arity: OptionArity::Collect,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("TEXT..."),
            description: "Approaches that did not work",
        },
        OptionDef {
            long: "effort-tokens-used",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("N"),
            description: "Tokens spent finding the solution",
        },
        OptionDef {
            long: "effort-duration-seconds",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("N"),
            description: "Seconds spent finding the solution",
        },
        OptionDef {
            long: "effort-tool-calls",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("N"),
            description: "Tool calls made finding the solution",
        },
        OptionDef {
            long: "env-language",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("LANG"),
            description: "Environment language",
        },
        OptionDef {
            long: "env-os",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("OS"),
            description: "Environment operating system",
        },
        OptionDef {
            long: "env-framework",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("NAME"),
            description: "Environment framework",
        },
        OptionDef {
            long: "env-framework-version",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("VERSION"),
            description: "Environment framework version",
        },
        OptionDef {
            long: "env-runtime",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("NAME"),
            description: "Environment runtime",
        },
        OptionDef {
            long: "env-runtime-version",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(CONTRIBUTE),
            value_name: Some("VERSION"),
            description: "Environment runtime version",
        },
        // === feedback ===
        OptionDef {
            long: "reason",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(FEEDBACK),
            value_name: Some("TEXT"),
            description: "Why the entry was or was not useful",
        },
        OptionDef {
            long: "notes",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(FEEDBACK),
            value_name: Some("TEXT"),
            description: "Free-form notes",
        },
        OptionDef {
            long: "correction-content",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(FEEDBACK),
            value_name: Some("TEXT"),
            description: "Corrected content",
        },
        OptionDef {
            long: "correction-title",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(FEEDBACK),
            value_name: Some("TEXT"),
            description: "Corrected title",
        },
        OptionDef {
            long: "correction-tags",
            short: None,
            arity: OptionArity::Single,
            scope: OptionScope::Commands(FEEDBACK),
            value_name: Some("a,b,c"),
            description: "Corrected tags",
        },
    ]
}

impl OptionDef {
    /// Check if this definition's short form matches the given token.
    pub fn matches_short(&self, token: &str) -> bool {
        self.short == Some(token)
    }

    /// The normalized key this option is stored under in an `ArgBag`.
    pub fn key(&self) -> String {
        crate::args::parser::kebab_to_camel(self.long)
    }

    /// Whether this option is listed in the given command's help.
    pub fn applies_to(&self, command: CommandKind) -> bool {
        match self.scope {
            OptionScope::Global => true,
            OptionScope::Commands(commands) => commands.contains(&command),
        }
    }
}

/// Normalized keys of every collector option in the registry.
pub fn collector_keys(registry: &[OptionDef]) -> Vec<String> {
    registry
        .iter()
        .filter(|def| def.arity == OptionArity::Collect)
        .map(OptionDef::key)
        .collect()
}
