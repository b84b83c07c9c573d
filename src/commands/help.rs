use std::fmt::Write;

use crate::args::{option_registry, OptionDef, OptionScope};
use crate::commands::{CommandKind, MIN_QUERY_CHARS};

/// Top-level usage: every command plus global options.
pub fn general_usage() -> String {
    let mut out = String::from("Usage: prior <command> [options]\n\nCommands:\n");
    for kind in CommandKind::ALL {
        let _ = writeln!(out, "  {:<12}{}", kind.name(), kind.summary());
    }

    out.push_str("\nGlobal options:\n");
    for def in option_registry()
        .iter()
        .filter(|d| d.scope == OptionScope::Global)
    {
        let _ = writeln!(out, "  {:<28}{}", option_label(def), def.description);
    }

    out.push_str("\nRun 'prior <command> --help' for command options.\n");
    out.push_str("Environment: PRIOR_API_KEY, PRIOR_BASE_URL\n");
    out
}

/// Usage for one command, with its options from the registry.
pub fn command_usage(kind: CommandKind) -> String {
    let mut out = format!("Usage: prior {}", kind.name());
    if !kind.synopsis().is_empty() {
        out.push(' ');
        out.push_str(kind.synopsis());
    }
    out.push_str(" [options]\n\n");
    out.push_str(kind.summary());
    out.push('\n');

    let registry = option_registry();
    let specific: Vec<&OptionDef> = registry
        .iter()
        .filter(|d| matches!(d.scope, OptionScope::Commands(_)) && d.applies_to(kind))
        .collect();

    if !specific.is_empty() {
        out.push_str("\nOptions:\n");
        for def in specific {
            let _ = writeln!(out, "  {:<34}{}", option_label(def), def.description);
        }
    }

    if let Some(extra) = extra_notes(kind) {
        out.push('\n');
        out.push_str(&extra);
    }
    out
}

fn option_label(def: &OptionDef) -> String {
    let mut label = format!("--{}", def.long);
    if let Some(short) = def.short {
        label = format!("{short}, {label}");
    }
    if let Some(value) = def.value_name {
        label.push(' ');
        label.push_str(value);
    }
    label
}

fn extra_notes(kind: CommandKind) -> Option<String> {
    let note = match kind {
        CommandKind::Search => {
            return Some(format!(
                "Queries must be at least {MIN_QUERY_CHARS} characters.\n"
            ))
        }
        CommandKind::Contribute => {
            "Fields may also be piped as JSON on stdin, e.g.\n  \
             {\"title\": \"...\", \"content\": \"...\", \"tags\": [\"a\", \"b\"],\n   \
             \"effort\": {\"tokensUsed\": 1000}, \"environment\": {\"os\": \"linux\"}}\n\
             Command-line flags take precedence over stdin.\n"
        }
        CommandKind::Feedback => {
            "Outcome is 'useful' or 'not_useful'.\n\
             Fields may also be piped as JSON on stdin, e.g.\n  \
             {\"entryId\": \"k_abc\", \"outcome\": \"not_useful\", \"reason\": \"...\",\n   \
             \"correction\": {\"content\": \"...\"}}\n"
        }
        _ => return None,
    };
    Some(note.to_string())
}
