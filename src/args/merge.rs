//! Merge resolver: the stdin layer overlaid with the CLI layer.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::args::parser::{ArgBag, OptionValue};
use crate::args::schema::{ContributeInput, FeedbackInput, StdinLayer, StdinSchema};
use crate::args::stdin::parse_document;
use crate::commands::{general_usage, CommandKind};
use crate::error::CliError;

/// Final merged arguments for one command, ready for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInvocation {
    pub command: CommandKind,
    /// Argument slots after the command name. A `None` slot was supplied by
    /// neither source.
    pub positionals: Vec<Option<String>>,
    pub options: BTreeMap<String, OptionValue>,
}

impl ResolvedInvocation {
    /// Positional at `index`, if present and non-blank.
    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positionals
            .get(index)
            .and_then(|slot| slot.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// All present positionals from `start` onward, in order.
    pub fn positionals_from(&self, start: usize) -> Vec<&str> {
        self.positionals
            .iter()
            .skip(start)
            .filter_map(|slot| slot.as_deref())
            .collect()
    }

    /// Scalar option text, if present and non-blank.
    ///
    /// A bare flag (`--title` with no value) counts as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.options
            .get(key)
            .and_then(OptionValue::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// List option values. A scalar is treated as a one-element list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.options.get(key) {
            Some(OptionValue::List(items)) => items.clone(),
            Some(OptionValue::Scalar(s)) => vec![s.clone()],
            Some(OptionValue::Boolean(_)) | None => Vec::new(),
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        self.options.get(key).is_some_and(OptionValue::is_truthy)
    }
}

/// Resolve a parsed bag and optional stdin text into an invocation.
///
/// The command is identified first, so an unknown command is reported
/// before stdin is ever parsed. Invalid JSON aborts before validation.
pub fn resolve(bag: &ArgBag, stdin_raw: Option<&str>) -> Result<ResolvedInvocation, CliError> {
    let command = identify_command(bag)?;
    let layer = stdin_layer(command, stdin_raw)?;
    Ok(overlay(command, layer, bag))
}

/// The command named by the first positional.
pub fn identify_command(bag: &ArgBag) -> Result<CommandKind, CliError> {
    let name = bag
        .positionals
        .first()
        .ok_or_else(|| CliError::usage("No command given", general_usage()))?;
    CommandKind::from_name(name).ok_or_else(|| CliError::UnknownCommand(name.clone()))
}

/// Build the stdin layer for a command from raw stdin text.
pub fn stdin_layer(command: CommandKind, stdin_raw: Option<&str>) -> Result<StdinLayer, CliError> {
    if !command.accepts_stdin() {
        return Ok(StdinLayer::default());
    }
    let Some(document) = parse_document(stdin_raw)? else {
        return Ok(StdinLayer::default());
    };

    let value = Value::Object(document);
    match command {
        CommandKind::Contribute => decode::<ContributeInput>(value),
        CommandKind::Feedback => decode::<FeedbackInput>(value),
        _ => Ok(StdinLayer::default()),
    }
}

fn decode<S: StdinSchema>(value: Value) -> Result<StdinLayer, CliError> {
    serde_json::from_value::<S>(value)
        .map(StdinSchema::into_layer)
        .map_err(|e| CliError::Validation(format!("Unsupported value in stdin document: {e}")))
}

/// Overlay the CLI layer onto the stdin layer.
///
/// Every CLI option replaces the stdin value under the same key. CLI
/// positionals (after the command name) replace stdin slots index by index;
/// slots the CLI does not reach keep their stdin value.
pub fn overlay(command: CommandKind, stdin: StdinLayer, bag: &ArgBag) -> ResolvedInvocation {
    let mut options = stdin.options;
    for (key, value) in &bag.options {
        if let Some(previous) = options.insert(key.clone(), value.clone()) {
            tracing::debug!(option = %key, ?previous, "cli value overrides stdin");
        }
    }

    let mut positionals = stdin.positionals;
    for (index, value) in bag.positionals.iter().skip(1).enumerate() {
        match positionals.get_mut(index) {
            Some(slot) => *slot = Some(value.clone()),
            None => positionals.push(Some(value.clone())),
        }
    }

    ResolvedInvocation {
        command,
        positionals,
        options,
    }
}
