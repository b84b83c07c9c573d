//! Pipeline: ties all argument processing stages together.

use crate::args::merge::{identify_command, overlay, stdin_layer};
use crate::args::parser::{parse_args, ArgBag, OptionValue};
use crate::args::stdin::InputSource;
use crate::commands::{command_usage, general_usage, CommandKind, CommandRequest};
use crate::error::CliError;

/// A validated command plus display preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub request: CommandRequest,
    /// `--json`: print the response body untouched.
    pub raw_output: bool,
}

/// What the binary should do with this invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Print help text and exit successfully.
    Help(String),
    /// Print the version and exit successfully.
    Version(String),
    /// Hand the request to the API client.
    Dispatch(Dispatch),
}

/// Turn raw arguments plus standard input into a prepared invocation.
///
/// This is the main entry point for the argument pipeline. Help and
/// version short-circuit before stdin is touched, and stdin is only read
/// for commands that accept a JSON document.
pub fn prepare<S: InputSource>(tokens: &[String], stdin: &mut S) -> Result<Prepared, CliError> {
    // Stage 1: Parse arguments
    let bag = parse_args(tokens);
    tracing::debug!(positionals = ?bag.positionals, options = ?bag.options, "parsed arguments");

    // Stage 2: Help / version
    if let Some(text) = help_text(&bag) {
        return Ok(Prepared::Help(text));
    }
    if bag.flag("version") {
        return Ok(Prepared::Version(env!("CARGO_PKG_VERSION").to_string()));
    }

    // Stage 3: Identify the command before reading anything from stdin
    let command = identify_command(&bag)?;

    // Stage 4: Read stdin and merge under CLI values
    let raw = if command.accepts_stdin() {
        stdin.read_document()?
    } else {
        None
    };
    let layer = stdin_layer(command, raw.as_deref())?;
    let invocation = overlay(command, layer, &bag);

    // Stage 5: Validate
    let request = CommandRequest::from_invocation(&invocation)?;

    Ok(Prepared::Dispatch(Dispatch {
        request,
        raw_output: bag.flag("json"),
    }))
}

/// Help text to show, if this invocation asks for help.
///
/// No arguments at all also shows general help. `--help <command>` parses
/// as a scalar and selects that command's usage.
fn help_text(bag: &ArgBag) -> Option<String> {
    let first = bag.positionals.first().map(String::as_str);
    let help = bag.option("help");

    let topic = match (help, first) {
        (Some(OptionValue::Scalar(topic)), None) => Some(topic.as_str()),
        (Some(value), first) if value.is_truthy() => first,
        (None, None) if bag.options.is_empty() => None,
        _ => return None,
    };

    Some(match topic.and_then(CommandKind::from_name) {
        Some(kind) => command_usage(kind),
        None => general_usage(),
    })
}
