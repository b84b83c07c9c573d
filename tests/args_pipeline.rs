//! Integration tests for the args pipeline module.

use prior::args::{
    option_registry, overlay, parse, parse_args, prepare, resolve, stdin_layer, ArgBag,
    OptionArity, OptionDef, OptionScope, OptionValue, Prepared,
};
use prior::commands::{CommandKind, CommandRequest, Outcome};
use prior::error::CliError;
use serde_json::json;

fn raw_args(args: Vec<&str>) -> Vec<String> {
    args.into_iter().map(String::from).collect()
}

fn bag(args: Vec<&str>) -> ArgBag {
    parse_args(&raw_args(args))
}

fn scalar(s: &str) -> OptionValue {
    OptionValue::Scalar(s.to_string())
}

fn list(items: &[&str]) -> OptionValue {
    OptionValue::List(items.iter().map(|s| s.to_string()).collect())
}

fn request(args: Vec<&str>, stdin: Option<serde_json::Value>) -> Result<CommandRequest, CliError> {
    let mut input = stdin.map(|v| v.to_string());
    match prepare(&raw_args(args), &mut input)? {
        Prepared::Dispatch(dispatch) => Ok(dispatch.request),
        other => panic!("expected dispatch, got {other:?}"),
    }
}

fn request_raw(args: Vec<&str>, stdin: &str) -> Result<Prepared, CliError> {
    prepare(&raw_args(args), &mut Some(stdin.to_string()))
}

// =============================================================================
// PARSER TESTS
// =============================================================================

#[test]
fn positional_args_in_order() {
    let r = bag(vec!["search", "hello", "world"]);
    assert_eq!(r.positionals, raw_args(vec!["search", "hello", "world"]));
    assert!(r.options.is_empty());
}

#[test]
fn flag_with_value() {
    let r = bag(vec!["--title", "my title"]);
    assert_eq!(r.option("title"), Some(&scalar("my title")));
}

#[test]
fn flag_without_value_is_true() {
    let r = bag(vec!["--json"]);
    assert_eq!(r.option("json"), Some(&OptionValue::Boolean(true)));
}

#[test]
fn flag_before_flag_is_true() {
    let r = bag(vec!["--json", "--verbose"]);
    assert_eq!(r.option("json"), Some(&OptionValue::Boolean(true)));
    assert_eq!(r.option("verbose"), Some(&OptionValue::Boolean(true)));
}

#[test]
fn kebab_case_to_camel_case() {
    assert_eq!(bag(vec!["--max-results", "5"]).option("maxResults"), Some(&scalar("5")));
    assert_eq!(bag(vec!["--context-os", "linux"]).option("contextOs"), Some(&scalar("linux")));
    assert_eq!(bag(vec!["--a-b-c", "x"]).option("aBC"), Some(&scalar("x")));
}

#[test]
fn help_long_and_short() {
    assert!(bag(vec!["--help"]).flag("help"));
    assert!(bag(vec!["-h"]).flag("help"));
}

#[test]
fn error_messages_collects_until_next_flag() {
    let r = bag(vec!["--error-messages", "err1", "err2", "err3", "--title", "x"]);
    assert_eq!(r.option("errorMessages"), Some(&list(&["err1", "err2", "err3"])));
    assert_eq!(r.option("title"), Some(&scalar("x")));
}

#[test]
fn failed_approaches_collects() {
    let r = bag(vec!["--failed-approaches", "a1", "a2"]);
    assert_eq!(r.option("failedApproaches"), Some(&list(&["a1", "a2"])));
}

#[test]
fn collector_single_value_stays_list() {
    let r = bag(vec!["--error-messages", "only one"]);
    assert_eq!(r.option("errorMessages"), Some(&list(&["only one"])));
}

#[test]
fn mixed_positionals_and_flags() {
    let r = bag(vec!["pos1", "--flag", "val", "pos2", "--bool"]);
    assert_eq!(r.positionals, raw_args(vec!["pos1", "pos2"]));
    assert_eq!(r.option("flag"), Some(&scalar("val")));
    assert_eq!(r.option("bool"), Some(&OptionValue::Boolean(true)));
}

#[test]
fn empty_argv() {
    let r = bag(vec![]);
    assert!(r.positionals.is_empty());
    assert!(r.options.is_empty());
}

#[test]
fn custom_registry_declares_repeating_option() {
    let mut registry = option_registry();
    registry.push(OptionDef {
        long: "files",
        short: None,
        arity: OptionArity::Collect,
        scope: OptionScope::Global,
        value_name: None,
        description: "test-only collector",
    });
    let r = parse(&raw_args(vec!["--files", "a.rs", "b.rs", "--json"]), &registry);
    assert_eq!(r.option("files"), Some(&list(&["a.rs", "b.rs"])));

    let default = parse_args(&raw_args(vec!["--files", "a.rs", "b.rs"]));
    assert_eq!(default.option("files"), Some(&scalar("a.rs")));
    assert_eq!(default.positionals, raw_args(vec!["b.rs"]));
}

// =============================================================================
// MERGE TESTS
// =============================================================================

#[test]
fn cli_option_overrides_stdin() {
    let inv = resolve(
        &bag(vec!["contribute", "--title", "CLI"]),
        Some(r#"{"title": "Stdin", "content": "C"}"#),
    )
    .unwrap();
    assert_eq!(inv.text("title"), Some("CLI"));
    assert_eq!(inv.text("content"), Some("C"));
}

#[test]
fn overlay_does_not_touch_sources() {
    let cli = bag(vec!["feedback", "k_cli"]);
    let layer = stdin_layer(
        CommandKind::Feedback,
        Some(r#"{"entryId": "k_stdin", "outcome": "useful"}"#),
    )
    .unwrap();
    let before = (cli.clone(), layer.clone());

    let inv = overlay(CommandKind::Feedback, layer.clone(), &cli);
    assert_eq!(inv.positional(0), Some("k_cli"));
    assert_eq!(inv.positional(1), Some("useful"));
    assert_eq!((cli, layer), before);
}

#[test]
fn partial_cli_positionals_overlay_index_wise() {
    let inv = resolve(&bag(vec!["feedback", "k_cli"]), Some(r#"{"outcome": "not_useful"}"#)).unwrap();
    assert_eq!(inv.positional(0), Some("k_cli"));
    assert_eq!(inv.positional(1), Some("not_useful"));
}

#[test]
fn full_cli_positionals_override_stdin() {
    let inv = resolve(
        &bag(vec!["feedback", "k_cli", "useful"]),
        Some(r#"{"entryId": "k_stdin", "outcome": "not_useful"}"#),
    )
    .unwrap();
    assert_eq!(inv.positional(0), Some("k_cli"));
    assert_eq!(inv.positional(1), Some("useful"));
}

#[test]
fn cli_tags_override_stdin_tags() {
    let Ok(CommandRequest::Contribute(c)) = request(
        vec!["contribute", "--tags", "x"],
        Some(json!({ "title": "T", "content": "C", "tags": ["a", "b"] })),
    ) else {
        panic!("expected contribute");
    };
    assert_eq!(c.tags, vec!["x"]);
}

#[test]
fn cli_collector_overrides_stdin_list() {
    let inv = resolve(
        &bag(vec!["contribute", "--error-messages", "cli"]),
        Some(r#"{"errorMessages": ["a", "b"]}"#),
    )
    .unwrap();
    assert_eq!(inv.list("errorMessages"), vec!["cli"]);
}

// =============================================================================
// VALIDATION TESTS
// =============================================================================

#[test]
fn search_without_query_is_usage() {
    let err = request(vec!["search"], None).unwrap_err();
    assert!(err.to_string().contains("Usage"));
}

#[test]
fn search_query_length_boundary() {
    let err = request(vec!["search", "123456789"], None).unwrap_err();
    assert!(err.to_string().contains("too short"));

    let Ok(CommandRequest::Search(search)) = request(vec!["search", "1234567890"], None) else {
        panic!("expected search");
    };
    assert_eq!(search.query, "1234567890");
}

#[test]
fn search_options_flow_into_request() {
    let Ok(CommandRequest::Search(search)) = request(
        vec!["search", "borrow checker error", "--max-results", "5", "--context-os", "linux"],
        None,
    ) else {
        panic!("expected search");
    };
    assert_eq!(search.max_results, Some(5));
    assert_eq!(search.context.os.as_deref(), Some("linux"));
}

#[test]
fn contribute_missing_fields() {
    for args in [vec!["contribute"], vec!["contribute", "--title", "test"]] {
        let err = request(args, None).unwrap_err();
        assert!(err.to_string().contains("Missing required"));
    }
}

#[test]
fn contribute_all_cli_flags() {
    let Ok(CommandRequest::Contribute(c)) = request(
        vec!["contribute", "--title", "T", "--content", "C", "--tags", "a,b", "--model", "m"],
        None,
    ) else {
        panic!("expected contribute");
    };
    assert_eq!(c.tags, vec!["a", "b"]);
    assert_eq!(c.model.as_deref(), Some("m"));
}

#[test]
fn contribute_from_stdin_only() {
    let Ok(CommandRequest::Contribute(c)) = request(
        vec!["contribute"],
        Some(json!({ "title": "T", "content": "C", "tags": ["a", "b"], "model": "gpt-4" })),
    ) else {
        panic!("expected contribute");
    };
    assert_eq!(c.title, "T");
    assert_eq!(c.tags, vec!["a", "b"]);
}

#[test]
fn contribute_tags_list_and_string_equivalent() {
    let from_list = request(
        vec!["contribute"],
        Some(json!({ "title": "T", "content": "C", "tags": ["a", "b"] })),
    )
    .unwrap();
    let from_string = request(
        vec!["contribute"],
        Some(json!({ "title": "T", "content": "C", "tags": "a,b" })),
    )
    .unwrap();
    assert_eq!(from_list, from_string);
}

#[test]
fn contribute_effort_and_environment_from_stdin() {
    let Ok(CommandRequest::Contribute(c)) = request(
        vec!["contribute"],
        Some(json!({
            "title": "T", "content": "C", "tags": ["a"], "ttl": "30d",
            "effort": { "tokensUsed": 1000, "durationSeconds": 60, "toolCalls": 5 },
            "environment": { "language": "python", "os": "linux" }
        })),
    ) else {
        panic!("expected contribute");
    };
    let effort = c.effort.expect("effort");
    assert_eq!(effort.tokens_used, Some(1000));
    assert_eq!(effort.duration_seconds, Some(60));
    assert_eq!(effort.tool_calls, Some(5));
    let env = c.environment.expect("environment");
    assert_eq!(env.language.as_deref(), Some("python"));
    assert_eq!(env.os.as_deref(), Some("linux"));
    assert_eq!(c.ttl.as_deref(), Some("30d"));
}

#[test]
fn feedback_positionals_required() {
    for args in [vec!["feedback"], vec!["feedback", "k_abc123"]] {
        let err = request(args, None).unwrap_err();
        assert!(err.to_string().contains("Usage"));
    }
}

#[test]
fn feedback_from_stdin_with_id_alias() {
    let Ok(CommandRequest::Feedback(f)) =
        request(vec!["feedback"], Some(json!({ "id": "k_abc123", "outcome": "useful" })))
    else {
        panic!("expected feedback");
    };
    assert_eq!(f.entry_id, "k_abc123");
    assert_eq!(f.outcome, Outcome::Useful);
}

#[test]
fn feedback_correction_from_stdin() {
    let Ok(CommandRequest::Feedback(f)) = request(
        vec!["feedback"],
        Some(json!({
            "entryId": "k_abc", "outcome": "not_useful", "reason": "wrong", "notes": "n",
            "correction": { "content": "fixed", "title": "Fixed Title", "tags": ["t1", "t2"] }
        })),
    ) else {
        panic!("expected feedback");
    };
    assert_eq!(f.outcome, Outcome::NotUseful);
    assert_eq!(f.reason.as_deref(), Some("wrong"));
    assert_eq!(f.notes.as_deref(), Some("n"));
    let correction = f.correction.expect("correction");
    assert_eq!(correction.content.as_deref(), Some("fixed"));
    assert_eq!(correction.tags, vec!["t1", "t2"]);
}

#[test]
fn single_argument_commands_require_argument() {
    for command in ["get", "retract", "claim", "verify"] {
        let err = request(vec![command], None).unwrap_err();
        assert!(err.to_string().contains("Usage"), "{command}: {err}");
    }
}

#[test]
fn unknown_command() {
    let err = request(vec!["notacommand"], None).unwrap_err();
    assert!(err.to_string().contains("Unknown command"));
}

// =============================================================================
// STDIN TESTS
// =============================================================================

#[test]
fn invalid_json_stops_before_validation() {
    let err = request_raw(vec!["contribute"], "not json{").unwrap_err();
    assert!(err.to_string().contains("Invalid JSON"));
    assert!(!err.to_string().contains("Missing required"));
}

#[test]
fn empty_stdin_behaves_as_absent() {
    let err = request_raw(vec!["contribute"], "").unwrap_err();
    assert!(err.to_string().contains("Missing required"));
}

#[test]
fn stdin_not_read_for_other_commands() {
    let result = request_raw(vec!["get", "k_1"], "not json{").unwrap();
    assert!(matches!(
        result,
        Prepared::Dispatch(d) if d.request == CommandRequest::Get { id: "k_1".into() }
    ));
}

#[test]
fn version_flags() {
    for flag in ["--version", "-v"] {
        let result = prepare(&raw_args(vec![flag]), &mut None::<String>).unwrap();
        assert_eq!(result, Prepared::Version(env!("CARGO_PKG_VERSION").to_string()));
    }
}
