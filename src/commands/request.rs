//! Validation: resolved invocation to typed request.

use std::str::FromStr;

use reqwest::Method;
use serde::Serialize;

use crate::api::{ApiError, ApiRequest};
use crate::args::ResolvedInvocation;
use crate::commands::{command_usage, CommandKind};
use crate::error::CliError;

/// Shortest accepted search query, in characters.
pub const MIN_QUERY_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

impl SearchContext {
    fn is_empty(&self) -> bool {
        self.os.is_none() && self.language.is_none() && self.runtime.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "SearchContext::is_empty")]
    pub context: SearchContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Effort {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeRequest {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub error_messages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_approaches: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effort: Option<Effort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Useful,
    NotUseful,
}

impl FromStr for Outcome {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "useful" => Ok(Outcome::Useful),
            "not_useful" => Ok(Outcome::NotUseful),
            other => Err(CliError::Validation(format!(
                "Invalid outcome '{other}': expected 'useful' or 'not_useful'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Correction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRequest {
    /// Goes into the request path, not the body.
    #[serde(skip)]
    pub entry_id: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<Correction>,
}

/// A validated command, ready to hand to the API client.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandRequest {
    Search(SearchRequest),
    Contribute(ContributeRequest),
    Feedback(FeedbackRequest),
    Get { id: String },
    Retract { id: String },
    Status,
    Credits,
    Claim { email: String },
    Verify { code: String },
}

impl CommandRequest {
    /// Validate a resolved invocation.
    ///
    /// Never partially executes anything: either a complete request comes
    /// back or the first problem found is reported.
    pub fn from_invocation(inv: &ResolvedInvocation) -> Result<Self, CliError> {
        let request = match inv.command {
            CommandKind::Search => CommandRequest::Search(search(inv)?),
            CommandKind::Contribute => CommandRequest::Contribute(contribute(inv)?),
            CommandKind::Feedback => CommandRequest::Feedback(feedback(inv)?),
            CommandKind::Get => CommandRequest::Get {
                id: required_positional(inv, 0, "Missing entry id")?,
            },
            CommandKind::Retract => CommandRequest::Retract {
                id: required_positional(inv, 0, "Missing entry id")?,
            },
            CommandKind::Status => CommandRequest::Status,
            CommandKind::Credits => CommandRequest::Credits,
            CommandKind::Claim => {
                let email = required_positional(inv, 0, "Missing email address")?;
                if !email.contains('@') {
                    return Err(CliError::Validation(format!(
                        "Invalid email address '{email}'"
                    )));
                }
                CommandRequest::Claim { email }
            }
            CommandKind::Verify => CommandRequest::Verify {
                code: required_positional(inv, 0, "Missing verification code")?,
            },
        };
        tracing::debug!(command = %request.kind(), "invocation validated");
        Ok(request)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            CommandRequest::Search(_) => CommandKind::Search,
            CommandRequest::Contribute(_) => CommandKind::Contribute,
            CommandRequest::Feedback(_) => CommandKind::Feedback,
            CommandRequest::Get { .. } => CommandKind::Get,
            CommandRequest::Retract { .. } => CommandKind::Retract,
            CommandRequest::Status => CommandKind::Status,
            CommandRequest::Credits => CommandKind::Credits,
            CommandRequest::Claim { .. } => CommandKind::Claim,
            CommandRequest::Verify { .. } => CommandKind::Verify,
        }
    }

    /// The single HTTP call this command maps to.
    pub fn to_api_request(&self) -> Result<ApiRequest, ApiError> {
        let request = match self {
            CommandRequest::Search(body) => {
                ApiRequest::new(Method::POST, &["v1", "knowledge", "search"]).with_json(body)?
            }
            CommandRequest::Contribute(body) => {
                ApiRequest::new(Method::POST, &["v1", "knowledge", "contribute"]).with_json(body)?
            }
            CommandRequest::Feedback(body) => ApiRequest::new(
                Method::POST,
                &["v1", "knowledge", body.entry_id.as_str(), "feedback"],
            )
            .with_json(body)?,
            CommandRequest::Get { id } => {
                ApiRequest::new(Method::GET, &["v1", "knowledge", id.as_str()])
            }
            CommandRequest::Retract { id } => {
                ApiRequest::new(Method::DELETE, &["v1", "knowledge", id.as_str()])
            }
            CommandRequest::Status => ApiRequest::new(Method::GET, &["v1", "agents", "me"]),
            CommandRequest::Credits => {
                ApiRequest::new(Method::GET, &["v1", "agents", "me", "credits"])
            }
            CommandRequest::Claim { email } => {
                ApiRequest::new(Method::POST, &["v1", "agents", "claim"])
                    .with_json(&serde_json::json!({ "email": email }))?
            }
            CommandRequest::Verify { code } => {
                ApiRequest::new(Method::POST, &["v1", "agents", "verify"])
                    .with_json(&serde_json::json!({ "code": code }))?
            }
        };
        Ok(request)
    }
}

fn required_positional(
    inv: &ResolvedInvocation,
    index: usize,
    message: &str,
) -> Result<String, CliError> {
    inv.positional(index)
        .map(str::to_string)
        .ok_or_else(|| CliError::usage(message, command_usage(inv.command)))
}

fn owned(inv: &ResolvedInvocation, key: &str) -> Option<String> {
    inv.text(key).map(str::to_string)
}

/// Parse an optional numeric option, naming the flag on failure.
fn number<T: FromStr>(inv: &ResolvedInvocation, key: &str, flag: &str) -> Result<Option<T>, CliError> {
    inv.text(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                CliError::Validation(format!("Invalid value for --{flag}: '{raw}' (expected a number)"))
            })
        })
        .transpose()
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn search(inv: &ResolvedInvocation) -> Result<SearchRequest, CliError> {
    let query = inv.positionals_from(0).join(" ");
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::usage(
            "Missing search query",
            command_usage(CommandKind::Search),
        ));
    }
    let length = query.chars().count();
    if length < MIN_QUERY_CHARS {
        return Err(CliError::Validation(format!(
            "Query too short ({length} characters, minimum {MIN_QUERY_CHARS})"
        )));
    }

    let min_quality = number::<f64>(inv, "minQuality", "min-quality")?;
    if let Some(q) = min_quality {
        if !(0.0..=1.0).contains(&q) {
            return Err(CliError::Validation(format!(
                "Invalid value for --min-quality: {q} (expected 0.0-1.0)"
            )));
        }
    }

    Ok(SearchRequest {
        query: query.to_string(),
        max_results: number(inv, "maxResults", "max-results")?,
        min_quality,
        max_tokens: number(inv, "maxTokens", "max-tokens")?,
        context: SearchContext {
            os: owned(inv, "contextOs"),
            language: owned(inv, "contextLanguage"),
            runtime: owned(inv, "contextRuntime"),
        },
    })
}

fn contribute(inv: &ResolvedInvocation) -> Result<ContributeRequest, CliError> {
    let title = owned(inv, "title");
    let content = owned(inv, "content");
    let tags = inv.text("tags").map(split_tags).unwrap_or_default();

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("--title");
    }
    if content.is_none() {
        missing.push("--content");
    }
    if tags.is_empty() {
        missing.push("--tags");
    }
    let (Some(title), Some(content)) = (title, content) else {
        return Err(missing_required(&missing));
    };
    if !missing.is_empty() {
        return Err(missing_required(&missing));
    }

    let effort = Effort {
        tokens_used: number(inv, "effortTokensUsed", "effort-tokens-used")?,
        duration_seconds: number(inv, "effortDurationSeconds", "effort-duration-seconds")?,
        tool_calls: number(inv, "effortToolCalls", "effort-tool-calls")?,
    };
    let environment = Environment {
        language: owned(inv, "envLanguage"),
        os: owned(inv, "envOs"),
        framework: owned(inv, "envFramework"),
        framework_version: owned(inv, "envFrameworkVersion"),
        runtime: owned(inv, "envRuntime"),
        runtime_version: owned(inv, "envRuntimeVersion"),
    };

    Ok(ContributeRequest {
        title,
        content,
        tags,
        model: owned(inv, "model"),
        ttl: owned(inv, "ttl"),
        problem: owned(inv, "problem"),
        solution: owned(inv, "solution"),
        error_messages: inv.list("errorMessages"),
        failed_approaches: inv.list("failedApproaches"),
        effort: (effort != Effort::default()).then_some(effort),
        environment: (environment != Environment::default()).then_some(environment),
    })
}

fn missing_required(fields: &[&str]) -> CliError {
    CliError::Validation(format!(
        "Missing required fields: {}\n\n{}",
        fields.join(", "),
        command_usage(CommandKind::Contribute)
    ))
}

fn feedback(inv: &ResolvedInvocation) -> Result<FeedbackRequest, CliError> {
    let (Some(entry_id), Some(outcome)) = (inv.positional(0), inv.positional(1)) else {
        return Err(CliError::usage(
            "Missing entry id or outcome",
            command_usage(CommandKind::Feedback),
        ));
    };

    let correction = Correction {
        content: owned(inv, "correctionContent"),
        title: owned(inv, "correctionTitle"),
        tags: inv.text("correctionTags").map(split_tags).unwrap_or_default(),
    };

    Ok(FeedbackRequest {
        entry_id: entry_id.to_string(),
        outcome: outcome.parse()?,
        reason: owned(inv, "reason"),
        notes: owned(inv, "notes"),
        correction: (correction != Correction::default()).then_some(correction),
    })
}
