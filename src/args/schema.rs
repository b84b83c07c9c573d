//! Stdin document schemas, one record per command that accepts piped JSON.
//!
//! Each schema lists exactly the keys it recognizes (unknown keys are
//! ignored) and flattens itself into a `StdinLayer` keyed the same way the
//! parser keys CLI options.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::args::parser::OptionValue;

/// A JSON leaf accepted where the CLI would take a single value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    pub fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Number(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// `tags` arrives either as a list or as an already comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Tags {
    List(Vec<String>),
    Joined(String),
}

impl Tags {
    /// Comma-joined form, matching what `--tags a,b` produces.
    pub fn joined(self) -> String {
        match self {
            Tags::List(items) => items.join(","),
            Tags::Joined(s) => s,
        }
    }
}

/// Options and positional slots derived from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdinLayer {
    /// Positional slots by index; `None` marks a slot the document left empty.
    pub positionals: Vec<Option<String>>,
    pub options: BTreeMap<String, OptionValue>,
}

impl StdinLayer {
    fn set(&mut self, key: &str, value: Option<Scalar>) {
        if let Some(value) = value {
            self.options
                .insert(key.to_string(), OptionValue::Scalar(value.into_text()));
        }
    }

    fn set_tags(&mut self, key: &str, tags: Option<Tags>) {
        if let Some(tags) = tags {
            self.options
                .insert(key.to_string(), OptionValue::Scalar(tags.joined()));
        }
    }

    fn set_list(&mut self, key: &str, items: Option<Vec<String>>) {
        if let Some(items) = items {
            self.options.insert(key.to_string(), OptionValue::List(items));
        }
    }
}

/// A per-command stdin document.
pub trait StdinSchema: DeserializeOwned {
    fn into_layer(self) -> StdinLayer;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortInput {
    pub tokens_used: Option<Scalar>,
    pub duration_seconds: Option<Scalar>,
    pub tool_calls: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentInput {
    pub language: Option<Scalar>,
    pub os: Option<Scalar>,
    pub framework: Option<Scalar>,
    pub framework_version: Option<Scalar>,
    pub runtime: Option<Scalar>,
    pub runtime_version: Option<Scalar>,
}

/// `prior contribute` stdin document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeInput {
    pub title: Option<Scalar>,
    pub content: Option<Scalar>,
    pub tags: Option<Tags>,
    pub model: Option<Scalar>,
    pub ttl: Option<Scalar>,
    pub problem: Option<Scalar>,
    pub solution: Option<Scalar>,
    pub error_messages: Option<Vec<String>>,
    pub failed_approaches: Option<Vec<String>>,
    pub effort: Option<EffortInput>,
    pub environment: Option<EnvironmentInput>,
}

impl StdinSchema for ContributeInput {
    fn into_layer(self) -> StdinLayer {
        let mut layer = StdinLayer::default();
        layer.set("title", self.title);
        layer.set("content", self.content);
        layer.set_tags("tags", self.tags);
        layer.set("model", self.model);
        layer.set("ttl", self.ttl);
        layer.set("problem", self.problem);
        layer.set("solution", self.solution);
        layer.set_list("errorMessages", self.error_messages);
        layer.set_list("failedApproaches", self.failed_approaches);

        if let Some(effort) = self.effort {
            layer.set("effortTokensUsed", effort.tokens_used);
            layer.set("effortDurationSeconds", effort.duration_seconds);
            layer.set("effortToolCalls", effort.tool_calls);
        }
        if let Some(env) = self.environment {
            layer.set("envLanguage", env.language);
            layer.set("envOs", env.os);
            layer.set("envFramework", env.framework);
            layer.set("envFrameworkVersion", env.framework_version);
            layer.set("envRuntime", env.runtime);
            layer.set("envRuntimeVersion", env.runtime_version);
        }
        layer
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorrectionInput {
    pub content: Option<Scalar>,
    pub title: Option<Scalar>,
    pub tags: Option<Tags>,
}

/// `prior feedback` stdin document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub entry_id: Option<Scalar>,
    /// Alias for `entryId`; only consulted when `entryId` is absent.
    pub id: Option<Scalar>,
    pub outcome: Option<Scalar>,
    pub reason: Option<Scalar>,
    pub notes: Option<Scalar>,
    pub correction: Option<CorrectionInput>,
}

impl StdinSchema for FeedbackInput {
    fn into_layer(self) -> StdinLayer {
        let mut layer = StdinLayer {
            positionals: vec![
                self.entry_id.or(self.id).map(Scalar::into_text),
                self.outcome.map(Scalar::into_text),
            ],
            options: BTreeMap::new(),
        };
        layer.set("reason", self.reason);
        layer.set("notes", self.notes);

        if let Some(correction) = self.correction {
            layer.set("correctionContent", correction.content);
            layer.set("correctionTitle", correction.title);
            layer.set_tags("correctionTags", correction.tags);
        }
        layer
    }
}
