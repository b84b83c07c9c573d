//! Argument handling pipeline for prior.
//!
//! This module turns raw process arguments and an optional piped JSON
//! document into one validated command:
//!
//! ```text
//! Tokens → Parse → (help/version) → Read stdin → Merge → Validate → Dispatch
//! ```
//!
//! Each stage is a pure function over explicit inputs and can be
//! unit-tested independently; only `ProcessStdin` touches the process.

mod merge;
mod parser;
mod pipeline;
mod registry;
mod schema;
mod stdin;

pub use merge::{identify_command, overlay, resolve, stdin_layer, ResolvedInvocation};
pub use parser::{kebab_to_camel, parse, parse_args, ArgBag, OptionValue};
pub use pipeline::{prepare, Dispatch, Prepared};
pub use registry::{collector_keys, option_registry, OptionArity, OptionDef, OptionScope};
pub use schema::{
    ContributeInput, CorrectionInput, EffortInput, EnvironmentInput, FeedbackInput, Scalar,
    StdinLayer, StdinSchema, Tags,
};
pub use stdin::{decode_document, parse_document, InputSource, ProcessStdin};
