//! Nudge token expansion.
//!
//! Service messages embed machine-readable hints such as
//! `[PRIOR:CONTRIBUTE]` or `[PRIOR:FEEDBACK id="k_1"]`. Before display they
//! are rewritten into inline command hints: `` `prior contribute` ``.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `[PRIOR:<COMMAND>]` with optional whitespace-separated attributes.
/// The command is matched in any case and lowercased on expansion.
static NUDGE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[PRIOR:([A-Za-z][A-Za-z0-9_]*)(?:\s[^\]\[]*)?\]")
        .expect("nudge token pattern is valid")
});

/// Replace every nudge token in `message`.
///
/// Returns the input borrowed when there is nothing to replace.
pub fn expand_nudge_tokens(message: &str) -> Cow<'_, str> {
    NUDGE_TOKEN.replace_all(message, |caps: &Captures<'_>| {
        format!("`prior {}`", caps[1].to_lowercase())
    })
}

/// Optional-message form: absence passes through unchanged.
pub fn expand_message(message: Option<&str>) -> Option<Cow<'_, str>> {
    message.map(expand_nudge_tokens)
}
