//! Standard input handling: an optional JSON document piped to the command.

use std::io::{self, IsTerminal, Read};

use serde_json::{Map, Value};

use crate::error::CliError;

/// Where the raw stdin document comes from.
///
/// The binary uses `ProcessStdin`; tests pass an `Option<String>` directly.
pub trait InputSource {
    /// Read the whole document. `None` means "no document".
    fn read_document(&mut self) -> Result<Option<String>, CliError>;
}

/// The process's real standard input.
///
/// Skipped entirely when attached to a terminal, so interactive use never
/// blocks waiting for EOF.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessStdin;

impl InputSource for ProcessStdin {
    fn read_document(&mut self) -> Result<Option<String>, CliError> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            tracing::debug!("stdin is a terminal, skipping document read");
            return Ok(None);
        }

        let mut bytes = Vec::new();
        stdin.lock().read_to_end(&mut bytes)?;
        tracing::debug!(bytes = bytes.len(), "read stdin document");
        decode_document(bytes)
    }
}

impl InputSource for Option<String> {
    fn read_document(&mut self) -> Result<Option<String>, CliError> {
        Ok(self.take().and_then(non_blank))
    }
}

/// Decode raw stdin bytes. Bytes that are not UTF-8 cannot be JSON text.
pub fn decode_document(bytes: Vec<u8>) -> Result<Option<String>, CliError> {
    let raw = String::from_utf8(bytes).map_err(CliError::InvalidEncoding)?;
    Ok(non_blank(raw))
}

fn non_blank(raw: String) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}

/// Parse the raw stdin text into a JSON object.
///
/// - `None` or blank input → `Ok(None)`.
/// - Unparseable input → `CliError::InvalidJson`.
/// - Valid JSON that is not an object → `Ok(None)` with a warning.
pub fn parse_document(raw: Option<&str>) -> Result<Option<Map<String, Value>>, CliError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(raw).map_err(CliError::InvalidJson)? {
        Value::Object(map) => Ok(Some(map)),
        other => {
            tracing::warn!(kind = json_kind(&other), "ignoring non-object stdin document");
            Ok(None)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_absent() {
        assert!(parse_document(None).unwrap().is_none());
        assert!(parse_document(Some("")).unwrap().is_none());
        assert!(parse_document(Some("  \n")).unwrap().is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_document(Some("not json{")).unwrap_err();
        assert!(matches!(err, CliError::InvalidJson(_)));
    }

    #[test]
    fn non_object_is_ignored() {
        assert!(parse_document(Some("[1, 2]")).unwrap().is_none());
        assert!(parse_document(Some("\"text\"")).unwrap().is_none());
    }

    #[test]
    fn object_is_returned() {
        let map = parse_document(Some(r#"{"title": "T"}"#)).unwrap().unwrap();
        assert_eq!(map.get("title"), Some(&Value::String("T".into())));
    }

    #[test]
    fn non_utf8_bytes_are_invalid_json() {
        let err = decode_document(b"{\"title\": \"\xff\"}".to_vec()).unwrap_err();
        assert!(matches!(err, CliError::InvalidEncoding(_)));
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn utf8_bytes_decode() {
        let raw = decode_document("{\"title\": \"é\"}".as_bytes().to_vec()).unwrap();
        assert_eq!(raw.as_deref(), Some("{\"title\": \"é\"}"));
        assert!(decode_document(b" \n".to_vec()).unwrap().is_none());
    }

    #[test]
    fn option_source_filters_blank() {
        let mut source = Some("   ".to_string());
        assert!(source.read_document().unwrap().is_none());

        let mut source = Some("{}".to_string());
        assert_eq!(source.read_document().unwrap().as_deref(), Some("{}"));
        assert!(source.read_document().unwrap().is_none());
    }
}
