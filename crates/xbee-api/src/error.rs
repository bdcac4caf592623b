//! Codec error types.

use thiserror::Error;

/// Errors that can occur when encoding, decoding or building schema tables.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No command with this name exists in the schema tables.
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    /// A fixed-length field had neither a provided value nor a default.
    #[error("command '{command}' requires field '{field}'")]
    MissingField {
        /// Command being encoded.
        command: String,
        /// Field without a value.
        field: String,
    },

    /// A provided value did not match the field's declared length.
    #[error("field '{field}' of command '{command}' must be {expected} bytes, got {actual}")]
    FieldLength {
        /// Command being encoded.
        command: String,
        /// Offending field.
        field: String,
        /// Declared length.
        expected: usize,
        /// Length of the provided value.
        actual: usize,
    },

    /// The leading tag byte has no response definition.
    ///
    /// `command` is set when the tag is the API id of an outbound command,
    /// which usually means the module is not running in API mode.
    #[error("unrecognized response frame type 0x{tag:02X}{}", command_hint(.command))]
    UnknownFrameType {
        /// Tag byte found at the start of the body.
        tag: u8,
        /// Command whose id matches the tag, if any.
        command: Option<String>,
    },

    /// Not enough bytes remained for a field or for the IO sample layout.
    #[error("frame truncated at '{field}': expected {expected} bytes, got {actual}")]
    TruncatedFrame {
        /// Field (or structure) being read.
        field: String,
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The body was longer than a response without a variable field allows.
    #[error("'{frame}' frame longer than expected: expected {expected} bytes, got {actual}")]
    TrailingBytes {
        /// Response name.
        frame: String,
        /// Total body length defined by the layout.
        expected: usize,
        /// Actual body length.
        actual: usize,
    },

    /// A field layout or table broke a schema invariant.
    #[error("invalid schema '{spec}': {reason}")]
    SchemaInvariant {
        /// Command or response the problem was found in.
        spec: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Schema configuration could not be parsed.
    #[error("schema configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Schema configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Create a schema invariant error.
    pub fn schema(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError::SchemaInvariant {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    /// Create a truncation error for a named field or structure.
    pub fn truncated(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ApiError::TruncatedFrame {
            field: field.into(),
            expected,
            actual,
        }
    }
}

fn command_hint(command: &Option<String>) -> String {
    match command {
        Some(name) => format!(
            " (looks like a '{}' command frame; is the device in API mode?)",
            name
        ),
        None => String::new(),
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::truncated("source_addr", 2, 1);
        assert!(err.to_string().contains("source_addr"));

        let err = ApiError::schema("at", "variable-length field 'parameter' is not last");
        assert!(err.to_string().contains("invalid schema 'at'"));
    }

    #[test]
    fn test_unknown_frame_type_hint() {
        let err = ApiError::UnknownFrameType {
            tag: 0x08,
            command: Some("at".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("0x08"));
        assert!(msg.contains("'at' command frame"));

        let err = ApiError::UnknownFrameType {
            tag: 0xFE,
            command: None,
        };
        assert_eq!(err.to_string(), "unrecognized response frame type 0xFE");
    }
}
