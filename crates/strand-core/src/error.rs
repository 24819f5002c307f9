//! Error types for the core crate.

use thiserror::Error;

use crate::types::TypeTag;

/// Maximum length for byte previews in error messages.
const MAX_PREVIEW_LEN: usize = 32;

/// Errors raised while building schemas or encoding and decoding elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerialisationError {
    /// The schema is missing something every serialiser depends on.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A codec or serialiser was asked to handle a type outside its capability.
    #[error("{handler} cannot handle type {type_tag}")]
    UnsupportedType {
        /// Name of the codec or serialiser that refused the type.
        handler: String,
        /// The type it was asked to handle.
        type_tag: TypeTag,
    },

    /// An element referenced a group the schema does not define.
    #[error("no group definition found for group '{0}'")]
    UnknownGroup(String),

    /// Input bytes were truncated or structurally invalid.
    #[error("decode error: {0}")]
    Decode(String),

    /// A delimited value contained a malformed escape sequence.
    #[error("malformed escape sequence at byte {position}: {reason}")]
    Escape {
        /// Offset of the offending byte in the input.
        position: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A value could not be written (e.g. a segment longer than the framing allows).
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl SerialisationError {
    /// Creates an unsupported type error for the named handler.
    #[must_use]
    pub fn unsupported(handler: impl Into<String>, type_tag: TypeTag) -> Self {
        Self::UnsupportedType { handler: handler.into(), type_tag }
    }

    /// Creates a truncated-input decode error, naming what was being read.
    #[must_use]
    pub fn truncated(reading: &str) -> Self {
        Self::Decode(format!("unexpected end of input while reading {reading}"))
    }

    /// Creates a decode error that includes a hex preview of the bytes involved.
    ///
    /// The preview is truncated to 32 bytes.
    #[must_use]
    pub fn decode_with_bytes(message: impl std::fmt::Display, bytes: &[u8]) -> Self {
        let shown = &bytes[..bytes.len().min(MAX_PREVIEW_LEN)];
        let mut preview: String = shown.iter().map(|b| format!("{b:02x}")).collect();
        if bytes.len() > MAX_PREVIEW_LEN {
            preview.push_str("...");
        }
        Self::Decode(format!("{message} (bytes: {preview})"))
    }

    /// Creates an escape error at the given position.
    #[must_use]
    pub fn escape(position: usize, reason: impl Into<String>) -> Self {
        Self::Escape { position, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_message_names_handler_and_type() {
        let err = SerialisationError::unsupported("LongCodec", TypeTag::String);
        assert_eq!(err.to_string(), "LongCodec cannot handle type string");
    }

    #[test]
    fn decode_preview_is_truncated() {
        let err = SerialisationError::decode_with_bytes("bad", &[0xab; 40]);
        let msg = err.to_string();
        assert!(msg.ends_with("...)"));
        assert!(msg.contains("abab"));
    }
}
