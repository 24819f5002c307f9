//! Per-type byte codecs.
//!
//! A [`Codec`] converts one [`Value`] type to and from bytes. The schema binds
//! a codec to the vertex type and to every declared property, and the
//! serialisers compose them into whole-identifier and whole-element encodings.
//!
//! # Null and empty
//!
//! Codecs never see null input or empty bytes through the routing helpers:
//!
//! - [`Codec::encode_opt`] sends `None` to [`Codec::encode_null`], whose default
//!   is "no bytes", so callers can tell "no value" apart from "empty value".
//! - [`Codec::decode_opt`] sends empty input to [`Codec::decode_empty`], whose
//!   default is "no value".
//!
//! # Example
//!
//! ```
//! use strand_core::codec::{Codec, LongCodec};
//! use strand_core::{TypeTag, Value};
//!
//! let codec = LongCodec;
//! assert!(codec.can_handle(TypeTag::Long));
//!
//! let bytes = codec.encode(&Value::Long(42)).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap(), Value::Long(42));
//!
//! // Null has no byte representation and empty bytes decode to no value.
//! assert_eq!(codec.encode_opt(None).unwrap(), None);
//! assert_eq!(codec.decode_opt(&[]).unwrap(), None);
//! ```

mod freq_map;
mod ordered;
mod primitive;

use std::fmt;
use std::sync::Arc;

use crate::error::SerialisationError;
use crate::types::{TypeTag, Value};

pub use freq_map::FreqMapCodec;
pub use ordered::OrderedLongCodec;
pub use primitive::{BooleanCodec, BytesCodec, FloatCodec, IntCodec, LongCodec, StringCodec};

/// A shared, dynamically dispatched codec.
pub type CodecRef = Arc<dyn Codec>;

/// Converts values of one type to and from bytes.
///
/// Implementations hold no per-call mutable state and may be shared across
/// threads.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// Returns `true` iff this codec can encode and decode values of `type_tag`.
    ///
    /// Must agree with [`encode`](Self::encode): a value whose tag is handled
    /// encodes, any other value fails with
    /// [`SerialisationError::UnsupportedType`].
    fn can_handle(&self, type_tag: TypeTag) -> bool;

    /// Encode a non-null value.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::UnsupportedType`] if the value's type is
    /// not handled by this codec.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError>;

    /// Decode a value from non-empty bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the bytes are not a valid
    /// encoding.
    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError>;

    /// The representation of a null value. Defaults to no bytes.
    fn encode_null(&self) -> Option<Vec<u8>> {
        None
    }

    /// The value produced by an empty byte representation. Defaults to no value.
    fn decode_empty(&self) -> Option<Value> {
        None
    }

    /// Encode a possibly-null value, routing null to [`encode_null`](Self::encode_null).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`encode`](Self::encode).
    fn encode_opt(&self, value: Option<&Value>) -> Result<Option<Vec<u8>>, SerialisationError> {
        match value {
            Some(v) => self.encode(v).map(Some),
            None => Ok(self.encode_null()),
        }
    }

    /// Decode possibly-empty bytes, routing empty input to
    /// [`decode_empty`](Self::decode_empty).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`decode`](Self::decode).
    fn decode_opt(&self, bytes: &[u8]) -> Result<Option<Value>, SerialisationError> {
        if bytes.is_empty() {
            Ok(self.decode_empty())
        } else {
            self.decode(bytes).map(Some)
        }
    }
}

/// The codec inferred for a declared property type.
///
/// Returns `None` for element shapes, which have no value codec.
#[must_use]
pub fn default_codec_for(type_tag: TypeTag) -> Option<CodecRef> {
    let codec: CodecRef = match type_tag {
        TypeTag::Bool => Arc::new(BooleanCodec),
        TypeTag::Int => Arc::new(IntCodec),
        TypeTag::Long => Arc::new(LongCodec),
        TypeTag::Float => Arc::new(FloatCodec),
        TypeTag::String => Arc::new(StringCodec),
        TypeTag::Bytes => Arc::new(BytesCodec),
        TypeTag::FreqMap => Arc::new(FreqMapCodec),
        TypeTag::Entity | TypeTag::Edge | TypeTag::EntitySeed | TypeTag::EdgeId => return None,
    };
    Some(codec)
}

/// Reads a fixed-width array, failing with a decode error on any other length.
pub(crate) fn fixed_width<const N: usize>(
    codec: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], SerialisationError> {
    bytes.try_into().map_err(|_| {
        SerialisationError::decode_with_bytes(
            format!("{codec} expects {N} bytes, got {}", bytes.len()),
            bytes,
        )
    })
}
