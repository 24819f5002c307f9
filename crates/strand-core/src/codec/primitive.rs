//! Codecs for scalar values.
//!
//! # Format
//!
//! - `Bool`: 1 byte, `0x00` (false) or `0x01` (true)
//! - `Int`: 4 bytes, big-endian i32
//! - `Long`: 8 bytes, big-endian i64
//! - `Float`: 8 bytes, big-endian IEEE 754 bits
//! - `String`: raw UTF-8 bytes
//! - `Bytes`: the bytes themselves
//!
//! Strings and bytes have no framing of their own; the serialisers
//! length-prefix every segment. An empty string or byte array encodes to no
//! bytes, so those two codecs decode empty input to an empty value.

use crate::error::SerialisationError;
use crate::types::{TypeTag, Value};

use super::{fixed_width, Codec};

/// Codec for [`Value::Bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanCodec;

impl Codec for BooleanCodec {
    fn name(&self) -> &'static str {
        "BooleanCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Bool
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Bool(b) => Ok(vec![u8::from(*b)]),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        match fixed_width::<1>(self.name(), bytes)? {
            [0] => Ok(Value::Bool(false)),
            [1] => Ok(Value::Bool(true)),
            [b] => Err(SerialisationError::Decode(format!("invalid boolean byte: {b:#04x}"))),
        }
    }
}

/// Codec for [`Value::Int`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl Codec for IntCodec {
    fn name(&self) -> &'static str {
        "IntCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Int
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Int(i) => Ok(i.to_be_bytes().to_vec()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        Ok(Value::Int(i32::from_be_bytes(fixed_width(self.name(), bytes)?)))
    }
}

/// Codec for [`Value::Long`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LongCodec;

impl Codec for LongCodec {
    fn name(&self) -> &'static str {
        "LongCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Long
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Long(l) => Ok(l.to_be_bytes().to_vec()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        Ok(Value::Long(i64::from_be_bytes(fixed_width(self.name(), bytes)?)))
    }
}

/// Codec for [`Value::Float`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl Codec for FloatCodec {
    fn name(&self) -> &'static str {
        "FloatCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Float
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Float(f) => Ok(f.to_bits().to_be_bytes().to_vec()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        let bits = u64::from_be_bytes(fixed_width(self.name(), bytes)?);
        Ok(Value::Float(f64::from_bits(bits)))
    }
}

/// Codec for [`Value::String`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec for StringCodec {
    fn name(&self) -> &'static str {
        "StringCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::String
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::String(s) => Ok(s.as_bytes().to_vec()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        let s = std::str::from_utf8(bytes).map_err(|e| {
            SerialisationError::decode_with_bytes(format!("invalid UTF-8: {e}"), bytes)
        })?;
        Ok(Value::String(s.to_owned()))
    }

    fn decode_empty(&self) -> Option<Value> {
        Some(Value::String(String::new()))
    }
}

/// Codec for [`Value::Bytes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl Codec for BytesCodec {
    fn name(&self) -> &'static str {
        "BytesCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Bytes
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        Ok(Value::Bytes(bytes.to_vec()))
    }

    fn decode_empty(&self) -> Option<Value> {
        Some(Value::Bytes(Vec::new()))
    }
}
