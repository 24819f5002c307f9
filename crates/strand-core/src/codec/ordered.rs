//! Sort-order preserving codec for 64-bit integers.
//!
//! Flipping the sign bit (XOR with `0x8000_0000_0000_0000`) and writing the
//! result big-endian makes unsigned byte-wise comparison of the encoded values
//! agree with numeric comparison, so negative vertices sort before positive
//! ones in the store. Use it as the vertex codec when numeric vertices should
//! scan in numeric order.

use crate::error::SerialisationError;
use crate::types::{TypeTag, Value};

use super::{fixed_width, Codec};

const SIGN_FLIP_I64: u64 = 0x8000_0000_0000_0000;

/// Codec for [`Value::Long`] whose byte order matches numeric order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedLongCodec;

impl Codec for OrderedLongCodec {
    fn name(&self) -> &'static str {
        "OrderedLongCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::Long
    }

    #[allow(clippy::cast_sign_loss)]
    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::Long(l) => Ok(((*l as u64) ^ SIGN_FLIP_I64).to_be_bytes().to_vec()),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        let encoded = u64::from_be_bytes(fixed_width(self.name(), bytes)?);
        Ok(Value::Long((encoded ^ SIGN_FLIP_I64) as i64))
    }
}
