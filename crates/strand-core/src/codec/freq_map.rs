//! Delimited codec for frequency maps.
//!
//! # Format
//!
//! Entries are written in map order as `key SEP count`, joined by `SEP`, with no
//! trailing separator. `SEP` is the two-byte token `\,` (`0x5C 0x2C`); counts
//! are signed decimal ASCII. A backslash inside a key is doubled, so `\,`
//! never occurs naturally and a bare comma in a key needs no escape:
//!
//! ```text
//! {"x": 10, "y": 5}   ->  x\,10\,y\,5
//! {"a,b": 1}          ->  a,b\,1
//! {"a\b": 1}          ->  a\\b\,1
//! ```
//!
//! Entries with a null count are skipped. An empty map encodes to no bytes.

use std::mem;

use crate::error::SerialisationError;
use crate::types::{FreqMap, TypeTag, Value};

use super::Codec;

const ESCAPE: u8 = b'\\';
const DELIMITER: u8 = b',';
const SEPARATOR: [u8; 2] = [ESCAPE, DELIMITER];

/// Codec for [`Value::FreqMap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FreqMapCodec;

/// Decoder state while scanning for separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    AfterEscape,
}

impl FreqMapCodec {
    fn encode_map(map: &FreqMap) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut first = true;
        for (key, count) in map.iter() {
            let Some(count) = count else { continue };
            if !first {
                buf.extend_from_slice(&SEPARATOR);
            }
            first = false;
            for &b in key.as_bytes() {
                if b == ESCAPE {
                    buf.push(ESCAPE);
                }
                buf.push(b);
            }
            buf.extend_from_slice(&SEPARATOR);
            buf.extend_from_slice(count.to_string().as_bytes());
        }
        buf
    }

    /// Splits the input on separators, unescaping as it goes.
    fn split_fields(bytes: &[u8]) -> Result<Vec<Vec<u8>>, SerialisationError> {
        let mut fields = Vec::new();
        let mut current = Vec::new();
        let mut state = ScanState::Normal;

        for (position, &b) in bytes.iter().enumerate() {
            state = match (state, b) {
                (ScanState::Normal, ESCAPE) => ScanState::AfterEscape,
                (ScanState::Normal, _) => {
                    current.push(b);
                    ScanState::Normal
                }
                (ScanState::AfterEscape, DELIMITER) => {
                    fields.push(mem::take(&mut current));
                    ScanState::Normal
                }
                (ScanState::AfterEscape, ESCAPE) => {
                    current.push(ESCAPE);
                    ScanState::Normal
                }
                (ScanState::AfterEscape, other) => {
                    return Err(SerialisationError::escape(
                        position,
                        format!("unexpected byte {other:#04x} after escape"),
                    ));
                }
            };
        }

        if state == ScanState::AfterEscape {
            return Err(SerialisationError::escape(bytes.len() - 1, "trailing escape byte"));
        }
        fields.push(current);
        Ok(fields)
    }

    fn decode_map(bytes: &[u8]) -> Result<FreqMap, SerialisationError> {
        if bytes.is_empty() {
            return Ok(FreqMap::new());
        }

        let fields = Self::split_fields(bytes)?;
        if fields.len() % 2 != 0 {
            return Err(SerialisationError::decode_with_bytes(
                format!("frequency map has {} fields, expected key/count pairs", fields.len()),
                bytes,
            ));
        }

        let mut map = FreqMap::with_capacity(fields.len() / 2);
        for pair in fields.chunks_exact(2) {
            let key = String::from_utf8(pair[0].clone())
                .map_err(|e| SerialisationError::Decode(format!("invalid key UTF-8: {e}")))?;
            let count = std::str::from_utf8(&pair[1])
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    SerialisationError::decode_with_bytes(
                        format!("invalid count for key '{key}'"),
                        &pair[1],
                    )
                })?;
            if map.contains_key(&key) {
                return Err(SerialisationError::decode_with_bytes(
                    format!("duplicate key '{key}' in frequency map"),
                    bytes,
                ));
            }
            map.insert(key, count);
        }
        Ok(map)
    }
}

impl Codec for FreqMapCodec {
    fn name(&self) -> &'static str {
        "FreqMapCodec"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        type_tag == TypeTag::FreqMap
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, SerialisationError> {
        match value {
            Value::FreqMap(map) => Ok(Self::encode_map(map)),
            other => Err(SerialisationError::unsupported(self.name(), other.type_tag())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        Self::decode_map(bytes).map(Value::FreqMap)
    }

    fn decode_empty(&self) -> Option<Value> {
        Some(Value::FreqMap(FreqMap::new()))
    }
}
