//! Property and vertex values.
//!
//! This module provides the [`Value`] enum, which holds every value a codec can
//! turn into bytes, and the [`TypeTag`] used to ask codecs and serialisers
//! whether they can handle a type.
//!
//! # Example
//!
//! ```
//! use strand_core::{TypeTag, Value};
//!
//! let name: Value = "Alice".into();
//! let count: Value = 30i64.into();
//!
//! assert_eq!(name.as_str(), Some("Alice"));
//! assert_eq!(count.as_long(), Some(30));
//! assert_eq!(count.type_tag(), TypeTag::Long);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FreqMap;

/// A value stored as a vertex or as a property on an entity or edge.
///
/// There is no null variant. An absent or null value is `None` wherever an
/// `Option<&Value>` is accepted.
///
/// | Variant | Rust Type | Tag |
/// |---------|-----------|-----|
/// | `Bool` | `bool` | [`TypeTag::Bool`] |
/// | `Int` | `i32` | [`TypeTag::Int`] |
/// | `Long` | `i64` | [`TypeTag::Long`] |
/// | `Float` | `f64` | [`TypeTag::Float`] |
/// | `String` | `String` | [`TypeTag::String`] |
/// | `Bytes` | `Vec<u8>` | [`TypeTag::Bytes`] |
/// | `FreqMap` | [`FreqMap`] | [`TypeTag::FreqMap`] |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered frequency map of string keys to counts
    FreqMap(FreqMap),
}

impl Value {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Int(_) => TypeTag::Int,
            Self::Long(_) => TypeTag::Long,
            Self::Float(_) => TypeTag::Float,
            Self::String(_) => TypeTag::String,
            Self::Bytes(_) => TypeTag::Bytes,
            Self::FreqMap(_) => TypeTag::FreqMap,
        }
    }

    /// Returns the value as a boolean if it is one.
    #[inline]
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as a 32-bit integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a 64-bit integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the value as a float if it is one.
    #[inline]
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a byte slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a frequency map if it is one.
    #[inline]
    #[must_use]
    pub const fn as_freq_map(&self) -> Option<&FreqMap> {
        match self {
            Self::FreqMap(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<FreqMap> for Value {
    #[inline]
    fn from(m: FreqMap) -> Self {
        Self::FreqMap(m)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::FreqMap(m) => write!(f, "<freq map, {} entries>", m.len()),
        }
    }
}

/// The type of a value or element, used for capability checks.
///
/// Codecs answer [`can_handle`](crate::codec::Codec::can_handle) for the value
/// tags; the identifier and element serialisers answer it for the element
/// shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::Long`]
    Long,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Bytes`]
    Bytes,
    /// [`Value::FreqMap`]
    FreqMap,
    /// A full entity element.
    Entity,
    /// A full edge element.
    Edge,
    /// The identity of an entity.
    EntitySeed,
    /// The identity of an edge.
    EdgeId,
}

impl TypeTag {
    /// Returns the tag's name as used in error messages and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::FreqMap => "freq_map",
            Self::Entity => "entity",
            Self::Edge => "edge",
            Self::EntitySeed => "entity_seed",
            Self::EdgeId => "edge_id",
        }
    }

    /// Returns `true` for tags that describe a [`Value`] rather than an element shape.
    #[must_use]
    pub const fn is_value(self) -> bool {
        !matches!(self, Self::Entity | Self::Edge | Self::EntitySeed | Self::EdgeId)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
