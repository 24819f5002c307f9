//! Core data types for strand.
//!
//! This module defines the values, elements and identities that the codecs and
//! serialisers turn into bytes.

mod element;
mod freq_map;
mod id;
mod value;

pub use element::{Edge, Element, Entity, Properties};
pub use freq_map::FreqMap;
pub use id::{EdgeId, ElementId, EntitySeed};
pub use value::{TypeTag, Value};
