//! `Strand` Core
//!
//! This crate provides the serialisation and key-encoding core of the Strand
//! graph store: how vertices, entities, edges and their properties become
//! bytes, and how row keys are laid out so that range scans by vertex work.
//!
//! # Overview
//!
//! - **Values**: [`Value`] and its [`TypeTag`], including [`FreqMap`] counters
//! - **Graph elements**: [`Entity`] and [`Edge`], grouped by name, and their
//!   identities [`EntitySeed`] and [`EdgeId`]
//! - **Codecs**: per-type byte codecs in [`codec`]
//! - **Schema**: the codec registry in [`schema`], which must name a vertex codec
//! - **Encoding**: element and identifier serialisers plus row keys in [`encoding`]
//!
//! # Example
//!
//! ```
//! use strand_core::codec::StringCodec;
//! use strand_core::encoding::{ElementConverter, KeyEncodingConfig};
//! use strand_core::schema::{GroupDefinition, Schema};
//! use strand_core::{Edge, Element, TypeTag, Value};
//!
//! let schema = Schema::builder()
//!     .vertex_codec(StringCodec)
//!     .edge("Follows", GroupDefinition::builder().property("weight", TypeTag::Float).build())
//!     .build()
//!     .unwrap();
//!
//! let converter = ElementConverter::new(schema, KeyEncodingConfig::default());
//!
//! // "B" follows "A": stored with "A" first, direction kept in the key.
//! let follows: Element = Edge::new("Follows", "B", "A", true).with_property("weight", 0.5).into();
//! let entries = converter.to_entries(&follows).unwrap();
//!
//! for entry in &entries {
//!     assert_eq!(converter.group_of(&entry.value).unwrap(), "Follows");
//!     let decoded = converter.to_element(entry.row_key.as_bytes(), &entry.value).unwrap();
//!     assert_eq!(decoded, follows);
//! }
//!
//! // A scan over "A" finds the edge.
//! let prefix = converter.keys().vertex_prefix(&Value::from("A")).unwrap();
//! assert!(entries.iter().any(|e| e.row_key.starts_with(&prefix)));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data types ([`Entity`], [`Edge`], [`Value`], ids)
//! - [`codec`] - Byte codecs for single values
//! - [`schema`] - Schema and group definitions
//! - [`encoding`] - Serialisers and row key encoding
//! - [`error`] - Error types ([`SerialisationError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod codec;
pub mod encoding;
pub mod error;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::SerialisationError;
pub use types::{
    Edge, EdgeId, Element, ElementId, Entity, EntitySeed, FreqMap, Properties, TypeTag, Value,
};
