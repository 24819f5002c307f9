//! Serialisation and key encoding for storage.
//!
//! This module turns elements and their identities into bytes for the store
//! and back, driven by a [`Schema`](crate::schema::Schema).
//!
//! # Serialisers
//!
//! - [`ElementIdSerialiser`] - entity seeds and edge ids
//! - [`ElementSerialiser`] - whole elements, with [`ElementSerialiser::get_group`]
//!   for reading just the group
//!
//! Both implement the [`Serialiser`] trait.
//!
//! # Key Encoding
//!
//! The [`keys`] module builds row keys whose byte order lets one prefix scan
//! find a vertex's entity and its edges, and records edge direction in a
//! position tag. [`ElementConverter`] pairs row keys with element values to
//! produce [`StoreEntry`] records.
//!
//! # Example
//!
//! ```
//! use strand_core::codec::StringCodec;
//! use strand_core::encoding::{ElementSerialiser, Serialiser};
//! use strand_core::schema::{GroupDefinition, Schema};
//! use strand_core::{Edge, Element, TypeTag};
//!
//! let schema = Schema::builder()
//!     .vertex_codec(StringCodec)
//!     .edge("Knows", GroupDefinition::builder().property("since", TypeTag::Long).build())
//!     .build()
//!     .unwrap();
//!
//! let serialiser = ElementSerialiser::new(schema);
//! let edge: Element =
//!     Edge::new("Knows", "alice", "bob", true).with_property("since", 2015i64).into();
//!
//! let bytes = serialiser.serialise(&edge).unwrap();
//! assert_eq!(serialiser.get_group(&bytes).unwrap(), "Knows");
//! assert_eq!(serialiser.deserialise(&bytes).unwrap(), edge);
//! ```

mod config;
mod convert;
mod element;
mod identifier;
pub mod keys;
pub mod segment;
mod traits;


pub use config::{EdgeKeyPolicy, KeyEncodingConfig};
pub use convert::{ElementConverter, StoreEntry};
pub use element::{read_group, ElementSerialiser};
pub use identifier::ElementIdSerialiser;
pub use keys::{PositionTag, RowKey, RowKeyEncoder};
pub use traits::Serialiser;
