//! Conversion between elements and store entries.
//!
//! A [`StoreEntry`] is one key/value pair for the store: the row key carries
//! the element's identity and the value carries its group and properties.
//! An edge stored under a mirrored key shares the same value bytes.

use std::sync::Arc;

use tracing::debug;

use crate::error::SerialisationError;
use crate::schema::Schema;
use crate::types::Element;

use super::config::KeyEncodingConfig;
use super::element::{read_group, ElementSerialiser};
use super::keys::{RowKey, RowKeyEncoder};

/// A row key and the value stored under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// The row key.
    pub row_key: RowKey,
    /// The serialised group and properties.
    pub value: Vec<u8>,
}

/// Converts elements to store entries and back.
#[derive(Debug, Clone)]
pub struct ElementConverter {
    elements: ElementSerialiser,
    keys: RowKeyEncoder,
}

impl ElementConverter {
    /// Create a converter over `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>, config: KeyEncodingConfig) -> Self {
        debug!(edge_keys = ?config.edge_keys, "created element converter");
        Self {
            elements: ElementSerialiser::new(Arc::clone(&schema)),
            keys: RowKeyEncoder::new(schema, config),
        }
    }

    /// The row key encoder, for building scan ranges.
    #[must_use]
    pub const fn keys(&self) -> &RowKeyEncoder {
        &self.keys
    }

    /// The element serialiser used for store values.
    #[must_use]
    pub const fn elements(&self) -> &ElementSerialiser {
        &self.elements
    }

    /// One entry per row key the element is stored under.
    ///
    /// # Errors
    ///
    /// Returns an error if the element's group is unknown or a vertex or
    /// property cannot be encoded.
    pub fn to_entries(&self, element: &Element) -> Result<Vec<StoreEntry>, SerialisationError> {
        let value = self.elements.serialise_value(element)?;
        let keys = self.keys.row_keys(&element.id())?;
        Ok(keys.into_iter().map(|row_key| StoreEntry { row_key, value: value.clone() }).collect())
    }

    /// Rebuild an element from a row key and its stored value.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if either part is malformed or
    /// they do not belong together.
    pub fn to_element(&self, row_key: &[u8], value: &[u8]) -> Result<Element, SerialisationError> {
        let id = self.keys.decode(row_key)?;
        self.elements.deserialise_value(id, value)
    }

    /// The group of a stored value, without decoding its properties.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the group segment is truncated.
    pub fn group_of<'a>(&self, value: &'a [u8]) -> Result<&'a str, SerialisationError> {
        read_group(value)
    }
}
