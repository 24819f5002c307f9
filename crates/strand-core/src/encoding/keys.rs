//! Row key encoding for ordered storage.
//!
//! Row keys are designed so that one prefix scan over a vertex finds its
//! entity and the edges touching it, assuming the store sorts keys by unsigned
//! byte-wise comparison.
//!
//! # Layout
//!
//! ```text
//! Entity:  [vertex segment][ENTITY]
//! Edge:    [first vertex segment][position tag][second vertex segment]
//! ```
//!
//! Vertices are encoded with the schema's vertex codec and framed as
//! length-prefixed segments, so `[vertex segment]` is a prefix of exactly the
//! keys that start with that vertex.
//!
//! # Position Tags
//!
//! - `0x01` - [`ENTITY`]
//! - `0x02` - [`CORRECT_WAY_DIRECTED_EDGE`]: first segment is the source
//! - `0x03` - [`INCORRECT_WAY_DIRECTED_EDGE`]: first segment is the destination
//! - `0x04` - [`UNDIRECTED_EDGE`]
//!
//! These values are part of the on-disk format and never change.
//!
//! # Canonical Order
//!
//! An edge's endpoints are compared as raw encoded bytes and the smaller one
//! is written first. The tag records whether that swapped a directed edge, so
//! decoding always recovers the original source and destination. Equal
//! endpoints count as already canonical. With
//! [`EdgeKeyPolicy::BothEndpoints`] a second, mirrored key is written with
//! the larger endpoint first and the directed tag flipped.

use std::ops::Bound;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::SerialisationError;
use crate::schema::Schema;
use crate::types::{EdgeId, ElementId, EntitySeed, Value};

use super::config::{EdgeKeyPolicy, KeyEncodingConfig};
use super::identifier::ElementIdSerialiser;
use super::segment::{write_segment, SegmentReader};

/// Tag for entity keys.
pub const ENTITY: u8 = 1;
/// Tag for directed edges stored source first.
pub const CORRECT_WAY_DIRECTED_EDGE: u8 = 2;
/// Tag for directed edges stored destination first.
pub const INCORRECT_WAY_DIRECTED_EDGE: u8 = 3;
/// Tag for undirected edges.
pub const UNDIRECTED_EDGE: u8 = 4;

/// The position tag byte of a row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PositionTag {
    /// An entity key.
    Entity = ENTITY,
    /// A directed edge whose first segment is the source.
    CorrectWayDirectedEdge = CORRECT_WAY_DIRECTED_EDGE,
    /// A directed edge whose first segment is the destination.
    IncorrectWayDirectedEdge = INCORRECT_WAY_DIRECTED_EDGE,
    /// An undirected edge.
    UndirectedEdge = UNDIRECTED_EDGE,
}

impl PositionTag {
    /// The on-disk byte.
    #[inline]
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse an on-disk byte.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            ENTITY => Some(Self::Entity),
            CORRECT_WAY_DIRECTED_EDGE => Some(Self::CorrectWayDirectedEdge),
            INCORRECT_WAY_DIRECTED_EDGE => Some(Self::IncorrectWayDirectedEdge),
            UNDIRECTED_EDGE => Some(Self::UndirectedEdge),
            _ => None,
        }
    }

    /// The tag for the same edge with its segments swapped.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::CorrectWayDirectedEdge => Self::IncorrectWayDirectedEdge,
            Self::IncorrectWayDirectedEdge => Self::CorrectWayDirectedEdge,
            other => other,
        }
    }

    /// Returns `true` for the three edge tags.
    #[must_use]
    pub const fn is_edge(self) -> bool {
        !matches!(self, Self::Entity)
    }
}

/// Order two encoded endpoints for storage.
///
/// Returns `(first, tag, second)`: the byte-wise smaller endpoint first and
/// the tag that lets the original direction be recovered. Equal endpoints are
/// never swapped.
#[must_use]
pub fn canonical_edge<'a>(
    source: &'a [u8],
    destination: &'a [u8],
    directed: bool,
) -> (&'a [u8], PositionTag, &'a [u8]) {
    let swapped = source > destination;
    let (first, second) = if swapped { (destination, source) } else { (source, destination) };
    let tag = match (directed, swapped) {
        (false, _) => PositionTag::UndirectedEdge,
        (true, false) => PositionTag::CorrectWayDirectedEdge,
        (true, true) => PositionTag::IncorrectWayDirectedEdge,
    };
    (first, tag, second)
}

/// An encoded row key. Orders the way the store sorts it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowKey(Vec<u8>);

impl RowKey {
    /// The key bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns `true` if the key starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }
}

impl From<Vec<u8>> for RowKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for RowKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The smallest key greater than every key starting with `prefix`.
///
/// Returns `None` when no such key exists (empty or all-`0xFF` prefix), in
/// which case the scan is unbounded above.
#[must_use]
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

/// Encodes element ids to row keys and back.
#[derive(Debug, Clone)]
pub struct RowKeyEncoder {
    ids: ElementIdSerialiser,
    config: KeyEncodingConfig,
}

impl RowKeyEncoder {
    /// Create an encoder over `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>, config: KeyEncodingConfig) -> Self {
        debug!(edge_keys = ?config.edge_keys, "created row key encoder");
        Self { ids: ElementIdSerialiser::new(schema), config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &KeyEncodingConfig {
        &self.config
    }

    /// The canonical row key for an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex codec cannot encode a vertex.
    pub fn row_key(&self, id: &ElementId) -> Result<RowKey, SerialisationError> {
        match id {
            ElementId::Entity(seed) => self.entity_key(seed),
            ElementId::Edge(edge) => {
                let source = self.ids.encode_vertex(&edge.source)?;
                let destination = self.ids.encode_vertex(&edge.destination)?;
                let (first, tag, second) = canonical_edge(&source, &destination, edge.directed);
                edge_key(first, tag, second)
            }
        }
    }

    /// Every row key an id is stored under, canonical key first.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex codec cannot encode a vertex.
    pub fn row_keys(&self, id: &ElementId) -> Result<Vec<RowKey>, SerialisationError> {
        let ElementId::Edge(edge) = id else {
            return Ok(vec![self.row_key(id)?]);
        };

        let source = self.ids.encode_vertex(&edge.source)?;
        let destination = self.ids.encode_vertex(&edge.destination)?;
        let (first, tag, second) = canonical_edge(&source, &destination, edge.directed);
        let mut keys = vec![edge_key(first, tag, second)?];

        if self.config.edge_keys == EdgeKeyPolicy::BothEndpoints && first != second {
            trace!(tag = ?tag.flipped(), "mirrored edge key");
            keys.push(edge_key(second, tag.flipped(), first)?);
        }
        Ok(keys)
    }

    /// Decode a row key back to the id it was built from.
    ///
    /// Directed edges come back in their original direction whichever key
    /// was read.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] on truncated framing, an unknown
    /// tag or trailing bytes.
    pub fn decode(&self, key: &[u8]) -> Result<ElementId, SerialisationError> {
        let mut reader = SegmentReader::new(key);
        let first = reader.read_segment("first vertex")?;
        let tag = read_tag(&mut reader)?;

        if tag == PositionTag::Entity {
            reader.finish("entity key")?;
            return Ok(ElementId::Entity(EntitySeed { vertex: self.ids.decode_vertex(first)? }));
        }

        let second = reader.read_segment("second vertex")?;
        reader.finish("edge key")?;
        let first = self.ids.decode_vertex(first)?;
        let second = self.ids.decode_vertex(second)?;
        let edge = match tag {
            PositionTag::CorrectWayDirectedEdge => EdgeId::new(first, second, true),
            PositionTag::IncorrectWayDirectedEdge => EdgeId::new(second, first, true),
            _ => EdgeId::new(first, second, false),
        };
        Ok(ElementId::Edge(edge))
    }

    /// Read the position tag of a row key without decoding its vertices.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] on truncated framing or an unknown tag.
    pub fn position_tag(&self, key: &[u8]) -> Result<PositionTag, SerialisationError> {
        let mut reader = SegmentReader::new(key);
        reader.read_segment("first vertex")?;
        read_tag(&mut reader)
    }

    /// The prefix shared by a vertex's entity key and every edge key that
    /// stores the vertex first.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex codec cannot encode the vertex.
    pub fn vertex_prefix(&self, vertex: &Value) -> Result<Vec<u8>, SerialisationError> {
        let mut prefix = Vec::new();
        self.ids.write_vertex(vertex, &mut prefix)?;
        Ok(prefix)
    }

    /// Range bounds covering every key that starts with a vertex's prefix.
    ///
    /// Usable directly with ordered maps keyed by [`RowKey`].
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex codec cannot encode the vertex.
    pub fn vertex_range(
        &self,
        vertex: &Value,
    ) -> Result<(Bound<RowKey>, Bound<RowKey>), SerialisationError> {
        let prefix = self.vertex_prefix(vertex)?;
        let end = match prefix_successor(&prefix) {
            Some(end) => Bound::Excluded(RowKey(end)),
            None => Bound::Unbounded,
        };
        Ok((Bound::Included(RowKey(prefix)), end))
    }

    fn entity_key(&self, seed: &EntitySeed) -> Result<RowKey, SerialisationError> {
        let mut key = self.vertex_prefix(&seed.vertex)?;
        key.push(PositionTag::Entity.as_byte());
        Ok(RowKey(key))
    }
}

fn edge_key(first: &[u8], tag: PositionTag, second: &[u8]) -> Result<RowKey, SerialisationError> {
    let mut key = Vec::with_capacity(first.len() + second.len() + 9);
    write_segment(&mut key, first)?;
    key.push(tag.as_byte());
    write_segment(&mut key, second)?;
    Ok(RowKey(key))
}

fn read_tag(reader: &mut SegmentReader<'_>) -> Result<PositionTag, SerialisationError> {
    let byte = reader.read_u8("position tag")?;
    PositionTag::from_byte(byte)
        .ok_or_else(|| SerialisationError::Decode(format!("unknown position tag {byte:#04x}")))
}
