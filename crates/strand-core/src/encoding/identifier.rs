//! Serialisation for [`ElementId`] values.
//!
//! # Format
//!
//! ```text
//! EntitySeed:  [vertex segment]
//! EdgeId:      [source segment][destination segment][directed: 0x00 | 0x01]
//! ```
//!
//! Each segment holds the schema's vertex codec encoding of one vertex. The
//! number of segments tells the two shapes apart.

use std::sync::Arc;

use tracing::debug;

use crate::error::SerialisationError;
use crate::schema::Schema;
use crate::types::{EdgeId, ElementId, EntitySeed, TypeTag, Value};

use super::segment::{write_segment, SegmentReader};
use super::traits::Serialiser;

const UNDIRECTED: u8 = 0x00;
const DIRECTED: u8 = 0x01;

/// Serialises entity seeds and edge ids with the schema's vertex codec.
#[derive(Debug, Clone)]
pub struct ElementIdSerialiser {
    schema: Arc<Schema>,
}

impl ElementIdSerialiser {
    /// Create a serialiser over `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        debug!(vertex_codec = schema.vertex_codec().name(), "created element id serialiser");
        Self { schema }
    }

    /// The schema this serialiser reads codecs from.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Encode one vertex with the vertex codec, without framing.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::UnsupportedType`] if the vertex codec
    /// cannot encode the value.
    pub fn encode_vertex(&self, vertex: &Value) -> Result<Vec<u8>, SerialisationError> {
        self.schema.vertex_codec().encode(vertex)
    }

    /// Decode one unframed vertex.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the bytes are malformed, or
    /// empty and the vertex codec gives empty input no value.
    pub fn decode_vertex(&self, bytes: &[u8]) -> Result<Value, SerialisationError> {
        let codec = self.schema.vertex_codec();
        codec.decode_opt(bytes)?.ok_or_else(|| {
            SerialisationError::Decode(format!("empty vertex is not valid for {}", codec.name()))
        })
    }

    pub(crate) fn read_vertex(
        &self,
        reader: &mut SegmentReader<'_>,
        reading: &str,
    ) -> Result<Value, SerialisationError> {
        self.decode_vertex(reader.read_segment(reading)?)
    }

    pub(crate) fn write_vertex(
        &self,
        vertex: &Value,
        buf: &mut Vec<u8>,
    ) -> Result<(), SerialisationError> {
        write_segment(buf, &self.encode_vertex(vertex)?)
    }

    /// Read the destination and directed flag of an edge id whose source has
    /// already been read.
    fn read_edge_rest(
        &self,
        source: Value,
        reader: &mut SegmentReader<'_>,
    ) -> Result<EdgeId, SerialisationError> {
        let destination = self.read_vertex(reader, "destination vertex")?;
        let directed = match reader.read_u8("directed flag")? {
            DIRECTED => true,
            UNDIRECTED => false,
            other => {
                return Err(SerialisationError::Decode(format!(
                    "invalid directed flag {other:#04x}"
                )))
            }
        };
        Ok(EdgeId { source, destination, directed })
    }

    /// Read one id of a known shape from the middle of a larger encoding.
    pub(crate) fn read_id(
        &self,
        reader: &mut SegmentReader<'_>,
        shape: TypeTag,
    ) -> Result<ElementId, SerialisationError> {
        let first = self.read_vertex(reader, "vertex")?;
        match shape {
            TypeTag::EntitySeed => Ok(ElementId::Entity(EntitySeed { vertex: first })),
            TypeTag::EdgeId => self.read_edge_rest(first, reader).map(ElementId::Edge),
            other => Err(SerialisationError::unsupported(self.name(), other)),
        }
    }
}

impl Serialiser for ElementIdSerialiser {
    type Item = ElementId;

    fn name(&self) -> &'static str {
        "ElementIdSerialiser"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        matches!(type_tag, TypeTag::EntitySeed | TypeTag::EdgeId)
    }

    fn serialise_to(&self, id: &ElementId, buf: &mut Vec<u8>) -> Result<(), SerialisationError> {
        match id {
            ElementId::Entity(seed) => self.write_vertex(&seed.vertex, buf),
            ElementId::Edge(edge) => {
                self.write_vertex(&edge.source, buf)?;
                self.write_vertex(&edge.destination, buf)?;
                buf.push(if edge.directed { DIRECTED } else { UNDIRECTED });
                Ok(())
            }
        }
    }

    fn deserialise(&self, bytes: &[u8]) -> Result<ElementId, SerialisationError> {
        let mut reader = SegmentReader::new(bytes);
        let first = self.read_vertex(&mut reader, "vertex")?;
        if reader.is_exhausted() {
            return Ok(ElementId::Entity(EntitySeed { vertex: first }));
        }

        let edge = self.read_edge_rest(first, &mut reader)?;
        reader.finish("edge id")?;
        Ok(ElementId::Edge(edge))
    }
}
