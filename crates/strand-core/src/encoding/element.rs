//! Serialisation for whole [`Element`]s.
//!
//! # Format
//!
//! ```text
//! [group segment][element id][property block]
//! ```
//!
//! The element id is the [`ElementIdSerialiser`] encoding, written inline. The
//! group's kind decides whether it is read as an entity seed or an edge id.
//! The property block has one field per property the schema declares for the
//! group, in declaration order:
//!
//! ```text
//! 0x00                     absent
//! 0x01 [value segment]     present, encoded with the property's codec
//! ```
//!
//! Properties the schema does not declare are not written, so they are gone
//! after a round trip.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::SerialisationError;
use crate::schema::{GroupKind, Schema, SchemaGroup};
use crate::types::{Element, ElementId, Properties, TypeTag};

use super::identifier::ElementIdSerialiser;
use super::segment::{write_segment, SegmentReader};
use super::traits::Serialiser;

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

/// Read the group name at the start of element or store-value bytes.
///
/// Only the first segment is read and nothing is copied.
///
/// # Errors
///
/// Returns [`SerialisationError::Decode`] if the segment is truncated or not UTF-8.
pub fn read_group(bytes: &[u8]) -> Result<&str, SerialisationError> {
    let raw = SegmentReader::new(bytes).read_segment("group")?;
    std::str::from_utf8(raw)
        .map_err(|e| SerialisationError::Decode(format!("invalid group name UTF-8: {e}")))
}

/// Serialises elements using the schema's group definitions.
#[derive(Debug, Clone)]
pub struct ElementSerialiser {
    schema: Arc<Schema>,
    ids: ElementIdSerialiser,
}

impl ElementSerialiser {
    /// Create a serialiser over `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        debug!(groups = schema.groups().count(), "created element serialiser");
        let ids = ElementIdSerialiser::new(Arc::clone(&schema));
        Self { schema, ids }
    }

    /// The schema this serialiser reads codecs from.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The serialiser used for the element id.
    #[must_use]
    pub const fn id_serialiser(&self) -> &ElementIdSerialiser {
        &self.ids
    }

    /// Read the group of serialised element bytes without decoding the rest.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Decode`] if the group segment is truncated.
    pub fn get_group<'a>(&self, bytes: &'a [u8]) -> Result<&'a str, SerialisationError> {
        read_group(bytes)
    }

    /// Serialise the group and properties only, leaving the identity to the row key.
    ///
    /// # Errors
    ///
    /// Returns an error if the group is unknown, of the wrong kind, or a
    /// property value does not match its declared codec.
    pub fn serialise_value(&self, element: &Element) -> Result<Vec<u8>, SerialisationError> {
        let group = self.group_for(element)?;
        let mut buf = Vec::new();
        write_segment(&mut buf, element.group().as_bytes())?;
        write_properties(group, element, &mut buf)?;
        Ok(buf)
    }

    /// Rebuild an element from its identity and bytes written by
    /// [`serialise_value`](Self::serialise_value).
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::UnknownGroup`] for an undefined group and
    /// [`SerialisationError::Decode`] for malformed bytes or an identity whose
    /// shape does not match the group.
    pub fn deserialise_value(
        &self,
        id: ElementId,
        bytes: &[u8],
    ) -> Result<Element, SerialisationError> {
        let mut reader = SegmentReader::new(bytes);
        let (name, group) = self.read_group_definition(&mut reader)?;
        check_identity_shape(name, group, &id)?;
        let properties = read_properties(group, &mut reader)?;
        reader.finish("element value")?;
        Ok(Element::from_parts(id, name.to_owned(), properties))
    }

    fn group_for(&self, element: &Element) -> Result<&SchemaGroup, SerialisationError> {
        let name = element.group();
        let group = self
            .schema
            .group(name)
            .ok_or_else(|| SerialisationError::UnknownGroup(name.to_owned()))?;
        let expected = group.kind().type_tag();
        if element.type_tag() != expected {
            return Err(SerialisationError::unsupported(
                format!("{expected} group '{name}'"),
                element.type_tag(),
            ));
        }
        Ok(group)
    }

    fn read_group_definition<'a>(
        &self,
        reader: &mut SegmentReader<'a>,
    ) -> Result<(&'a str, &SchemaGroup), SerialisationError> {
        let raw = reader.read_segment("group")?;
        let name = std::str::from_utf8(raw)
            .map_err(|e| SerialisationError::Decode(format!("invalid group name UTF-8: {e}")))?;
        let group = self
            .schema
            .group(name)
            .ok_or_else(|| SerialisationError::UnknownGroup(name.to_owned()))?;
        Ok((name, group))
    }
}

impl Serialiser for ElementSerialiser {
    type Item = Element;

    fn name(&self) -> &'static str {
        "ElementSerialiser"
    }

    fn can_handle(&self, type_tag: TypeTag) -> bool {
        matches!(type_tag, TypeTag::Entity | TypeTag::Edge)
    }

    fn serialise_to(&self, element: &Element, buf: &mut Vec<u8>) -> Result<(), SerialisationError> {
        let group = self.group_for(element)?;
        write_segment(buf, element.group().as_bytes())?;
        self.ids.serialise_to(&element.id(), buf)?;
        write_properties(group, element, buf)
    }

    fn deserialise(&self, bytes: &[u8]) -> Result<Element, SerialisationError> {
        let mut reader = SegmentReader::new(bytes);
        let (name, group) = self.read_group_definition(&mut reader)?;
        let id = self.ids.read_id(&mut reader, id_shape(group.kind()))?;
        let properties = read_properties(group, &mut reader)?;
        reader.finish("element")?;
        Ok(Element::from_parts(id, name.to_owned(), properties))
    }
}

fn id_shape(kind: GroupKind) -> TypeTag {
    match kind {
        GroupKind::Entity => TypeTag::EntitySeed,
        GroupKind::Edge => TypeTag::EdgeId,
    }
}

fn check_identity_shape(
    name: &str,
    group: &SchemaGroup,
    id: &ElementId,
) -> Result<(), SerialisationError> {
    if id.type_tag() == id_shape(group.kind()) {
        Ok(())
    } else {
        Err(SerialisationError::Decode(format!(
            "{} identity does not belong to {} group '{name}'",
            id.type_tag(),
            group.kind().type_tag()
        )))
    }
}

fn write_properties(
    group: &SchemaGroup,
    element: &Element,
    buf: &mut Vec<u8>,
) -> Result<(), SerialisationError> {
    for property in group.properties() {
        match property.codec().encode_opt(element.get_property(property.name()))? {
            Some(bytes) => {
                buf.push(PRESENT);
                write_segment(buf, &bytes)?;
            }
            None => buf.push(ABSENT),
        }
    }

    for key in element.properties().keys() {
        if group.property(key).is_none() {
            trace!(group = element.group(), property = key, "dropping undeclared property");
        }
    }
    Ok(())
}

fn read_properties(
    group: &SchemaGroup,
    reader: &mut SegmentReader<'_>,
) -> Result<Properties, SerialisationError> {
    let mut properties = Properties::new();
    for property in group.properties() {
        match reader.read_u8(property.name())? {
            ABSENT => {}
            PRESENT => {
                let bytes = reader.read_segment(property.name())?;
                if let Some(value) = property.codec().decode_opt(bytes)? {
                    properties.insert(property.name(), value);
                }
            }
            other => {
                return Err(SerialisationError::Decode(format!(
                    "invalid presence flag {other:#04x} for property '{}'",
                    property.name()
                )))
            }
        }
    }
    Ok(properties)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::StringCodec;
    use crate::schema::GroupDefinition;
    use crate::types::{Edge, Entity, FreqMap, Value};

    fn schema() -> Arc<Schema> {
        Schema::builder()
            .vertex_codec(StringCodec)
            .entity(
                "Person",
                GroupDefinition::builder()
                    .property("name", TypeTag::String)
                    .property("age", TypeTag::Int)
                    .build(),
            )
            .edge(
                "Knows",
                GroupDefinition::builder()
                    .property("since", TypeTag::Long)
                    .property("tags", TypeTag::FreqMap)
                    .build(),
            )
            .build()
            .unwrap()
    }

    fn knows() -> Element {
        let tags: FreqMap = vec![("work", 3), ("a,b", 1)].into_iter().collect();
        Edge::new("Knows", "bob", "alice", true)
            .with_property("since", 2015i64)
            .with_property("tags", tags)
            .into()
    }

    #[test]
    fn entity_roundtrip() {
        let ser = ElementSerialiser::new(schema());
        let alice: Element = Entity::new("Person", "alice")
            .with_property("name", "Alice")
            .with_property("age", 30i32)
            .into();
        let bytes = ser.serialise(&alice).unwrap();
        assert_eq!(ser.deserialise(&bytes).unwrap(), alice);
    }

    #[test]
    fn edge_roundtrip_keeps_direction() {
        let ser = ElementSerialiser::new(schema());
        let edge = knows();
        match ser.deserialise(&ser.serialise(&edge).unwrap()).unwrap() {
            Element::Edge(decoded) => {
                assert_eq!(decoded.source, Value::from("bob"));
                assert_eq!(decoded.destination, Value::from("alice"));
                assert!(decoded.directed);
                assert_eq!(Element::Edge(decoded), edge);
            }
            other => panic!("expected an edge, got {other:?}"),
        }
    }

    #[test]
    fn identity_is_written_inline() {
        let ser = ElementSerialiser::new(schema());
        let entity: Element = Entity::new("Person", "al").into();
        let mut expected = vec![0u8, 0, 0, 6];
        expected.extend_from_slice(b"Person");
        expected.extend_from_slice(&[0, 0, 0, 2, b'a', b'l']);
        expected.extend_from_slice(&[ABSENT, ABSENT]);
        assert_eq!(ser.serialise(&entity).unwrap(), expected);

        let edge: Element = Edge::new("Knows", "a", "b", true).into();
        let mut expected = vec![0u8, 0, 0, 5];
        expected.extend_from_slice(b"Knows");
        expected.extend_from_slice(&[0, 0, 0, 1, b'a', 0, 0, 0, 1, b'b', 0x01]);
        expected.extend_from_slice(&[ABSENT, ABSENT]);
        let bytes = ser.serialise(&edge).unwrap();
        assert_eq!(bytes, expected);
        assert_eq!(ser.deserialise(&bytes).unwrap(), edge);
    }

    #[test]
    fn absent_properties_stay_absent() {
        let ser = ElementSerialiser::new(schema());
        let sparse: Element = Entity::new("Person", "carol").with_property("age", 41i32).into();
        let decoded = ser.deserialise(&ser.serialise(&sparse).unwrap()).unwrap();
        assert_eq!(decoded.get_property("name"), None);
        assert_eq!(decoded, sparse);
    }

    #[test]
    fn empty_values_are_not_absent() {
        let ser = ElementSerialiser::new(schema());
        let element: Element = Edge::new("Knows", "a", "b", false)
            .with_property("tags", FreqMap::new())
            .into();
        let decoded = ser.deserialise(&ser.serialise(&element).unwrap()).unwrap();
        assert_eq!(decoded.get_property("tags"), Some(&Value::FreqMap(FreqMap::new())));
    }

    #[test]
    fn undeclared_properties_are_dropped() {
        let ser = ElementSerialiser::new(schema());
        let element: Element = Entity::new("Person", "alice")
            .with_property("age", 30i32)
            .with_property("mood", "happy")
            .into();
        let decoded = ser.deserialise(&ser.serialise(&element).unwrap()).unwrap();
        assert!(decoded.get_property("mood").is_none());
        assert_eq!(decoded.get_property("age"), Some(&Value::Int(30)));
    }

    #[test]
    fn get_group_reads_only_the_prefix() {
        let ser = ElementSerialiser::new(schema());
        let bytes = ser.serialise(&knows()).unwrap();
        assert_eq!(ser.get_group(&bytes).unwrap(), "Knows");

        // Corrupting everything after the group segment leaves it readable.
        let group_len = 4 + "Knows".len();
        let mut truncated = bytes[..group_len].to_vec();
        truncated.push(0xFF);
        assert_eq!(ser.get_group(&truncated).unwrap(), "Knows");
        assert!(ser.deserialise(&truncated).is_err());
    }

    #[test]
    fn unknown_group_is_reported() {
        let ser = ElementSerialiser::new(schema());
        let element: Element = Entity::new("Robot", "r2").into();
        assert_eq!(
            ser.serialise(&element).unwrap_err(),
            SerialisationError::UnknownGroup("Robot".into())
        );
    }

    #[test]
    fn wrong_group_kind_is_unsupported() {
        let ser = ElementSerialiser::new(schema());
        let element: Element = Entity::new("Knows", "x").into();
        let err = ser.serialise(&element).unwrap_err();
        assert!(matches!(
            err,
            SerialisationError::UnsupportedType { type_tag: TypeTag::Entity, .. }
        ));
    }

    #[test]
    fn property_of_wrong_type_is_unsupported() {
        let ser = ElementSerialiser::new(schema());
        let element: Element = Entity::new("Person", "alice").with_property("age", "thirty").into();
        assert!(matches!(ser.serialise(&element), Err(SerialisationError::UnsupportedType { .. })));
    }

    #[test]
    fn truncated_input_is_a_decode_error() {
        let ser = ElementSerialiser::new(schema());
        let bytes = ser.serialise(&knows()).unwrap();
        for len in 0..bytes.len() {
            assert!(
                matches!(ser.deserialise(&bytes[..len]), Err(SerialisationError::Decode(_))),
                "prefix of length {len} decoded"
            );
        }
    }

    #[test]
    fn value_bytes_pair_with_an_identity() {
        let ser = ElementSerialiser::new(schema());
        let edge = knows();
        let value = ser.serialise_value(&edge).unwrap();
        assert_eq!(read_group(&value).unwrap(), "Knows");
        assert_eq!(ser.deserialise_value(edge.id(), &value).unwrap(), edge);

        let seed = ElementId::from(crate::types::EntitySeed::new("bob"));
        assert!(matches!(ser.deserialise_value(seed, &value), Err(SerialisationError::Decode(_))));
    }

    #[test]
    fn handles_element_shapes_only() {
        let ser = ElementSerialiser::new(schema());
        assert!(ser.can_handle(TypeTag::Entity));
        assert!(ser.can_handle(TypeTag::Edge));
        assert!(!ser.can_handle(TypeTag::Int));
        assert!(!ser.can_handle(TypeTag::EdgeId));
    }
}
