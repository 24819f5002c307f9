//! Schema: the codec registry every serialiser is built from.
//!
//! A [`Schema`] binds a codec to the vertex type and, per group, a codec to
//! each declared property. Property declaration order is the on-wire field
//! order, so it is kept exactly as declared.
//!
//! Schemas are validated once, in [`SchemaBuilder::build`], and are immutable
//! afterwards. A schema without a vertex codec cannot be built, so every
//! serialiser holding an `Arc<Schema>` can rely on one being present.
//!
//! # Example
//!
//! ```
//! use strand_core::codec::StringCodec;
//! use strand_core::schema::{GroupDefinition, Schema};
//! use strand_core::TypeTag;
//!
//! let schema = Schema::builder()
//!     .vertex_codec(StringCodec)
//!     .entity("Person", GroupDefinition::builder().property("age", TypeTag::Int).build())
//!     .edge(
//!         "Knows",
//!         GroupDefinition::builder()
//!             .property("since", TypeTag::Long)
//!             .property("tags", TypeTag::FreqMap)
//!             .build(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert!(schema.codec_for("Person", "age").is_some());
//! assert_eq!(schema.properties_of("Knows").unwrap().collect::<Vec<_>>(), vec!["since", "tags"]);
//!
//! // The vertex codec is mandatory.
//! assert!(Schema::builder().build().is_err());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::codec::{default_codec_for, Codec, CodecRef};
use crate::error::SerialisationError;
use crate::types::TypeTag;

/// Whether a group describes entities or edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// The group holds entities.
    Entity,
    /// The group holds edges.
    Edge,
}

impl GroupKind {
    /// The element shape this kind of group holds.
    #[must_use]
    pub const fn type_tag(self) -> TypeTag {
        match self {
            Self::Entity => TypeTag::Entity,
            Self::Edge => TypeTag::Edge,
        }
    }
}

/// A property as declared, before codec resolution.
#[derive(Debug, Clone)]
struct PropertyDeclaration {
    name: String,
    type_tag: TypeTag,
    codec: Option<CodecRef>,
}

/// The declared properties of one group.
///
/// Built with [`GroupDefinition::builder`]; validated when the schema is built.
#[derive(Debug, Clone, Default)]
pub struct GroupDefinition {
    properties: Vec<PropertyDeclaration>,
}

impl GroupDefinition {
    /// Start declaring a group's properties.
    #[must_use]
    pub fn builder() -> GroupDefinitionBuilder {
        GroupDefinitionBuilder::default()
    }
}

/// Builder for [`GroupDefinition`].
#[derive(Debug, Default)]
pub struct GroupDefinitionBuilder {
    properties: Vec<PropertyDeclaration>,
}

impl GroupDefinitionBuilder {
    /// Declare a property whose codec is inferred from its type.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, type_tag: TypeTag) -> Self {
        self.properties.push(PropertyDeclaration { name: name.into(), type_tag, codec: None });
        self
    }

    /// Declare a property with an explicit codec.
    #[must_use]
    pub fn property_with_codec<C: Codec + 'static>(
        self,
        name: impl Into<String>,
        type_tag: TypeTag,
        codec: C,
    ) -> Self {
        self.property_with_shared_codec(name, type_tag, Arc::new(codec))
    }

    /// Declare a property with an explicit, already shared codec.
    #[must_use]
    pub fn property_with_shared_codec(
        mut self,
        name: impl Into<String>,
        type_tag: TypeTag,
        codec: CodecRef,
    ) -> Self {
        self.properties.push(PropertyDeclaration {
            name: name.into(),
            type_tag,
            codec: Some(codec),
        });
        self
    }

    /// Finish the group definition.
    #[must_use]
    pub fn build(self) -> GroupDefinition {
        GroupDefinition { properties: self.properties }
    }
}

/// A validated property: its name, declared type and codec.
#[derive(Debug, Clone)]
pub struct SchemaProperty {
    name: String,
    type_tag: TypeTag,
    codec: CodecRef,
}

impl SchemaProperty {
    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        self.type_tag
    }

    /// The codec that encodes this property.
    #[must_use]
    pub const fn codec(&self) -> &CodecRef {
        &self.codec
    }
}

/// A validated group.
#[derive(Debug, Clone)]
pub struct SchemaGroup {
    kind: GroupKind,
    properties: Vec<SchemaProperty>,
    by_name: HashMap<String, usize>,
}

impl SchemaGroup {
    /// Whether this group holds entities or edges.
    #[must_use]
    pub const fn kind(&self) -> GroupKind {
        self.kind
    }

    /// The properties in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[SchemaProperty] {
        &self.properties
    }

    /// Look up one property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.by_name.get(name).map(|&i| &self.properties[i])
    }
}

/// An immutable, validated schema.
#[derive(Debug)]
pub struct Schema {
    vertex_codec: CodecRef,
    groups: Vec<(String, SchemaGroup)>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// Start building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The codec for vertex values.
    #[must_use]
    pub const fn vertex_codec(&self) -> &CodecRef {
        &self.vertex_codec
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, group: &str) -> Option<&SchemaGroup> {
        self.by_name.get(group).map(|&i| &self.groups[i].1)
    }

    /// Returns `true` if the group is defined.
    #[must_use]
    pub fn has_group(&self, group: &str) -> bool {
        self.by_name.contains_key(group)
    }

    /// All groups in declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &SchemaGroup)> {
        self.groups.iter().map(|(name, g)| (name.as_str(), g))
    }

    /// The codec bound to a property, if the group declares it.
    #[must_use]
    pub fn codec_for(&self, group: &str, property: &str) -> Option<&CodecRef> {
        self.group(group)?.property(property).map(SchemaProperty::codec)
    }

    /// The declared type of a property, if the group declares it.
    #[must_use]
    pub fn property_type(&self, group: &str, property: &str) -> Option<TypeTag> {
        self.group(group)?.property(property).map(SchemaProperty::type_tag)
    }

    /// The property names of a group in declaration order.
    ///
    /// Returns `None` if the group is not defined.
    pub fn properties_of(&self, group: &str) -> Option<impl Iterator<Item = &str> + '_> {
        self.group(group).map(|g| g.properties.iter().map(SchemaProperty::name))
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    vertex_codec: Option<CodecRef>,
    vertex_type: Option<TypeTag>,
    groups: Vec<(String, GroupKind, GroupDefinition)>,
}

impl SchemaBuilder {
    /// Set the vertex codec.
    #[must_use]
    pub fn vertex_codec<C: Codec + 'static>(self, codec: C) -> Self {
        self.vertex_codec_shared(Arc::new(codec))
    }

    /// Set the vertex codec from an already shared instance.
    #[must_use]
    pub fn vertex_codec_shared(mut self, codec: CodecRef) -> Self {
        self.vertex_codec = Some(codec);
        self
    }

    /// Declare the vertex type, checked against the vertex codec on build.
    #[must_use]
    pub fn vertex_type(mut self, type_tag: TypeTag) -> Self {
        self.vertex_type = Some(type_tag);
        self
    }

    /// Add an entity group.
    #[must_use]
    pub fn entity(mut self, group: impl Into<String>, definition: GroupDefinition) -> Self {
        self.groups.push((group.into(), GroupKind::Entity, definition));
        self
    }

    /// Add an edge group.
    #[must_use]
    pub fn edge(mut self, group: impl Into<String>, definition: GroupDefinition) -> Self {
        self.groups.push((group.into(), GroupKind::Edge, definition));
        self
    }

    /// Validate the declarations and build the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SerialisationError::Configuration`] if the vertex codec is
    /// missing or does not handle the declared vertex type, a group or property
    /// is declared twice, a property type has no inferable codec, or a supplied
    /// codec does not handle its property's type.
    pub fn build(self) -> Result<Arc<Schema>, SerialisationError> {
        let vertex_codec = self
            .vertex_codec
            .ok_or_else(|| {
                SerialisationError::Configuration("vertex codec is required".to_owned())
            })?;

        if let Some(vertex_type) = self.vertex_type {
            if !vertex_codec.can_handle(vertex_type) {
                return Err(SerialisationError::Configuration(format!(
                    "vertex codec {} cannot handle vertex type {vertex_type}",
                    vertex_codec.name()
                )));
            }
        }

        let mut groups = Vec::with_capacity(self.groups.len());
        let mut by_name = HashMap::with_capacity(self.groups.len());
        for (name, kind, definition) in self.groups {
            if by_name.contains_key(&name) {
                return Err(SerialisationError::Configuration(format!(
                    "group '{name}' is declared more than once"
                )));
            }
            let group = resolve_group(&name, kind, definition)?;
            by_name.insert(name.clone(), groups.len());
            groups.push((name, group));
        }

        debug!(
            vertex_codec = vertex_codec.name(),
            groups = groups.len(),
            "built schema"
        );
        Ok(Arc::new(Schema { vertex_codec, groups, by_name }))
    }
}

fn resolve_group(
    group: &str,
    kind: GroupKind,
    definition: GroupDefinition,
) -> Result<SchemaGroup, SerialisationError> {
    let mut properties = Vec::with_capacity(definition.properties.len());
    let mut by_name = HashMap::with_capacity(definition.properties.len());

    for decl in definition.properties {
        if by_name.contains_key(&decl.name) {
            return Err(SerialisationError::Configuration(format!(
                "property '{}' is declared more than once in group '{group}'",
                decl.name
            )));
        }
        let codec = match decl.codec {
            Some(codec) => codec,
            None => default_codec_for(decl.type_tag).ok_or_else(|| {
                SerialisationError::Configuration(format!(
                    "no codec can be inferred for property '{}' of type {} in group '{group}'",
                    decl.name, decl.type_tag
                ))
            })?,
        };
        if !codec.can_handle(decl.type_tag) {
            return Err(SerialisationError::Configuration(format!(
                "codec {} cannot handle type {} of property '{}' in group '{group}'",
                codec.name(),
                decl.type_tag,
                decl.name
            )));
        }
        by_name.insert(decl.name.clone(), properties.len());
        properties.push(SchemaProperty { name: decl.name, type_tag: decl.type_tag, codec });
    }

    Ok(SchemaGroup { kind, properties, by_name })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::{FreqMapCodec, LongCodec, OrderedLongCodec, StringCodec};

    fn config_message(result: Result<Arc<Schema>, SerialisationError>) -> String {
        match result {
            Err(SerialisationError::Configuration(msg)) => msg,
            other => panic!("expected a configuration error, got {other:?}"),
        }
    }

    #[test]
    fn missing_vertex_codec_fails_fast() {
        let msg = config_message(
            Schema::builder()
                .entity("Thing", GroupDefinition::builder().property("p", TypeTag::Long).build())
                .build(),
        );
        assert!(msg.contains("vertex codec is required"));
    }

    #[test]
    fn properties_keep_declaration_order() {
        let schema = Schema::builder()
            .vertex_codec(StringCodec)
            .edge(
                "E",
                GroupDefinition::builder()
                    .property("zeta", TypeTag::Long)
                    .property("alpha", TypeTag::String)
                    .property("mid", TypeTag::Bool)
                    .build(),
            )
            .build()
            .unwrap();

        let names: Vec<_> = schema.properties_of("E").unwrap().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.group("E").unwrap().kind(), GroupKind::Edge);
    }

    #[test]
    fn codecs_are_inferred_from_types() {
        let schema = Schema::builder()
            .vertex_codec(StringCodec)
            .entity(
                "Thing",
                GroupDefinition::builder()
                    .property("count", TypeTag::Long)
                    .property("tags", TypeTag::FreqMap)
                    .build(),
            )
            .build()
            .unwrap();

        assert_eq!(schema.codec_for("Thing", "count").unwrap().name(), LongCodec.name());
        assert_eq!(schema.codec_for("Thing", "tags").unwrap().name(), FreqMapCodec.name());
        assert_eq!(schema.property_type("Thing", "tags"), Some(TypeTag::FreqMap));
        assert!(schema.codec_for("Thing", "missing").is_none());
        assert!(schema.codec_for("Other", "count").is_none());
        assert!(schema.properties_of("Other").is_none());
    }

    #[test]
    fn explicit_codec_overrides_inference() {
        let schema = Schema::builder()
            .vertex_codec(StringCodec)
            .entity(
                "Thing",
                GroupDefinition::builder()
                    .property_with_codec("ts", TypeTag::Long, OrderedLongCodec)
                    .build(),
            )
            .build()
            .unwrap();
        assert_eq!(schema.codec_for("Thing", "ts").unwrap().name(), "OrderedLongCodec");
    }

    #[test]
    fn mismatched_codec_is_rejected() {
        let msg = config_message(
            Schema::builder()
                .vertex_codec(StringCodec)
                .entity(
                    "Thing",
                    GroupDefinition::builder()
                        .property_with_codec("name", TypeTag::String, LongCodec)
                        .build(),
                )
                .build(),
        );
        assert!(msg.contains("cannot handle type string"));
    }

    #[test]
    fn element_shape_property_type_is_rejected() {
        let msg = config_message(
            Schema::builder()
                .vertex_codec(StringCodec)
                .entity("Thing", GroupDefinition::builder().property("e", TypeTag::Edge).build())
                .build(),
        );
        assert!(msg.contains("no codec can be inferred"));
    }

    #[test]
    fn duplicate_group_is_rejected() {
        let msg = config_message(
            Schema::builder()
                .vertex_codec(StringCodec)
                .entity("Thing", GroupDefinition::default())
                .edge("Thing", GroupDefinition::default())
                .build(),
        );
        assert!(msg.contains("declared more than once"));
    }

    #[test]
    fn duplicate_property_is_rejected() {
        let msg = config_message(
            Schema::builder()
                .vertex_codec(StringCodec)
                .entity(
                    "Thing",
                    GroupDefinition::builder()
                        .property("p", TypeTag::Long)
                        .property("p", TypeTag::Int)
                        .build(),
                )
                .build(),
        );
        assert!(msg.contains("property 'p'"));
    }

    #[test]
    fn vertex_type_is_checked_against_codec() {
        let msg = config_message(
            Schema::builder().vertex_codec(LongCodec).vertex_type(TypeTag::String).build(),
        );
        assert!(msg.contains("cannot handle vertex type string"));

        let schema = Schema::builder().vertex_codec(LongCodec).vertex_type(TypeTag::Long).build();
        assert!(schema.is_ok());
    }

    #[test]
    fn groups_iterate_in_declaration_order() {
        let schema = Schema::builder()
            .vertex_codec(StringCodec)
            .edge("B", GroupDefinition::default())
            .entity("A", GroupDefinition::default())
            .build()
            .unwrap();
        let names: Vec<_> = schema.groups().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert!(schema.has_group("A"));
        assert!(!schema.has_group("C"));
    }
}
