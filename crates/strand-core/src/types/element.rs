//! Graph elements: entities and edges with properties.
//!
//! # Example
//!
//! ```
//! use strand_core::types::{Edge, Element, Entity, Value};
//!
//! let alice = Entity::new("Person", "alice").with_property("age", 30i32);
//! let knows = Edge::new("Knows", "alice", "bob", true).with_property("since", 2019i64);
//!
//! assert_eq!(alice.get_property("age"), Some(&Value::Int(30)));
//!
//! let element = Element::from(knows);
//! assert_eq!(element.group(), "Knows");
//! ```

use std::collections::hash_map;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::endpoints_eq;
use super::{EdgeId, ElementId, EntitySeed, TypeTag, Value};

/// Named property values on an element.
///
/// Keys are unique and iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties(HashMap<String, Value>);

impl Properties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Set a property, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Returns `true` if the property is set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of properties set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no properties are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterate over property names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// An entity: a vertex with a group and properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The group this entity belongs to.
    pub group: String,
    /// The vertex the entity describes.
    pub vertex: Value,
    /// Properties stored on this entity.
    pub properties: Properties,
}

impl Entity {
    /// Create an entity with no properties.
    #[must_use]
    pub fn new(group: impl Into<String>, vertex: impl Into<Value>) -> Self {
        Self { group: group.into(), vertex: vertex.into(), properties: Properties::new() }
    }

    /// Add a property to this entity.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The identity of this entity.
    #[must_use]
    pub fn seed(&self) -> EntitySeed {
        EntitySeed { vertex: self.vertex.clone() }
    }
}

/// An edge between two vertices with a group and properties.
///
/// Undirected edges compare equal regardless of endpoint order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// The group this edge belongs to.
    pub group: String,
    /// The source vertex.
    pub source: Value,
    /// The destination vertex.
    pub destination: Value,
    /// Whether the edge points from source to destination.
    pub directed: bool,
    /// Properties stored on this edge.
    pub properties: Properties,
}

impl Edge {
    /// Create an edge with no properties.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        source: impl Into<Value>,
        destination: impl Into<Value>,
        directed: bool,
    ) -> Self {
        Self {
            group: group.into(),
            source: source.into(),
            destination: destination.into(),
            directed,
            properties: Properties::new(),
        }
    }

    /// Add a property to this edge.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The identity of this edge.
    #[must_use]
    pub fn edge_id(&self) -> EdgeId {
        EdgeId::new(self.source.clone(), self.destination.clone(), self.directed)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group
            && self.properties == other.properties
            && endpoints_eq(
                (&self.source, &self.destination, self.directed),
                (&other.source, &other.destination, other.directed),
            )
    }
}

/// Either kind of graph element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Element {
    /// An entity.
    Entity(Entity),
    /// An edge.
    Edge(Edge),
}

impl Element {
    /// The element's group.
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::Entity(e) => &e.group,
            Self::Edge(e) => &e.group,
        }
    }

    /// The element's properties.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        match self {
            Self::Entity(e) => &e.properties,
            Self::Edge(e) => &e.properties,
        }
    }

    /// Mutable access to the element's properties.
    pub fn properties_mut(&mut self) -> &mut Properties {
        match self {
            Self::Entity(e) => &mut e.properties,
            Self::Edge(e) => &mut e.properties,
        }
    }

    /// Get a property value by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties().get(key)
    }

    /// Project the element onto its identity.
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Entity(e) => ElementId::Entity(e.seed()),
            Self::Edge(e) => ElementId::Edge(e.edge_id()),
        }
    }

    /// Returns the type tag of this element's shape.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Entity(_) => TypeTag::Entity,
            Self::Edge(_) => TypeTag::Edge,
        }
    }

    /// Build an element from an identity, a group and properties.
    #[must_use]
    pub fn from_parts(id: ElementId, group: String, properties: Properties) -> Self {
        match id {
            ElementId::Entity(seed) => {
                Self::Entity(Entity { group, vertex: seed.vertex, properties })
            }
            ElementId::Edge(edge) => Self::Edge(Edge {
                group,
                source: edge.source,
                destination: edge.destination,
                directed: edge.directed,
                properties,
            }),
        }
    }
}

impl From<Entity> for Element {
    fn from(e: Entity) -> Self {
        Self::Entity(e)
    }
}

impl From<Edge> for Element {
    fn from(e: Edge) -> Self {
        Self::Edge(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_builder() {
        let entity = Entity::new("Person", "alice").with_property("age", 30i32);
        assert_eq!(entity.group, "Person");
        assert_eq!(entity.vertex, Value::String("alice".to_owned()));
        assert_eq!(entity.get_property("age"), Some(&Value::Int(30)));
        assert_eq!(entity.seed(), EntitySeed::new("alice"));
    }

    #[test]
    fn edge_identity() {
        let edge = Edge::new("Knows", "a", "b", true).with_property("weight", 1.5f64);
        let element = Element::from(edge.clone());
        assert_eq!(element.id(), ElementId::Edge(EdgeId::new("a", "b", true)));
        assert_eq!(element.type_tag(), TypeTag::Edge);
        assert_eq!(element.group(), "Knows");
    }

    #[test]
    fn undirected_edges_equal_when_swapped() {
        let a = Edge::new("Road", "x", "y", false).with_property("km", 3i64);
        let b = Edge::new("Road", "y", "x", false).with_property("km", 3i64);
        assert_eq!(a, b);

        let c = Edge::new("Road", "y", "x", true).with_property("km", 3i64);
        assert_ne!(Edge::new("Road", "x", "y", true).with_property("km", 3i64), c);
    }

    #[test]
    fn from_parts_rebuilds_element() {
        let props: Properties = vec![("count", 2i64)].into_iter().collect();
        let element = Element::from_parts(
            ElementId::Entity(EntitySeed::new("v")),
            "Thing".to_owned(),
            props.clone(),
        );
        let expected = Entity { group: "Thing".into(), vertex: "v".into(), properties: props };
        assert_eq!(element, Element::Entity(expected));
    }

    #[test]
    fn properties_mut_edits_in_place() {
        let mut element = Element::from(Entity::new("Thing", 1i64));
        element.properties_mut().insert("flag", true);
        assert_eq!(element.get_property("flag"), Some(&Value::Bool(true)));
    }
}
