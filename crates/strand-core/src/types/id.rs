//! Identity-only projections of elements, used for lookups.

use serde::{Deserialize, Serialize};

use super::{TypeTag, Value};

/// The identity of an entity: its vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySeed {
    /// The vertex value.
    pub vertex: Value,
}

impl EntitySeed {
    /// Create a new seed for `vertex`.
    #[must_use]
    pub fn new(vertex: impl Into<Value>) -> Self {
        Self { vertex: vertex.into() }
    }
}

/// The identity of an edge: both endpoints and its directedness.
///
/// Equality is semantic: two undirected ids with swapped endpoints are equal,
/// since an undirected edge has no source or destination side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeId {
    /// The source vertex.
    pub source: Value,
    /// The destination vertex.
    pub destination: Value,
    /// Whether the edge points from source to destination.
    pub directed: bool,
}

impl EdgeId {
    /// Create a new edge id.
    #[must_use]
    pub fn new(source: impl Into<Value>, destination: impl Into<Value>, directed: bool) -> Self {
        Self { source: source.into(), destination: destination.into(), directed }
    }

    /// Returns `true` if both endpoints are the same vertex.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

impl PartialEq for EdgeId {
    fn eq(&self, other: &Self) -> bool {
        endpoints_eq(
            (&self.source, &self.destination, self.directed),
            (&other.source, &other.destination, other.directed),
        )
    }
}

/// Compares two `(source, destination, directed)` triples, ignoring endpoint
/// order for undirected edges.
pub(crate) fn endpoints_eq(a: (&Value, &Value, bool), b: (&Value, &Value, bool)) -> bool {
    if a.2 != b.2 {
        return false;
    }
    (a.0 == b.0 && a.1 == b.1) || (!a.2 && a.0 == b.1 && a.1 == b.0)
}

/// Either kind of element identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementId {
    /// The identity of an entity.
    Entity(EntitySeed),
    /// The identity of an edge.
    Edge(EdgeId),
}

impl ElementId {
    /// Returns the type tag of this identity's shape.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Entity(_) => TypeTag::EntitySeed,
            Self::Edge(_) => TypeTag::EdgeId,
        }
    }
}

impl From<EntitySeed> for ElementId {
    fn from(seed: EntitySeed) -> Self {
        Self::Entity(seed)
    }
}

impl From<EdgeId> for ElementId {
    fn from(id: EdgeId) -> Self {
        Self::Edge(id)
    }
}
