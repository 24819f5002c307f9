//! Integration tests for row keys against an ordered store.
//!
//! These tests write store entries into a `BTreeMap`, which sorts keys the way
//! a byte-ordered key-value store does, and check that prefix scans by vertex
//! find the right elements with their direction intact.

use std::collections::BTreeMap;

use strand_core::codec::StringCodec;
use strand_core::encoding::{
    EdgeKeyPolicy, ElementConverter, KeyEncodingConfig, PositionTag, RowKey,
};
use strand_core::schema::{GroupDefinition, Schema};
use strand_core::{Edge, EdgeId, Element, ElementId, Entity, TypeTag, Value};

type Store = BTreeMap<RowKey, Vec<u8>>;

fn create_converter(policy: EdgeKeyPolicy) -> ElementConverter {
    let schema = Schema::builder()
        .vertex_codec(StringCodec)
        .entity("Person", GroupDefinition::builder().property("name", TypeTag::String).build())
        .edge("Follows", GroupDefinition::builder().property("since", TypeTag::Long).build())
        .edge("Knows", GroupDefinition::default())
        .build()
        .expect("Failed to build schema");
    ElementConverter::new(schema, KeyEncodingConfig::default().with_edge_keys(policy))
}

fn write_all(converter: &ElementConverter, elements: &[Element]) -> Store {
    let mut store = Store::new();
    for element in elements {
        for entry in converter.to_entries(element).unwrap() {
            store.insert(entry.row_key, entry.value);
        }
    }
    store
}

fn scan(converter: &ElementConverter, store: &Store, vertex: &str) -> Vec<Element> {
    let range = converter.keys().vertex_range(&Value::from(vertex)).unwrap();
    store
        .range(range)
        .map(|(key, value)| converter.to_element(key.as_bytes(), value).unwrap())
        .collect()
}

fn graph() -> Vec<Element> {
    vec![
        Entity::new("Person", "A").with_property("name", "Ann").into(),
        Entity::new("Person", "B").with_property("name", "Ben").into(),
        Entity::new("Person", "AB").into(),
        Edge::new("Follows", "B", "A", true).with_property("since", 2020i64).into(),
        Edge::new("Follows", "A", "AB", true).into(),
        Edge::new("Knows", "A", "B", false).into(),
        Edge::new("Follows", "B", "B", true).into(),
    ]
}

// ============================================================================
// Canonical ordering
// ============================================================================

#[test]
fn swapped_edge_is_stored_smaller_endpoint_first() {
    let converter = create_converter(EdgeKeyPolicy::Canonical);
    let follows: Element = Edge::new("Follows", "B", "A", true).into();
    let entries = converter.to_entries(&follows).unwrap();
    assert_eq!(entries.len(), 1);

    let key = entries[0].row_key.as_bytes();
    assert!(key.starts_with(&converter.keys().vertex_prefix(&Value::from("A")).unwrap()));
    assert_eq!(converter.keys().position_tag(key).unwrap(), PositionTag::IncorrectWayDirectedEdge);
    assert_eq!(
        converter.keys().decode(key).unwrap(),
        ElementId::Edge(EdgeId::new("B", "A", true))
    );
}

#[test]
fn self_loop_is_never_incorrect_way() {
    for policy in [EdgeKeyPolicy::Canonical, EdgeKeyPolicy::BothEndpoints] {
        let converter = create_converter(policy);
        let entries = converter.to_entries(&Edge::new("Follows", "A", "A", true).into()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            converter.keys().position_tag(entries[0].row_key.as_bytes()).unwrap(),
            PositionTag::CorrectWayDirectedEdge
        );
    }
}

// ============================================================================
// Prefix scans
// ============================================================================

#[test]
fn scan_finds_entity_first_then_edges() {
    let converter = create_converter(EdgeKeyPolicy::BothEndpoints);
    let store = write_all(&converter, &graph());

    let found = scan(&converter, &store, "A");
    assert!(matches!(&found[0], Element::Entity(e) if e.vertex == Value::from("A")));
    assert_eq!(found.len(), 4);
    let follows: Element =
        Edge::new("Follows", "B", "A", true).with_property("since", 2020i64).into();
    assert!(found.contains(&follows));
    assert!(found.contains(&Edge::new("Follows", "A", "AB", true).into()));
    assert!(found.contains(&Edge::new("Knows", "B", "A", false).into()));
}

#[test]
fn scan_does_not_leak_into_longer_vertices() {
    let converter = create_converter(EdgeKeyPolicy::BothEndpoints);
    let store = write_all(&converter, &graph());

    for element in scan(&converter, &store, "A") {
        match element {
            Element::Entity(entity) => assert_eq!(entity.vertex, Value::from("A")),
            Element::Edge(edge) => {
                assert!(edge.source == Value::from("A") || edge.destination == Value::from("A"));
            }
        }
    }

    let ab = scan(&converter, &store, "AB");
    assert_eq!(ab.len(), 2);
}

#[test]
fn both_endpoints_policy_finds_edge_from_larger_vertex() {
    let converter = create_converter(EdgeKeyPolicy::BothEndpoints);
    let store = write_all(&converter, &graph());

    let found = scan(&converter, &store, "B");
    let follows: Element =
        Edge::new("Follows", "B", "A", true).with_property("since", 2020i64).into();
    assert!(found.contains(&follows));
    assert!(found.contains(&Edge::new("Knows", "A", "B", false).into()));
    assert!(found.contains(&Edge::new("Follows", "B", "B", true).into()));
    assert_eq!(found.len(), 4);
}

#[test]
fn canonical_policy_finds_edge_from_smaller_vertex_only() {
    let converter = create_converter(EdgeKeyPolicy::Canonical);
    let store = write_all(&converter, &graph());

    let follows: Element =
        Edge::new("Follows", "B", "A", true).with_property("since", 2020i64).into();
    assert!(scan(&converter, &store, "A").contains(&follows));
    assert!(!scan(&converter, &store, "B").contains(&follows));
}

#[test]
fn scan_can_route_by_group_without_decoding() {
    let converter = create_converter(EdgeKeyPolicy::BothEndpoints);
    let store = write_all(&converter, &graph());

    let range = converter.keys().vertex_range(&Value::from("A")).unwrap();
    let groups: Vec<_> =
        store.range(range).map(|(_, value)| converter.group_of(value).unwrap()).collect();
    assert_eq!(groups.iter().filter(|g| **g == "Follows").count(), 2);
    assert_eq!(groups.iter().filter(|g| **g == "Knows").count(), 1);
    assert_eq!(groups.iter().filter(|g| **g == "Person").count(), 1);
}
