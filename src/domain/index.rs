//! The global identifier index.
//!
//! Built exactly once per conversion by a single depth-first pass over the
//! document tree, then threaded as a read-only reference into the renderer
//! and the index generators. Only structural parent-child edges are followed
//! while building, never resolved references, so the walk terminates for any
//! acyclic input regardless of how entities cross-reference each other.

use std::collections::BTreeMap;

use crate::domain::node::{Node, Scalar};

/// A read-only mapping from identifier string to the entity that declared it.
///
/// Duplicate identifiers are a data-quality issue rather than an error: the
/// first mapping visited in document order claims the identifier and later
/// occurrences are ignored.
#[derive(Debug)]
pub struct IdentifierIndex<'a> {
    entries: BTreeMap<&'a str, &'a Node>,
}

impl<'a> IdentifierIndex<'a> {
    /// Walks the tree and collects every mapping that declares an `id`.
    #[must_use]
    pub fn build(root: &'a Node) -> Self {
        let mut entries = BTreeMap::new();
        collect(root, &mut entries);
        Self { entries }
    }

    /// Looks up the entity declared under `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.entries.get(id).copied()
    }

    /// Whether `id` names an indexed entity.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// The number of indexed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document declares no identifiers at all. An empty index is
    /// valid; every lookup simply misses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending lexicographic identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Node)> + '_ {
        self.entries.iter().map(|(id, node)| (*id, *node))
    }

    /// Whether a node is a reference: a string scalar whose value names an
    /// indexed entity. This is a property of the value alone, independent of
    /// where it appears in the tree.
    #[must_use]
    pub fn is_reference(&self, node: &Node) -> bool {
        node.as_str().is_some_and(|s| self.contains(s))
    }

    /// Resolves a sequence of reference strings into the referenced entities.
    ///
    /// Resolution is all-or-nothing: if any element is not a string or does
    /// not name an indexed entity, the whole sequence is left unresolved and
    /// `None` is returned. This avoids mixed lists of raw strings and
    /// entities, which would break table column inference downstream.
    #[must_use]
    pub fn resolve_sequence(&self, items: &[Node]) -> Option<Vec<&'a Node>> {
        items
            .iter()
            .map(|item| match item {
                Node::Scalar(Scalar::String(s)) => self.get(s),
                _ => None,
            })
            .collect()
    }
}

fn collect<'a>(node: &'a Node, entries: &mut BTreeMap<&'a str, &'a Node>) {
    match node {
        Node::Mapping(fields) => {
            if let Some(id) = node.identifier() {
                // First occurrence wins.
                entries.entry(id).or_insert(node);
            }
            for (_, value) in fields {
                collect(value, entries);
            }
        }
        Node::Sequence(items) => {
            for item in items {
                collect(item, entries);
            }
        }
        Node::Scalar(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Node {
        serde_yaml::from_str::<serde_yaml::Value>(yaml).unwrap().into()
    }

    #[test]
    fn collects_ids_at_every_depth() {
        let root = parse(
            "id: sys_core\n\
             domains:\n\
             \x20 billing:\n\
             \x20   id: dom_billing\n\
             \x20   aggregates:\n\
             \x20     - id: agg_invoice\n\
             \x20     - id: agg_payment\n",
        );
        let index = IdentifierIndex::build(&root);

        assert_eq!(index.len(), 4);
        for id in ["sys_core", "dom_billing", "agg_invoice", "agg_payment"] {
            assert!(index.contains(id), "missing {id}");
        }
    }

    #[test]
    fn indexed_entity_is_the_declaring_mapping() {
        let root = parse("services:\n  - id: svc_app_checkout\n    name: Checkout\n");
        let index = IdentifierIndex::build(&root);

        let entity = index.get("svc_app_checkout").unwrap();
        assert_eq!(entity.get("name").and_then(Node::as_str), Some("Checkout"));
    }

    #[test]
    fn first_occurrence_wins_on_duplicates() {
        let root = parse(
            "first:\n  id: dom_shared\n  name: First\nsecond:\n  id: dom_shared\n  name: Second\n",
        );
        let index = IdentifierIndex::build(&root);

        assert_eq!(index.len(), 1);
        let entity = index.get("dom_shared").unwrap();
        assert_eq!(entity.get("name").and_then(Node::as_str), Some("First"));
    }

    #[test]
    fn no_ids_yields_empty_index() {
        let index_source = parse("a: 1\nb:\n  - x\n  - y\n");
        let index = IdentifierIndex::build(&index_source);
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn non_string_ids_are_not_indexed() {
        let root = parse("thing:\n  id: 42\n");
        assert!(IdentifierIndex::build(&root).is_empty());
    }

    #[test]
    fn is_reference_matches_indexed_strings_only() {
        let root = parse("thing:\n  id: ds_orders\n");
        let index = IdentifierIndex::build(&root);

        assert!(index.is_reference(&Node::Scalar(Scalar::String("ds_orders".into()))));
        assert!(!index.is_reference(&Node::Scalar(Scalar::String("ds_unknown".into()))));
        assert!(!index.is_reference(&Node::Scalar(Scalar::Int(7))));
        assert!(!index.is_reference(&Node::Sequence(vec![])));
    }

    #[test]
    fn resolve_sequence_is_all_or_nothing() {
        let root = parse("one:\n  id: a\ntwo:\n  id: b\n");
        let index = IdentifierIndex::build(&root);

        let full = vec![
            Node::Scalar(Scalar::String("a".into())),
            Node::Scalar(Scalar::String("b".into())),
        ];
        let resolved = index.resolve_sequence(&full).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].identifier(), Some("a"));
        assert_eq!(resolved[1].identifier(), Some("b"));

        let partial = vec![
            Node::Scalar(Scalar::String("a".into())),
            Node::Scalar(Scalar::String("b".into())),
            Node::Scalar(Scalar::String("x".into())),
        ];
        assert!(index.resolve_sequence(&partial).is_none());
    }

    #[test]
    fn resolve_sequence_preserves_order() {
        let root = parse("one:\n  id: a\ntwo:\n  id: b\n");
        let index = IdentifierIndex::build(&root);

        let items = vec![
            Node::Scalar(Scalar::String("b".into())),
            Node::Scalar(Scalar::String("a".into())),
        ];
        let resolved = index.resolve_sequence(&items).unwrap();
        assert_eq!(resolved[0].identifier(), Some("b"));
        assert_eq!(resolved[1].identifier(), Some("a"));
    }

    #[test]
    fn iteration_is_sorted() {
        let root = parse("x:\n  id: zz\ny:\n  id: aa\nz:\n  id: mm\n");
        let index = IdentifierIndex::build(&root);
        let ids: Vec<&str> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["aa", "mm", "zz"]);
    }
}
