//! Dependency maps: the input of the layering.
//!
//! A [`DependencyMap`] maps each node to the ordered list of its predecessors,
//! i.e. the nodes it depends on. Its keys are exactly the nodes to lay out.
//! Predecessor lists may mention names that are not keys; such dangling
//! references are legal and treated as leaves by [`layer`](crate::layer).

use indexmap::{IndexMap, map};
use serde::{Deserialize, Serialize};

use crate::node::NodeName;

/// Insertion-ordered mapping from a node to its predecessors.
///
/// Key insertion order drives the default visitation order of the layering,
/// which makes the result deterministic for a given map.
///
/// # Examples
///
/// ```
/// use esparx_layering::DependencyMap;
///
/// let mut map = DependencyMap::new();
/// map.add_node("dataset");
/// map.add_dependency("model", "dataset");
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.dependencies("model"), ["dataset"]);
/// assert!(map.dependencies("unknown").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyMap {
    entries: IndexMap<NodeName, Vec<NodeName>>,
}

impl DependencyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the predecessors of `node`, replacing any previous list.
    ///
    /// A replaced node keeps its original insertion position.
    pub fn insert<N, I, D>(&mut self, node: N, dependencies: I)
    where
        N: Into<NodeName>,
        I: IntoIterator<Item = D>,
        D: Into<NodeName>,
    {
        let dependencies = dependencies.into_iter().map(Into::into).collect();
        self.entries.insert(node.into(), dependencies);
    }

    /// Adds `node` with no predecessors. Does nothing if it is already present.
    pub fn add_node(&mut self, node: impl Into<NodeName>) {
        self.entries.entry(node.into()).or_default();
    }

    /// Appends `dependency` to the predecessors of `node`, adding `node` first
    /// if needed.
    ///
    /// `dependency` itself is not added as a key.
    pub fn add_dependency(&mut self, node: impl Into<NodeName>, dependency: impl Into<NodeName>) {
        self.entries
            .entry(node.into())
            .or_default()
            .push(dependency.into());
    }

    /// Returns the predecessors of `node`, or an empty slice if it is not a key.
    pub fn dependencies(&self, node: &str) -> &[NodeName] {
        self.entries.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `node` is a key of the map.
    pub fn contains(&self, node: &str) -> bool {
        self.entries.contains_key(node)
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeName> {
        self.entries.keys()
    }

    /// Returns an iterator over `(node, predecessors)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeName, &[NodeName])> {
        self.entries
            .iter()
            .map(|(node, deps)| (node, deps.as_slice()))
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of predecessor references across all keys.
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl<N, I, D> FromIterator<(N, I)> for DependencyMap
where
    N: Into<NodeName>,
    I: IntoIterator<Item = D>,
    D: Into<NodeName>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<N, I, D> Extend<(N, I)> for DependencyMap
where
    N: Into<NodeName>,
    I: IntoIterator<Item = D>,
    D: Into<NodeName>,
{
    fn extend<T: IntoIterator<Item = (N, I)>>(&mut self, iter: T) {
        for (node, dependencies) in iter {
            self.insert(node, dependencies);
        }
    }
}

impl IntoIterator for DependencyMap {
    type Item = (NodeName, Vec<NodeName>);
    type IntoIter = map::IntoIter<NodeName, Vec<NodeName>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_is_empty() {
        let map = DependencyMap::new();

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.edge_count(), 0);
        assert_eq!(map.nodes().count(), 0);
    }

    #[test]
    fn test_insert_replaces_and_keeps_position() {
        let mut map = DependencyMap::new();
        map.insert("a", ["x"]);
        map.insert("b", Vec::<&str>::new());
        map.insert("a", ["y", "z"]);

        let nodes: Vec<&str> = map.nodes().map(NodeName::as_str).collect();
        assert_eq!(nodes, ["a", "b"]);
        assert_eq!(map.dependencies("a"), ["y", "z"]);
    }

    #[test]
    fn test_add_node_keeps_existing_dependencies() {
        let mut map = DependencyMap::new();
        map.add_dependency("model", "data");
        map.add_node("model");

        assert_eq!(map.dependencies("model"), ["data"]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_add_dependency_does_not_add_dependency_as_key() {
        let mut map = DependencyMap::new();
        map.add_dependency("model", "data");

        assert!(map.contains("model"));
        assert!(!map.contains("data"));
        assert!(map.dependencies("data").is_empty());
    }

    #[test]
    fn test_duplicate_dependencies_are_kept() {
        let mut map = DependencyMap::new();
        map.add_dependency("b", "a");
        map.add_dependency("b", "a");

        assert_eq!(map.dependencies("b"), ["a", "a"]);
        assert_eq!(map.edge_count(), 2);
    }

    #[test]
    fn test_collect_from_pairs() {
        let map: DependencyMap = [("a", vec![]), ("b", vec!["a"]), ("c", vec!["a", "b"])]
            .into_iter()
            .collect();

        let pairs: Vec<(&str, usize)> = map
            .iter()
            .map(|(node, deps)| (node.as_str(), deps.len()))
            .collect();
        assert_eq!(pairs, [("a", 0), ("b", 1), ("c", 2)]);
    }

    #[test]
    fn test_deserialize_preserves_key_order() {
        let json = r#"{"zeta": [], "alpha": ["zeta"], "mid": ["alpha"]}"#;
        let map: DependencyMap = serde_json::from_str(json).unwrap();

        let nodes: Vec<&str> = map.nodes().map(NodeName::as_str).collect();
        assert_eq!(nodes, ["zeta", "alpha", "mid"]);
        assert_eq!(map.dependencies("mid"), ["alpha"]);
    }

    #[test]
    fn test_serialize_as_object() {
        let map: DependencyMap = [("a", vec![]), ("b", vec!["a"])].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(json, r#"{"a":[],"b":["a"]}"#);
    }
}
