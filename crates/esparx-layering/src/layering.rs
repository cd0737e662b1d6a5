//! Cycle-tolerant topological layering.
//!
//! [`layer`] walks a [`DependencyMap`] depth first and emits every node after
//! all of its predecessors (post-order), assigning each node the length of
//! its longest predecessor chain. The input comes from a loosely validated
//! store, so cycles must not abort the walk: a predecessor that is still on
//! the traversal stack is not followed again, and the edge is recorded in
//! [`Layering::cycle_edges`] instead.
//!
//! The walk keeps its own frame stack rather than recursing, so long
//! dependency chains do not grow the call stack.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Serialize;

use crate::{
    dependency_map::DependencyMap,
    node::{Level, NodeName},
};

/// Result of laying out a [`DependencyMap`].
///
/// `order` is a permutation of the map's keys with predecessors first when
/// the graph is acyclic. `levels` holds an entry for every node in `order`,
/// plus any dangling predecessor that was reached while walking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Layering {
    order: Vec<NodeName>,
    levels: IndexMap<NodeName, Level>,
    cycle_edges: Vec<(NodeName, NodeName)>,
}

impl Layering {
    /// Returns the nodes in visitation order.
    pub fn order(&self) -> &[NodeName] {
        &self.order
    }

    /// Returns the level of every visited node.
    pub fn levels(&self) -> &IndexMap<NodeName, Level> {
        &self.levels
    }

    /// Returns the level of `node`, if it was visited.
    pub fn level(&self, node: &str) -> Option<Level> {
        self.levels.get(node).copied()
    }

    /// Returns the highest level among the nodes in `order`.
    pub fn max_level(&self) -> Option<Level> {
        self.order.iter().filter_map(|node| self.level(node)).max()
    }

    /// Groups the nodes of `order` by level.
    ///
    /// The outer index is the level; nodes within a column keep their
    /// relative position in `order`. Levels without any node yield an empty
    /// column.
    pub fn columns(&self) -> Vec<Vec<&NodeName>> {
        let Some(max_level) = self.max_level() else {
            return Vec::new();
        };

        let mut columns = vec![Vec::new(); max_level + 1];
        for node in &self.order {
            let level = self.level(node).unwrap_or_default();
            columns[level].push(node);
        }
        columns
    }

    /// Returns the `(node, predecessor)` edges that closed a cycle and were
    /// therefore not followed.
    pub fn cycle_edges(&self) -> &[(NodeName, NodeName)] {
        &self.cycle_edges
    }

    /// Returns `true` if the walk met at least one cycle.
    pub fn has_cycles(&self) -> bool {
        !self.cycle_edges.is_empty()
    }

    /// Returns the number of nodes in `order`.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no node was laid out.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Computes a deterministic ordering and a level for every key of `map`.
///
/// This never fails. Cycles, self-loops and references to unknown nodes are
/// absorbed:
///
/// - An unknown predecessor is a leaf at level 0. It contributes one level of
///   depth to its dependents and appears in [`Layering::levels`], but not in
///   [`Layering::order`].
/// - A predecessor already on the traversal stack closes a cycle. It is not
///   descended into, and it only contributes depth if its level is already
///   known. Levels inside a cycle are therefore best effort.
///
/// # Examples
///
/// ```
/// use esparx_layering::{DependencyMap, layer};
///
/// let map: DependencyMap = [("a", vec!["b"]), ("b", vec!["a"])].into_iter().collect();
/// let layering = layer(&map);
///
/// assert_eq!(layering.len(), 2);
/// assert!(layering.has_cycles());
/// ```
pub fn layer(map: &DependencyMap) -> Layering {
    let mut walk = Walk::new(map);
    for node in map.nodes() {
        if !walk.is_done(node) {
            walk.visit(node);
        }
    }

    let layering = walk.finish();
    debug!(
        nodes = layering.order.len(),
        edges = map.edge_count(),
        cycle_edges = layering.cycle_edges.len();
        "Dependency map layered"
    );
    layering
}

/// Per-node traversal mark. Absence from the mark table means unvisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the traversal stack.
    InProgress,
    /// Finished; its level is final.
    Done,
}

/// A node whose predecessors are being walked.
struct Frame<'a> {
    node: &'a NodeName,
    deps: &'a [NodeName],
    next: usize,
    level: Level,
}

impl<'a> Frame<'a> {
    fn new(node: &'a NodeName, deps: &'a [NodeName]) -> Self {
        Self {
            node,
            deps,
            next: 0,
            level: 0,
        }
    }

    /// Raises this frame's level so it sits one past `dep_level`.
    fn absorb(&mut self, dep_level: Level) {
        self.level = self.level.max(dep_level + 1);
    }
}

/// Traversal state for a single [`layer`] call.
struct Walk<'a> {
    map: &'a DependencyMap,
    marks: HashMap<&'a str, VisitState>,
    layering: Layering,
}

impl<'a> Walk<'a> {
    fn new(map: &'a DependencyMap) -> Self {
        Self {
            map,
            marks: HashMap::with_capacity(map.len()),
            layering: Layering {
                order: Vec::with_capacity(map.len()),
                levels: IndexMap::with_capacity(map.len()),
                cycle_edges: Vec::new(),
            },
        }
    }

    fn is_done(&self, node: &str) -> bool {
        self.marks.get(node) == Some(&VisitState::Done)
    }

    fn visit(&mut self, root: &'a NodeName) {
        self.marks.insert(root, VisitState::InProgress);
        let mut stack = vec![Frame::new(root, self.map.dependencies(root))];

        while let Some(frame) = stack.last_mut() {
            let deps = frame.deps;
            let Some(dep) = deps.get(frame.next) else {
                let Some(Frame { node, level, .. }) = stack.pop() else {
                    break;
                };
                let level = self.finish_node(node, level);
                if let Some(parent) = stack.last_mut() {
                    parent.absorb(level);
                }
                continue;
            };
            frame.next += 1;

            match self.marks.get(dep.as_str()).copied() {
                Some(VisitState::InProgress) => {
                    trace!(node = frame.node.as_str(), dependency = dep.as_str(); "Cycle edge skipped");
                    if let Some(dep_level) = self.layering.level(dep) {
                        frame.absorb(dep_level);
                    }
                    self.layering
                        .cycle_edges
                        .push((frame.node.clone(), dep.clone()));
                }
                Some(VisitState::Done) => {
                    let dep_level = self.layering.level(dep).unwrap_or_default();
                    frame.absorb(dep_level);
                }
                None => {
                    if !self.map.contains(dep) {
                        trace!(node = frame.node.as_str(), dependency = dep.as_str(); "Dangling dependency treated as leaf");
                    }
                    self.marks.insert(dep, VisitState::InProgress);
                    stack.push(Frame::new(dep, self.map.dependencies(dep)));
                }
            }
        }
    }

    /// Marks `node` done, emits it if it is a key and records its level.
    ///
    /// Returns the level stored for the node.
    fn finish_node(&mut self, node: &'a NodeName, level: Level) -> Level {
        self.marks.insert(node, VisitState::Done);
        if self.map.contains(node) {
            self.layering.order.push(node.clone());
        }

        let stored = self.layering.levels.entry(node.clone()).or_default();
        *stored = (*stored).max(level);
        *stored
    }

    fn finish(self) -> Layering {
        self.layering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(entries: &[(&str, &[&str])]) -> DependencyMap {
        entries
            .iter()
            .map(|(node, deps)| (*node, deps.iter().copied()))
            .collect()
    }

    fn position(layering: &Layering, node: &str) -> usize {
        layering
            .order()
            .iter()
            .position(|n| n == node)
            .unwrap_or_else(|| panic!("{node} missing from order"))
    }

    #[test]
    fn test_empty_map() {
        let layering = layer(&DependencyMap::new());

        assert!(layering.is_empty());
        assert!(layering.levels().is_empty());
        assert_eq!(layering.max_level(), None);
        assert!(layering.columns().is_empty());
    }

    #[test]
    fn test_single_node() {
        let layering = layer(&map_of(&[("A", &[])]));

        assert_eq!(layering.order(), ["A"]);
        assert_eq!(layering.level("A"), Some(0));
        assert_eq!(layering.levels().len(), 1);
        assert!(!layering.has_cycles());
    }

    #[test]
    fn test_simple_chain() {
        let layering = layer(&map_of(&[("A", &[]), ("B", &["A"])]));

        assert_eq!(layering.order(), ["A", "B"]);
        assert_eq!(layering.level("A"), Some(0));
        assert_eq!(layering.level("B"), Some(1));
    }

    #[test]
    fn test_chain_declared_in_reverse() {
        let layering = layer(&map_of(&[("C", &["B"]), ("B", &["A"]), ("A", &[])]));

        assert_eq!(layering.order(), ["A", "B", "C"]);
        assert_eq!(layering.level("C"), Some(2));
    }

    #[test]
    fn test_diamond() {
        let layering = layer(&map_of(&[
            ("A", &[]),
            ("B", &["A"]),
            ("C", &["A"]),
            ("D", &["B", "C"]),
        ]));

        assert!(position(&layering, "A") < position(&layering, "B"));
        assert!(position(&layering, "A") < position(&layering, "C"));
        assert!(position(&layering, "B") < position(&layering, "D"));
        assert!(position(&layering, "C") < position(&layering, "D"));

        assert_eq!(layering.level("A"), Some(0));
        assert_eq!(layering.level("B"), Some(1));
        assert_eq!(layering.level("C"), Some(1));
        assert_eq!(layering.level("D"), Some(2));
    }

    #[test]
    fn test_longest_chain_wins_over_shortcut() {
        // D depends on A directly and through B -> C.
        let layering = layer(&map_of(&[
            ("D", &["A", "C"]),
            ("C", &["B"]),
            ("B", &["A"]),
            ("A", &[]),
        ]));

        assert_eq!(layering.order(), ["A", "B", "C", "D"]);
        assert_eq!(layering.level("D"), Some(3));
    }

    #[test]
    fn test_root_without_dependents_stays_at_zero() {
        let layering = layer(&map_of(&[("A", &[]), ("B", &["A"]), ("C", &[])]));

        assert_eq!(layering.level("C"), Some(0));
        assert_eq!(layering.order(), ["A", "B", "C"]);
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let layering = layer(&map_of(&[("A", &["B"]), ("B", &["A"])]));

        let mut order: Vec<&str> = layering.order().iter().map(NodeName::as_str).collect();
        order.sort_unstable();
        assert_eq!(order, ["A", "B"]);
        assert_eq!(
            layering.cycle_edges(),
            [(NodeName::new("B"), NodeName::new("A"))]
        );
    }

    #[test]
    fn test_self_loop() {
        let layering = layer(&map_of(&[("A", &["A"])]));

        assert_eq!(layering.order(), ["A"]);
        assert_eq!(layering.level("A"), Some(0));
        assert!(layering.has_cycles());
    }

    #[test]
    fn test_cycle_with_tail() {
        // B <-> C cycle, D hangs off C, A feeds B.
        let layering = layer(&map_of(&[
            ("A", &[]),
            ("B", &["A", "C"]),
            ("C", &["B"]),
            ("D", &["C"]),
        ]));

        assert_eq!(layering.len(), 4);
        assert!(position(&layering, "A") < position(&layering, "B"));
        assert!(position(&layering, "C") < position(&layering, "D"));
        assert!(layering.level("D") > layering.level("C"));
    }

    #[test]
    fn test_dangling_dependency() {
        let layering = layer(&map_of(&[("A", &["X"])]));

        assert_eq!(layering.order(), ["A"]);
        assert_eq!(layering.level("A"), Some(1));
        assert_eq!(layering.level("X"), Some(0));
    }

    #[test]
    fn test_dangling_dependency_shared_by_two_nodes() {
        let layering = layer(&map_of(&[("A", &["X"]), ("B", &["X", "A"])]));

        assert_eq!(layering.order(), ["A", "B"]);
        assert_eq!(layering.level("A"), Some(1));
        assert_eq!(layering.level("B"), Some(2));
    }

    #[test]
    fn test_duplicate_dependency_entries() {
        let layering = layer(&map_of(&[("A", &[]), ("B", &["A", "A"])]));

        assert_eq!(layering.order(), ["A", "B"]);
        assert_eq!(layering.level("B"), Some(1));
        assert!(!layering.has_cycles());
    }

    #[test]
    fn test_columns_follow_order() {
        let layering = layer(&map_of(&[
            ("A", &[]),
            ("B", &["A"]),
            ("C", &["A"]),
            ("E", &[]),
            ("D", &["B", "C"]),
        ]));

        let columns: Vec<Vec<&str>> = layering
            .columns()
            .into_iter()
            .map(|column| column.into_iter().map(NodeName::as_str).collect())
            .collect();
        assert_eq!(columns, [vec!["A", "E"], vec!["B", "C"], vec!["D"]]);
    }

    #[test]
    fn test_columns_ignore_dangling_levels() {
        let layering = layer(&map_of(&[("A", &["X"])]));

        let columns = layering.columns();
        assert_eq!(columns.len(), 2);
        assert!(columns[0].is_empty());
        assert_eq!(columns[1], [&NodeName::new("A")]);
    }

    #[test]
    fn test_input_is_not_modified() {
        let map = map_of(&[("A", &["B"]), ("B", &["A"]), ("C", &["X"])]);
        let before = map.clone();
        let _ = layer(&map);

        assert_eq!(map, before);
    }

    #[test]
    fn test_repeated_calls_agree() {
        let map = map_of(&[("A", &["C"]), ("B", &["A"]), ("C", &["B"]), ("D", &[])]);

        assert_eq!(layer(&map), layer(&map));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 100_000;
        let map: DependencyMap = (0..depth)
            .map(|i| {
                let deps: Vec<String> = if i == 0 {
                    Vec::new()
                } else {
                    vec![format!("n{}", i - 1)]
                };
                (format!("n{i}"), deps)
            })
            .rev()
            .collect();

        let layering = layer(&map);
        assert_eq!(layering.len(), depth);
        assert_eq!(layering.level(&format!("n{}", depth - 1)), Some(depth - 1));
        assert_eq!(layering.order()[0], "n0");
    }

    #[test]
    fn test_serialized_shape() {
        let layering = layer(&map_of(&[("A", &[]), ("B", &["A"])]));
        let json = serde_json::to_value(&layering).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "order": ["A", "B"],
                "levels": { "A": 0, "B": 1 },
                "cycle_edges": [],
            })
        );
    }
}
