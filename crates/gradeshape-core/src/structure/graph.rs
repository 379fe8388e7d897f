//! Raw path graphs and their validation into grade structures

use std::collections::{BTreeMap, BTreeSet};

use crate::bail_structure;
use crate::criterion::GradePath;
use crate::error::Result;

use super::GradeStructure;

/// A directed graph over paths, as handed over by collaborators that build
/// shapes edge by edge. Nothing is checked until it is turned into a
/// [`GradeStructure`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathGraph {
    nodes: BTreeSet<GradePath>,
    edges: BTreeSet<(GradePath, GradePath)>,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, path: GradePath) -> &mut Self {
        self.nodes.insert(path);
        self
    }

    /// Add an edge, registering both endpoints as nodes
    pub fn add_edge(&mut self, from: GradePath, to: GradePath) -> &mut Self {
        self.nodes.insert(from.clone());
        self.nodes.insert(to.clone());
        self.edges.insert((from, to));
        self
    }

    pub fn nodes(&self) -> &BTreeSet<GradePath> {
        &self.nodes
    }

    pub fn edges(&self) -> &BTreeSet<(GradePath, GradePath)> {
        &self.edges
    }
}

impl GradeStructure {
    /// Build a structure from a raw graph, checking the tree invariants:
    /// the root is a node, and every other node has exactly one predecessor,
    /// which is the node itself without its last criterion.
    pub fn from_graph(graph: &PathGraph) -> Result<GradeStructure> {
        let root = GradePath::root();
        if !graph.nodes.contains(&root) {
            bail_structure!("root is not a node");
        }

        let mut predecessors: BTreeMap<&GradePath, Vec<&GradePath>> = BTreeMap::new();
        for (from, to) in &graph.edges {
            if !graph.nodes.contains(from) || !graph.nodes.contains(to) {
                bail_structure!("edge {} -> {} references an unknown node", from, to);
            }
            predecessors.entry(to).or_default().push(from);
        }

        for node in &graph.nodes {
            let preds = predecessors.get(node).map(Vec::as_slice).unwrap_or(&[]);
            if node.is_root() {
                if !preds.is_empty() {
                    bail_structure!("root has {} predecessor(s)", preds.len());
                }
                continue;
            }
            match preds {
                [] => bail_structure!("{} has no predecessor", node),
                [pred] => {
                    let parent = node.without_tail()?;
                    if **pred != parent {
                        bail_structure!(
                            "{} has predecessor {} but its parent is {}",
                            node,
                            pred,
                            parent
                        );
                    }
                }
                many => bail_structure!("{} has {} predecessors", node, many.len()),
            }
        }

        let mut children: BTreeMap<GradePath, BTreeSet<_>> = graph
            .nodes
            .iter()
            .map(|node| (node.clone(), BTreeSet::new()))
            .collect();
        for (from, to) in &graph.edges {
            if let (Some(set), Some(tail)) = (children.get_mut(from), to.tail()) {
                set.insert(tail.clone());
            }
        }

        Ok(GradeStructure { children })
    }

    /// The graph view of this structure: every path as a node and an edge
    /// from each path to each of its immediate children.
    pub fn to_graph(&self) -> PathGraph {
        let mut graph = PathGraph::new();
        graph.add_node(GradePath::root());
        for (from, to) in self.edges() {
            graph.add_edge(from, to);
        }
        for path in self.paths() {
            graph.add_node(path.clone());
        }
        graph
    }
}
