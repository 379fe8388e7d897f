//! Grade structures: the shape of a grade, or of a desired report
//!
//! A structure is a tree of paths. It is stored as a map from every node to
//! the set of criteria of its immediate children, which keeps the tree
//! invariants by construction:
//! - the root is always a node
//! - the only predecessor of a non-root node is that node without its tail
//!
//! Descendants of a path sort contiguously right after it, so sub-structure
//! extraction is a range scan.

mod graph;

pub use graph::PathGraph;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criterion::{Criterion, GradePath};
use crate::error::{GradeError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeStructure {
    children: BTreeMap<GradePath, BTreeSet<Criterion>>,
}

impl Default for GradeStructure {
    fn default() -> Self {
        Self::root_only()
    }
}

impl GradeStructure {
    /// The single-node structure containing only the root
    pub fn root_only() -> Self {
        let mut children = BTreeMap::new();
        children.insert(GradePath::root(), BTreeSet::new());
        GradeStructure { children }
    }

    /// The smallest structure containing every given path, with all
    /// intermediate prefixes synthesized. Never fails.
    pub fn given(paths: impl IntoIterator<Item = GradePath>) -> Self {
        let mut structure = Self::root_only();
        for path in paths {
            structure.insert(&path);
        }
        structure
    }

    /// A one-level tree with one leaf per criterion
    pub fn tree(criteria: impl IntoIterator<Item = Criterion>) -> Self {
        Self::given(criteria.into_iter().map(GradePath::from))
    }

    /// Each sub-structure placed under its criterion, below a common root
    pub fn composed(subs: &BTreeMap<Criterion, GradeStructure>) -> Self {
        let mut structure = Self::root_only();
        for (criterion, sub) in subs {
            let prefix = GradePath::from(criterion.clone());
            for leaf in sub.leaves() {
                structure.insert(&leaf.with_prefix(&prefix));
            }
        }
        structure
    }

    /// The structure over the union of the leaves of all inputs
    pub fn merge<'a>(structures: impl IntoIterator<Item = &'a GradeStructure>) -> Self {
        Self::given(structures.into_iter().flat_map(GradeStructure::leaves))
    }

    fn insert(&mut self, path: &GradePath) {
        let mut current = GradePath::root();
        for segment in path.segments() {
            self.children
                .entry(current.clone())
                .or_default()
                .insert(segment.clone());
            current = current.with_suffix(segment.clone());
        }
        self.children.entry(current).or_default();
    }

    pub fn contains(&self, path: &GradePath) -> bool {
        self.children.contains_key(path)
    }

    /// Every node, parents before their descendants
    pub fn paths(&self) -> impl Iterator<Item = &GradePath> {
        self.children.keys()
    }

    pub fn node_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_root_only(&self) -> bool {
        self.children.len() == 1
    }

    /// Nodes without children
    pub fn leaves(&self) -> BTreeSet<GradePath> {
        self.children
            .iter()
            .filter(|(_, criteria)| criteria.is_empty())
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Every parent -> child edge
    pub fn edges(&self) -> Vec<(GradePath, GradePath)> {
        self.children
            .iter()
            .flat_map(|(path, criteria)| {
                criteria
                    .iter()
                    .map(move |c| (path.clone(), path.with_suffix(c.clone())))
            })
            .collect()
    }

    pub fn has_edge(&self, from: &GradePath, to: &GradePath) -> bool {
        match (self.children.get(from), to.tail()) {
            (Some(criteria), Some(tail)) => {
                to.size() == from.size() + 1 && to.starts_with(from) && criteria.contains(tail)
            }
            _ => false,
        }
    }

    /// Criteria of the immediate children of `path`
    pub fn successor_criteria(&self, path: &GradePath) -> Result<&BTreeSet<Criterion>> {
        self.children
            .get(path)
            .ok_or_else(|| GradeError::unknown_path(path))
    }

    /// Paths of the immediate children of `path`
    pub fn successor_paths(&self, path: &GradePath) -> Result<BTreeSet<GradePath>> {
        Ok(self
            .successor_criteria(path)?
            .iter()
            .map(|c| path.with_suffix(c.clone()))
            .collect())
    }

    /// The sub-tree rooted at `path`, with its paths relativized so that
    /// `path` becomes the root.
    pub fn get_structure(&self, path: &GradePath) -> Result<GradeStructure> {
        if !self.contains(path) {
            return Err(GradeError::unknown_path(path));
        }
        let children = self
            .children
            .range(path.clone()..)
            .take_while(|(p, _)| p.starts_with(path))
            .filter_map(|(p, criteria)| p.relativize(path).map(|rel| (rel, criteria.clone())))
            .collect();
        Ok(GradeStructure { children })
    }

    /// The sub-tree below the root's child `criterion`
    pub fn get_structure_of(&self, criterion: &Criterion) -> Result<GradeStructure> {
        self.get_structure(&GradePath::from(criterion.clone()))
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, path: &GradePath) -> fmt::Result {
        let Some(criteria) = self.children.get(path) else {
            return Ok(());
        };
        for criterion in criteria {
            let child = path.with_suffix(criterion.clone());
            writeln!(f, "{:indent$}{}", "", criterion, indent = path.size() * 2)?;
            self.fmt_node(f, &child)?;
        }
        Ok(())
    }
}

/// Renders one criterion per line, indented by depth
impl fmt::Display for GradeStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", GradePath::root())?;
        self.fmt_node(f, &GradePath::root())
    }
}

impl Serialize for GradeStructure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.leaves())
    }
}

impl<'de> Deserialize<'de> for GradeStructure {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let leaves = Vec::<GradePath>::deserialize(deserializer)?;
        Ok(GradeStructure::given(leaves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> GradePath {
        s.parse().unwrap()
    }

    fn paths(items: &[&str]) -> BTreeSet<GradePath> {
        items.iter().map(|s| path(s)).collect()
    }

    #[test]
    fn test_given_synthesizes_prefixes() {
        let structure = GradeStructure::given([path("a/b"), path("a/c")]);
        let nodes: BTreeSet<GradePath> = structure.paths().cloned().collect();
        assert_eq!(nodes, paths(&["", "a", "a/b", "a/c"]));
        assert_eq!(structure.leaves(), paths(&["a/b", "a/c"]));
        assert_eq!(
            structure.edges(),
            vec![
                (GradePath::root(), path("a")),
                (path("a"), path("a/b")),
                (path("a"), path("a/c")),
            ]
        );
    }

    #[test]
    fn test_given_empty_is_root_only() {
        let structure = GradeStructure::given(Vec::new());
        assert!(structure.is_root_only());
        assert_eq!(structure.leaves(), paths(&[""]));
        assert_eq!(structure, GradeStructure::default());
    }

    #[test]
    fn test_tree() {
        let structure = GradeStructure::tree([Criterion::new("x"), Criterion::new("y")]);
        assert_eq!(structure.leaves(), paths(&["x", "y"]));
        assert_eq!(structure.node_count(), 3);
    }

    #[test]
    fn test_successors() {
        let structure = GradeStructure::given([path("a/b"), path("a/c"), path("d")]);
        let criteria: Vec<&str> = structure
            .successor_criteria(&GradePath::root())
            .unwrap()
            .iter()
            .map(Criterion::name)
            .collect();
        assert_eq!(criteria, vec!["a", "d"]);
        assert_eq!(
            structure.successor_paths(&path("a")).unwrap(),
            paths(&["a/b", "a/c"])
        );
        assert!(structure.successor_criteria(&path("d")).unwrap().is_empty());
        assert!(structure.successor_paths(&path("zz")).is_err());
    }

    #[test]
    fn test_get_structure_relativizes() {
        let structure = GradeStructure::given([path("a/b/x"), path("a/c"), path("ab/z")]);
        let sub = structure.get_structure(&path("a")).unwrap();
        assert_eq!(sub.leaves(), paths(&["b/x", "c"]));
        assert_eq!(sub, structure.get_structure_of(&Criterion::new("a")).unwrap());
        assert!(structure.get_structure(&path("a/c")).unwrap().is_root_only());
        assert_eq!(structure.get_structure(&GradePath::root()).unwrap(), structure);
    }

    #[test]
    fn test_get_structure_unknown_path() {
        let structure = GradeStructure::given([path("a")]);
        let err = structure.get_structure(&path("b")).unwrap_err();
        assert!(matches!(err, GradeError::UnknownPath { .. }));
    }

    #[test]
    fn test_composed() {
        let mut subs = BTreeMap::new();
        subs.insert(Criterion::new("code"), GradeStructure::given([path("tests"), path("style")]));
        subs.insert(Criterion::new("git"), GradeStructure::root_only());
        let structure = GradeStructure::composed(&subs);
        assert_eq!(structure.leaves(), paths(&["code/style", "code/tests", "git"]));
    }

    #[test]
    fn test_merge_unions_leaves() {
        let first = GradeStructure::given([path("a/b")]);
        let second = GradeStructure::given([path("a/c"), path("d")]);
        let merged = GradeStructure::merge([&first, &second]);
        assert_eq!(merged.leaves(), paths(&["a/b", "a/c", "d"]));
        assert!(GradeStructure::merge(Vec::new()).is_root_only());
    }

    #[test]
    fn test_has_edge() {
        let structure = GradeStructure::given([path("a/b")]);
        assert!(structure.has_edge(&GradePath::root(), &path("a")));
        assert!(structure.has_edge(&path("a"), &path("a/b")));
        assert!(!structure.has_edge(&GradePath::root(), &path("a/b")));
        assert!(!structure.has_edge(&path("a"), &path("a/c")));
    }

    #[test]
    fn test_display_indents_by_depth() {
        let structure = GradeStructure::given([path("a/b"), path("c")]);
        assert_eq!(structure.to_string(), "/\na\n  b\nc\n");
    }

    #[test]
    fn test_serde_as_leaf_list() {
        let structure = GradeStructure::given([path("a/b"), path("c")]);
        let json = serde_json::to_string(&structure).unwrap();
        assert_eq!(json, r#"["a/b","c"]"#);
        let back: GradeStructure = serde_json::from_str(&json).unwrap();
        assert_eq!(back, structure);
    }
}
