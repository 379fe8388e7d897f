//! Covering search: where in the detailed grade do the criteria of a
//! target node show up as siblings?

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::criterion::{Criterion, GradePath};
use crate::error::{GradeError, Result};
use crate::grade::Grade;

/// Above this many criteria at one target node only the full set is tried
pub const MAX_SUBSET_SEARCH: usize = 16;

/// Candidate criterion sets, most demanding first: the full set, then every
/// non-empty proper subset by decreasing size, ties broken by comparing the
/// sorted criterion names.
pub(crate) fn candidate_subsets(criteria: &BTreeSet<Criterion>) -> Vec<Vec<&Criterion>> {
    let sorted: Vec<&Criterion> = criteria.iter().collect();
    if sorted.len() > MAX_SUBSET_SEARCH {
        tracing::warn!(
            criteria = sorted.len(),
            limit = MAX_SUBSET_SEARCH,
            "too many criteria for a subset search, trying the full set only"
        );
        return vec![sorted];
    }

    let mut subsets: Vec<Vec<&Criterion>> = (1u32..(1u32 << sorted.len()))
        .map(|mask| {
            sorted
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect()
        })
        .collect();
    subsets.sort_by(|a, b| Reverse(a.len()).cmp(&Reverse(b.len())).then_with(|| a.cmp(b)));
    subsets
}

/// State of one covering attempt for a single candidate
struct CoverWalk<'a> {
    candidate: &'a [&'a Criterion],
    claimed: &'a BTreeSet<Criterion>,
    covers: BTreeSet<GradePath>,
}

impl CoverWalk<'_> {
    /// Walk `grade` (found at `path`) depth-first. A node whose children
    /// include the whole candidate is a cover; below it only the children
    /// not claimed by the target node are explored. Reaching a leaf without
    /// a match fails the walk.
    fn walk(&mut self, grade: &Grade, path: &GradePath) -> bool {
        let children = grade.sub_grades();
        if children.is_empty() {
            return false;
        }

        let is_cover = self.candidate.iter().all(|c| children.contains_key(*c));
        if is_cover {
            self.covers.insert(path.clone());
        }

        let claimed = self.claimed;
        children
            .iter()
            .filter(|(criterion, _)| !(is_cover && claimed.contains(*criterion)))
            .all(|(criterion, weighted)| {
                self.walk(weighted.grade(), &path.with_suffix(criterion.clone()))
            })
    }
}

/// Find the cover paths for the first candidate subset of `next` that
/// covers every frontier path. Fails with `UncoverableStructure` when no
/// candidate does.
pub(crate) fn find_cover(
    grade: &Grade,
    frontier: &BTreeSet<GradePath>,
    next: &BTreeSet<Criterion>,
) -> Result<BTreeSet<GradePath>> {
    let candidates = candidate_subsets(next);
    tracing::trace!(candidates = candidates.len(), "cover_search");

    for candidate in &candidates {
        let mut walk = CoverWalk {
            candidate,
            claimed: next,
            covers: BTreeSet::new(),
        };
        let covered = frontier.iter().all(|path| match grade.get(path) {
            Some(node) => walk.walk(node, path),
            None => false,
        });
        if covered {
            tracing::debug!(
                candidate = %join(candidate.iter().copied()),
                covers = walk.covers.len(),
                "cover_found"
            );
            return Ok(walk.covers);
        }
    }

    Err(GradeError::UncoverableStructure {
        criteria: join(next.iter()),
        frontier: join(frontier.iter()),
    })
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|item| item.to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(names: &[&str]) -> BTreeSet<Criterion> {
        names.iter().map(|n| Criterion::new(*n)).collect()
    }

    fn names(subset: &[&Criterion]) -> Vec<String> {
        subset.iter().map(|c| c.name().to_string()).collect()
    }

    fn path(s: &str) -> GradePath {
        s.parse().unwrap()
    }

    fn mark(points: f64) -> Grade {
        Grade::mark(points, "").unwrap()
    }

    fn node(children: Vec<(&str, Grade)>) -> Grade {
        Grade::composite(
            children
                .into_iter()
                .map(|(name, grade)| (Criterion::new(name), grade, 1.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_candidate_order() {
        let set = criteria(&["c", "a", "b"]);
        let order: Vec<Vec<String>> = candidate_subsets(&set).iter().map(|s| names(s)).collect();
        assert_eq!(
            order,
            vec![
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c"],
                vec!["b", "c"],
                vec!["a"],
                vec!["b"],
                vec!["c"],
            ]
        );
    }

    #[test]
    fn test_candidate_limit() {
        let many: Vec<String> = (0..=MAX_SUBSET_SEARCH).map(|i| format!("c{:02}", i)).collect();
        let set: BTreeSet<Criterion> = many.iter().map(|n| Criterion::new(n.as_str())).collect();
        let candidates = candidate_subsets(&set);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].len(), MAX_SUBSET_SEARCH + 1);
    }

    #[test]
    fn test_cover_at_frontier() {
        let grade = node(vec![("a", mark(1.0)), ("b", mark(0.0))]);
        let frontier = BTreeSet::from([GradePath::root()]);
        let covers = find_cover(&grade, &frontier, &criteria(&["a", "b"])).unwrap();
        assert_eq!(covers, BTreeSet::from([GradePath::root()]));
    }

    #[test]
    fn test_cover_found_deeper() {
        let grade = node(vec![
            ("x", node(vec![("a", mark(1.0)), ("b", mark(0.0))])),
            ("y", node(vec![("a", mark(0.5)), ("b", mark(0.5))])),
        ]);
        let frontier = BTreeSet::from([GradePath::root()]);
        let covers = find_cover(&grade, &frontier, &criteria(&["a", "b"])).unwrap();
        assert_eq!(covers, BTreeSet::from([path("x"), path("y")]));
    }

    #[test]
    fn test_cover_falls_back_to_subset() {
        // "b" only shows up under one branch
        let grade = node(vec![
            ("a", mark(1.0)),
            ("rest", node(vec![("a", mark(0.0)), ("b", mark(1.0))])),
        ]);
        let frontier = BTreeSet::from([GradePath::root()]);
        let covers = find_cover(&grade, &frontier, &criteria(&["a", "b"])).unwrap();
        assert_eq!(covers, BTreeSet::from([GradePath::root(), path("rest")]));
    }

    #[test]
    fn test_unclaimed_leaf_fails() {
        let grade = node(vec![("a", mark(1.0)), ("b", mark(0.0)), ("extra", mark(1.0))]);
        let frontier = BTreeSet::from([GradePath::root()]);
        let err = find_cover(&grade, &frontier, &criteria(&["a", "b"])).unwrap_err();
        assert!(matches!(err, GradeError::UncoverableStructure { .. }));
    }

    #[test]
    fn test_leaf_frontier_fails() {
        let grade = mark(1.0);
        let frontier = BTreeSet::from([GradePath::root()]);
        assert!(find_cover(&grade, &frontier, &criteria(&["a"])).is_err());
    }
}
