//! Criteria and the paths that address positions in a grade tree

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GradeError, Result};

/// Separator used in the textual form of a path (`code/tests/unit`)
pub const PATH_SEPARATOR: char = '/';

/// A named label in a grading hierarchy.
///
/// Criteria compare, order and hash by name only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criterion(String);

impl Criterion {
    pub fn new(name: impl Into<String>) -> Self {
        Criterion(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check that the name survives the textual path form: non-empty, no
    /// separator, no surrounding whitespace.
    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        if name.is_empty() || name.contains(PATH_SEPARATOR) || name.trim() != name {
            return Err(GradeError::InvalidCriterion {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Criterion {
    fn from(name: &str) -> Self {
        Criterion::new(name)
    }
}

impl From<String> for Criterion {
    fn from(name: String) -> Self {
        Criterion(name)
    }
}

/// An ordered sequence of criteria. The empty sequence is the root.
///
/// Paths order lexicographically by segment, so a parent always sorts
/// before its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GradePath {
    segments: Vec<Criterion>,
}

impl GradePath {
    /// The root path
    pub fn root() -> Self {
        GradePath::default()
    }

    pub fn new(segments: impl IntoIterator<Item = Criterion>) -> Self {
        GradePath {
            segments: segments.into_iter().collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn size(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Criterion] {
        &self.segments
    }

    /// Last segment, `None` on root
    pub fn tail(&self) -> Option<&Criterion> {
        self.segments.last()
    }

    /// This path without its last segment.
    ///
    /// Fails with `InvalidPathOperation` on the root path.
    pub fn without_tail(&self) -> Result<GradePath> {
        match self.segments.split_last() {
            Some((_, parent)) => Ok(GradePath {
                segments: parent.to_vec(),
            }),
            None => Err(GradeError::InvalidPathOperation {
                operation: "without_tail".to_string(),
                path: self.clone(),
            }),
        }
    }

    pub fn with_suffix(&self, criterion: Criterion) -> GradePath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(criterion);
        GradePath { segments }
    }

    /// `prefix` followed by the segments of this path
    pub fn with_prefix(&self, prefix: &GradePath) -> GradePath {
        let mut segments = prefix.segments.clone();
        segments.extend_from_slice(&self.segments);
        GradePath { segments }
    }

    pub fn starts_with(&self, prefix: &GradePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// The remainder of this path after `prefix`, or `None` when `prefix`
    /// is not a prefix of it.
    pub fn relativize(&self, prefix: &GradePath) -> Option<GradePath> {
        self.segments
            .strip_prefix(prefix.segments.as_slice())
            .map(|rest| GradePath {
                segments: rest.to_vec(),
            })
    }
}

impl fmt::Display for GradePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "{}", PATH_SEPARATOR);
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for GradePath {
    type Err = GradeError;

    /// Parse `a/b/c`. Empty segments are skipped, so `""` and `"/"` are root.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(GradePath::new(
            s.split(PATH_SEPARATOR)
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .map(Criterion::from),
        ))
    }
}

impl From<Criterion> for GradePath {
    fn from(criterion: Criterion) -> Self {
        GradePath {
            segments: vec![criterion],
        }
    }
}

impl Serialize for GradePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GradePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
