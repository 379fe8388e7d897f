//! Grades: leaf marks and weighted composites of named sub-grades
//!
//! A [`Grade`] is immutable once built. Construction validates points and
//! weights, so every reachable grade has finite `points()`.

mod repr;
mod weight;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::criterion::{Criterion, GradePath};
use crate::error::{GradeError, Result};
use crate::structure::GradeStructure;

pub use weight::CumulativeWeight;

static NO_SUB_GRADES: BTreeMap<Criterion, WeightedGrade> = BTreeMap::new();

/// A leaf score with a free-form comment
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    points: f64,
    comment: String,
}

impl Mark {
    /// Fails with `InvalidPoints` when `points` is NaN or infinite
    pub fn new(points: f64, comment: impl Into<String>) -> Result<Self> {
        if !points.is_finite() {
            return Err(GradeError::InvalidPoints { points });
        }
        Ok(Mark {
            points,
            comment: comment.into(),
        })
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// A grade together with its weight among its siblings
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGrade {
    grade: Grade,
    weight: f64,
}

impl WeightedGrade {
    pub fn new(grade: Grade, weight: f64) -> Self {
        WeightedGrade { grade, weight }
    }

    pub fn grade(&self) -> &Grade {
        &self.grade
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A leaf mark with its cumulative weight from the root
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedMark {
    mark: Mark,
    weight: CumulativeWeight,
}

impl WeightedMark {
    pub fn new(mark: Mark, weight: CumulativeWeight) -> Self {
        WeightedMark { mark, weight }
    }

    pub fn mark(&self) -> &Mark {
        &self.mark
    }

    /// Product of the normalized weights from the root
    pub fn weight(&self) -> f64 {
        self.weight.value()
    }

    pub fn cumulative(&self) -> CumulativeWeight {
        self.weight
    }
}

/// Named, weighted sub-grades. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    sub_grades: BTreeMap<Criterion, WeightedGrade>,
}

impl Composite {
    pub fn new(sub_grades: impl IntoIterator<Item = (Criterion, WeightedGrade)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (criterion, weighted) in sub_grades {
            criterion.validate()?;
            if !(weighted.weight.is_finite() && weighted.weight >= 0.0) {
                return Err(GradeError::NegativeWeight {
                    criterion: criterion.to_string(),
                    weight: weighted.weight,
                });
            }
            if map.contains_key(&criterion) {
                return Err(GradeError::invalid_value(
                    "sub-grade criterion",
                    format!("{} (given twice)", criterion),
                ));
            }
            map.insert(criterion, weighted);
        }
        if map.is_empty() {
            return Err(GradeError::EmptyComposite);
        }
        Ok(Composite { sub_grades: map })
    }

    pub fn sub_grades(&self) -> &BTreeMap<Criterion, WeightedGrade> {
        &self.sub_grades
    }

    /// Weights scaled to sum to one. When every weight is zero the
    /// sub-grades count equally.
    pub fn normalized_weights(&self) -> BTreeMap<&Criterion, f64> {
        let total = self.total_weight();
        self.sub_grades
            .iter()
            .map(|(c, weighted)| (c, self.normalize(weighted.weight, total)))
            .collect()
    }

    pub fn normalized_weight(&self, criterion: &Criterion) -> Option<f64> {
        let weighted = self.sub_grades.get(criterion)?;
        Some(self.normalize(weighted.weight, self.total_weight()))
    }

    fn total_weight(&self) -> f64 {
        self.sub_grades.values().map(|w| w.weight).sum()
    }

    fn normalize(&self, weight: f64, total: f64) -> f64 {
        if total > 0.0 {
            weight / total
        } else {
            1.0 / self.sub_grades.len() as f64
        }
    }

    pub fn points(&self) -> f64 {
        self.normalized_weights()
            .into_iter()
            .map(|(c, w)| w * self.sub_grades[c].grade.points())
            .sum()
    }
}

/// Either a leaf [`Mark`] or a [`Composite`] of weighted sub-grades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "repr::GradeRepr", into = "repr::GradeRepr")]
pub enum Grade {
    Mark(Mark),
    Composite(Composite),
}

impl From<Mark> for Grade {
    fn from(mark: Mark) -> Self {
        Grade::Mark(mark)
    }
}

impl From<Composite> for Grade {
    fn from(composite: Composite) -> Self {
        Grade::Composite(composite)
    }
}

impl Grade {
    pub fn mark(points: f64, comment: impl Into<String>) -> Result<Grade> {
        Mark::new(points, comment).map(Grade::Mark)
    }

    /// Build a composite from `(criterion, grade, weight)` triples
    pub fn composite(
        sub_grades: impl IntoIterator<Item = (Criterion, Grade, f64)>,
    ) -> Result<Grade> {
        Composite::new(
            sub_grades
                .into_iter()
                .map(|(c, grade, weight)| (c, WeightedGrade::new(grade, weight))),
        )
        .map(Grade::Composite)
    }

    pub fn points(&self) -> f64 {
        match self {
            Grade::Mark(mark) => mark.points(),
            Grade::Composite(composite) => composite.points(),
        }
    }

    /// Immediate children; empty for a mark
    pub fn sub_grades(&self) -> &BTreeMap<Criterion, WeightedGrade> {
        match self {
            Grade::Mark(_) => &NO_SUB_GRADES,
            Grade::Composite(composite) => composite.sub_grades(),
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Grade::Mark(_))
    }

    pub fn as_mark(&self) -> Option<&Mark> {
        match self {
            Grade::Mark(mark) => Some(mark),
            Grade::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Grade::Mark(_) => None,
            Grade::Composite(composite) => Some(composite),
        }
    }

    /// Normalized weights of the immediate children; empty for a mark
    pub fn normalized_weights(&self) -> BTreeMap<&Criterion, f64> {
        self.as_composite()
            .map(Composite::normalized_weights)
            .unwrap_or_default()
    }

    /// Number of edges on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            Grade::Mark(_) => 0,
            Grade::Composite(composite) => {
                1 + composite
                    .sub_grades()
                    .values()
                    .map(|w| w.grade.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// The sub-grade at `path`, if any
    pub fn get(&self, path: &GradePath) -> Option<&Grade> {
        path.segments()
            .iter()
            .try_fold(self, |grade, segment| {
                grade.sub_grades().get(segment).map(WeightedGrade::grade)
            })
    }

    /// The shape of this grade: every reachable path
    pub fn to_structure(&self) -> GradeStructure {
        let mut leaves = Vec::new();
        self.collect_leaf_paths(GradePath::root(), &mut leaves);
        GradeStructure::given(leaves)
    }

    fn collect_leaf_paths(&self, path: GradePath, out: &mut Vec<GradePath>) {
        match self {
            Grade::Mark(_) => out.push(path),
            Grade::Composite(composite) => {
                for (criterion, weighted) in composite.sub_grades() {
                    weighted
                        .grade
                        .collect_leaf_paths(path.with_suffix(criterion.clone()), out);
                }
            }
        }
    }

    /// The sub-grade at `path` with the product of the normalized weights
    /// along the way from the root.
    fn locate(&self, path: &GradePath) -> Result<(&Grade, CumulativeWeight)> {
        let mut grade = self;
        let mut weight = CumulativeWeight::ONE;
        for segment in path.segments() {
            let composite = grade
                .as_composite()
                .ok_or_else(|| GradeError::unknown_path(path))?;
            let (Some(child), Some(local)) = (
                composite.sub_grades().get(segment),
                composite.normalized_weight(segment),
            ) else {
                return Err(GradeError::unknown_path(path));
            };
            grade = &child.grade;
            weight = weight.scaled(local);
        }
        Ok((grade, weight))
    }

    /// The mark at leaf `path` with its cumulative weight.
    ///
    /// Fails with `UnknownPath` when `path` does not lead to a mark.
    pub fn weighted_leaf(&self, path: &GradePath) -> Result<WeightedMark> {
        match self.locate(path)? {
            (Grade::Mark(mark), weight) => Ok(WeightedMark::new(mark.clone(), weight)),
            (Grade::Composite(_), _) => Err(GradeError::unknown_path(path)),
        }
    }

    /// Every leaf at or below `path`, in path order, with cumulative weights
    /// from the root of this grade.
    pub fn weighted_leaves_below(&self, path: &GradePath) -> Result<Vec<(GradePath, WeightedMark)>> {
        let (grade, weight) = self.locate(path)?;
        let mut out = Vec::new();
        grade.collect_weighted_leaves(path.clone(), weight, &mut out);
        Ok(out)
    }

    /// Every leaf of this grade, in path order
    pub fn weighted_leaves(&self) -> Vec<(GradePath, WeightedMark)> {
        let mut out = Vec::new();
        self.collect_weighted_leaves(GradePath::root(), CumulativeWeight::ONE, &mut out);
        out
    }

    fn collect_weighted_leaves(
        &self,
        path: GradePath,
        weight: CumulativeWeight,
        out: &mut Vec<(GradePath, WeightedMark)>,
    ) {
        match self {
            Grade::Mark(mark) => out.push((path, WeightedMark::new(mark.clone(), weight))),
            Grade::Composite(composite) => {
                for (criterion, local) in composite.normalized_weights() {
                    composite.sub_grades[criterion].grade.collect_weighted_leaves(
                        path.with_suffix(criterion.clone()),
                        weight.scaled(local),
                        out,
                    );
                }
            }
        }
    }

    /// Flatten to a single mark, see [`crate::compress::to_mark`]
    pub fn to_mark(&self) -> Result<Mark> {
        crate::compress::to_mark(self)
    }
}
