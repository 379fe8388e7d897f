//! Serialized form of grades
//!
//! Marks are `{"points": 0.5, "comment": "..."}` and composites are
//! `{"sub_grades": {"name": {"grade": ..., "weight": 1.0}}}`. Deserializing
//! goes through the regular constructors, so invalid input is rejected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Composite, Grade, Mark, WeightedGrade};
use crate::criterion::Criterion;
use crate::error::GradeError;

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum GradeRepr {
    Composite {
        sub_grades: BTreeMap<Criterion, WeightedGradeRepr>,
    },
    Mark {
        points: f64,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        comment: String,
    },
}

#[derive(Serialize, Deserialize)]
pub(crate) struct WeightedGradeRepr {
    grade: Grade,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl TryFrom<GradeRepr> for Grade {
    type Error = GradeError;

    fn try_from(repr: GradeRepr) -> Result<Self, Self::Error> {
        match repr {
            GradeRepr::Mark { points, comment } => Mark::new(points, comment).map(Grade::Mark),
            GradeRepr::Composite { sub_grades } => Composite::new(
                sub_grades
                    .into_iter()
                    .map(|(c, w)| (c, WeightedGrade::new(w.grade, w.weight))),
            )
            .map(Grade::Composite),
        }
    }
}

impl From<Grade> for GradeRepr {
    fn from(grade: Grade) -> Self {
        match grade {
            Grade::Mark(mark) => GradeRepr::Mark {
                points: mark.points,
                comment: mark.comment,
            },
            Grade::Composite(composite) => GradeRepr::Composite {
                sub_grades: composite
                    .sub_grades
                    .into_iter()
                    .map(|(c, w)| {
                        (
                            c,
                            WeightedGradeRepr {
                                grade: w.grade,
                                weight: w.weight,
                            },
                        )
                    })
                    .collect(),
            },
        }
    }
}
