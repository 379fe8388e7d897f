//! Gradeshape Core Library
//!
//! Weighted grade trees addressed by paths of criteria, the structures that
//! describe their shape, and compression of detailed grades into coarser
//! report shapes.

pub mod compress;
pub mod config;
pub mod criterion;
pub mod error;
pub mod format;
pub mod grade;
pub mod logging;
pub mod records;
pub mod structure;

pub use compress::{compress, to_mark, Compressor};
pub use criterion::{Criterion, GradePath};
pub use error::{GradeError, Result};
pub use grade::{Composite, CumulativeWeight, Grade, Mark, WeightedGrade, WeightedMark};
pub use structure::{GradeStructure, PathGraph};
