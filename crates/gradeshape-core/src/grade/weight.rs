//! Cumulative weights that keep their ratios under zero-weight ancestors
//!
//! A cumulative weight is the product of the normalized weights from the
//! root down to a node. Multiplying by a zero weight would erase every
//! ratio below that node, so zero factors are counted instead of applied:
//! the weight stands for `factor * 0^zeros`. Sums keep only the terms with
//! the fewest zero factors, which is exactly what survives in the real
//! product, while the ratios between those terms stay available.

use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeWeight {
    zeros: u32,
    factor: f64,
}

impl CumulativeWeight {
    /// The weight of the root
    pub const ONE: CumulativeWeight = CumulativeWeight {
        zeros: 0,
        factor: 1.0,
    };

    /// A weight with no zero factors, or one zero factor when `weight` is 0
    pub fn new(weight: f64) -> Self {
        Self::ONE.scaled(weight)
    }

    /// This weight times one more normalized weight
    pub fn scaled(self, normalized: f64) -> Self {
        if normalized == 0.0 {
            CumulativeWeight {
                zeros: self.zeros + 1,
                factor: self.factor,
            }
        } else {
            CumulativeWeight {
                zeros: self.zeros,
                factor: self.factor * normalized,
            }
        }
    }

    /// The real weight: the factor, or 0 once any zero factor was applied
    pub fn value(&self) -> f64 {
        if self.zeros == 0 {
            self.factor
        } else {
            0.0
        }
    }

    /// Number of zero factors
    pub fn zeros(&self) -> u32 {
        self.zeros
    }

    /// The factor of this weight, if it belongs to the dominant terms of
    /// `total`; 0 otherwise. Siblings measured this way keep the ratios of
    /// their masses even when the real masses are all zero.
    pub fn relative_to(&self, total: &CumulativeWeight) -> f64 {
        if self.zeros == total.zeros {
            self.factor
        } else {
            0.0
        }
    }
}

impl Add for CumulativeWeight {
    type Output = CumulativeWeight;

    fn add(self, other: CumulativeWeight) -> CumulativeWeight {
        match self.zeros.cmp(&other.zeros) {
            std::cmp::Ordering::Less => self,
            std::cmp::Ordering::Greater => other,
            std::cmp::Ordering::Equal => CumulativeWeight {
                zeros: self.zeros,
                factor: self.factor + other.factor,
            },
        }
    }
}

impl Sum for CumulativeWeight {
    /// The empty sum has no dominant term; it is a zero with no ratios.
    fn sum<I: Iterator<Item = CumulativeWeight>>(iter: I) -> CumulativeWeight {
        iter.reduce(Add::add).unwrap_or(CumulativeWeight {
            zeros: u32::MAX,
            factor: 0.0,
        })
    }
}
