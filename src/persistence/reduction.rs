//! Boundary Matrix Reduction over an Arbitrary Field
//!
//! Standard column algorithm: columns are processed left to right in
//! filtration order, and each column is reduced against earlier columns
//! until its pivot (largest nonzero row) is unique or it vanishes.
//!
//!   col_j ← col_j − (a_j / a_k) · col_k
//!
//! where a_j, a_k are the pivot coefficients of the two columns.
//!
//! ## Reading off the Barcode
//!
//! - Reduced column j with pivot i: the class born by simplex i dies when
//!   simplex j enters, giving [value(i), value(j)) in dimension dim(i)
//! - Zero column j whose row is never a pivot: an essential class born at
//!   value(j)
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.
//! Zomorodian & Carlsson (2005). "Computing Persistent Homology".

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::topology::Filtration;
use super::field::{CoefficientField, Field, PrimeField, RationalField};
use super::barcode::{BarcodeCollection, Interval};

/// Sparse column: (row, coefficient) sorted by row, no zero coefficients
type SparseColumn<E> = Vec<(usize, E)>;

/// Index-level pairing of a filtration
///
/// `death` is `None` for essential classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistencePair {
    pub birth: usize,
    pub death: Option<usize>,
}

/// All pairs of a reduction, sorted by birth index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistencePairs {
    pairs: Vec<PersistencePair>,
}

impl PersistencePairs {
    pub fn pairs(&self) -> &[PersistencePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter()
    }

    /// Pairs whose class never dies
    pub fn essential(&self) -> impl Iterator<Item = &PersistencePair> {
        self.pairs.iter().filter(|p| p.death.is_none())
    }
}

/// Computes barcodes of a filtration over a coefficient field
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceEngine {
    keep_zero_length: bool,
}

impl PersistenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain intervals with birth == death (dropped by default)
    pub fn keep_zero_length(mut self, keep: bool) -> Self {
        self.keep_zero_length = keep;
        self
    }

    /// Barcode of `filtration` over `field`
    ///
    /// The field is validated first (`InvalidParameter` for a non-prime
    /// modulus), then the filtration (`MalformedFiltration`).
    pub fn compute_intervals(
        &self,
        filtration: &Filtration,
        field: CoefficientField,
    ) -> Result<BarcodeCollection> {
        let pairs = self.pairs(filtration, field)?;

        let intervals: Vec<Interval> = pairs
            .iter()
            .map(|pair| Interval {
                dimension: filtration.dimension(pair.birth),
                birth: filtration.value(pair.birth),
                death: pair.death.map_or(f64::INFINITY, |d| filtration.value(d)),
            })
            .filter(|interval| self.keep_zero_length || interval.persistence() > 0.0)
            .collect();

        let barcodes = BarcodeCollection::new(intervals);
        info!(
            field = field.characteristic(),
            intervals = barcodes.len(),
            "persistence computed"
        );
        Ok(barcodes)
    }

    /// Index-level pairs of `filtration` over `field`
    pub fn pairs(&self, filtration: &Filtration, field: CoefficientField) -> Result<PersistencePairs> {
        field.validate()?;
        filtration.validate()?;

        let pivots = match field {
            CoefficientField::Rational => reduce(filtration, &RationalField),
            CoefficientField::FiniteField(p) => reduce(filtration, &PrimeField::new(p)?),
        };

        let m = filtration.len();
        let mut is_birth_of_pair = vec![false; m];
        for &pivot in pivots.iter().flatten() {
            is_birth_of_pair[pivot] = true;
        }

        let mut pairs = Vec::with_capacity(m);
        for (j, pivot) in pivots.iter().enumerate() {
            match pivot {
                Some(i) => pairs.push(PersistencePair { birth: *i, death: Some(j) }),
                None if !is_birth_of_pair[j] => pairs.push(PersistencePair { birth: j, death: None }),
                None => {}
            }
        }
        pairs.sort_by_key(|p| p.birth);

        debug!(
            simplices = m,
            pairs = pairs.len(),
            essential = pairs.iter().filter(|p| p.death.is_none()).count(),
            "boundary matrix reduced"
        );
        Ok(PersistencePairs { pairs })
    }
}

/// Reduce the boundary matrix; returns the pivot row of each column
fn reduce<F: Field>(filtration: &Filtration, field: &F) -> Vec<Option<usize>> {
    let m = filtration.len();
    let mut columns: Vec<SparseColumn<F::Element>> = Vec::with_capacity(m);
    let mut pivots: Vec<Option<usize>> = Vec::with_capacity(m);
    // column owning each pivot row
    let mut owner: Vec<Option<usize>> = vec![None; m];

    for j in 0..m {
        let mut column = boundary_column(filtration, j, field);

        while let Some((low, coeff)) = column.last() {
            let Some(k) = owner[*low] else { break };
            let Some((_, pivot_coeff)) = columns[k].last() else { break };
            let scale = field.neg(&field.mul(coeff, &field.inv(pivot_coeff)));
            column = add_scaled(field, &column, &columns[k], &scale);
        }

        let pivot = column.last().map(|(row, _)| *row);
        if let Some(row) = pivot {
            owner[row] = Some(j);
        }
        pivots.push(pivot);
        columns.push(column);
    }

    pivots
}

fn boundary_column<F: Field>(filtration: &Filtration, pos: usize, field: &F) -> SparseColumn<F::Element> {
    let mut column: SparseColumn<F::Element> = filtration
        .face_positions(pos)
        .iter()
        .enumerate()
        .map(|(i, &row)| (row, field.from_i64(if i % 2 == 0 { 1 } else { -1 })))
        .filter(|(_, c)| !field.is_zero(c))
        .collect();
    column.sort_by_key(|(row, _)| *row);
    column
}

/// `target + scale · source`, merged by row with zeros dropped
fn add_scaled<F: Field>(
    field: &F,
    target: &[(usize, F::Element)],
    source: &[(usize, F::Element)],
    scale: &F::Element,
) -> SparseColumn<F::Element> {
    let mut out = Vec::with_capacity(target.len() + source.len());
    let (mut a, mut b) = (0, 0);

    while a < target.len() || b < source.len() {
        let next_a = target.get(a).map(|(r, _)| *r);
        let next_b = source.get(b).map(|(r, _)| *r);
        match (next_a, next_b) {
            (Some(ra), Some(rb)) if ra == rb => {
                let value = field.add(&target[a].1, &field.mul(scale, &source[b].1));
                if !field.is_zero(&value) {
                    out.push((ra, value));
                }
                a += 1;
                b += 1;
            }
            (Some(ra), Some(rb)) if ra < rb => {
                out.push(target[a].clone());
                a += 1;
            }
            (Some(_), None) => {
                out.push(target[a].clone());
                a += 1;
            }
            (_, Some(rb)) => {
                let value = field.mul(scale, &source[b].1);
                if !field.is_zero(&value) {
                    out.push((rb, value));
                }
                b += 1;
            }
            (None, None) => break,
        }
    }
    out
}
