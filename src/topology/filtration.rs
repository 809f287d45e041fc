//! Filtration: Simplices Ordered by Entry Scale
//!
//! A filtration is stored as a flat arena sorted by
//!
//!   (filtration value, dimension, lexicographic vertices)
//!
//! The arena position is the identity of a simplex for the rest of the
//! pipeline: faces are referenced by their integer position, never by
//! pointer, so the boundary matrix can be read straight off the arena.
//!
//! ## Invariants
//!
//! - Every face of a simplex is present (closure)
//! - Every face enters no later than the simplex (monotonicity)
//!
//! Closure is enforced on construction. Monotonicity is checked separately by
//! [`Filtration::validate`], which the persistence engine calls on entry.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TdaError};
use super::Simplex;

/// A simplex with the scale at which it enters the complex
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSimplex {
    pub simplex: Simplex,
    pub value: f64,
}

impl FilteredSimplex {
    pub fn dimension(&self) -> usize {
        self.simplex.dimension()
    }
}

/// Sorted, indexed arena of filtered simplices
#[derive(Debug, Clone)]
pub struct Filtration {
    entries: Vec<FilteredSimplex>,
    index: HashMap<Simplex, usize>,
    /// `faces[j][i]` is the arena position of the face omitting vertex i
    faces: Vec<Vec<usize>>,
}

impl Filtration {
    /// Build a filtration from simplices and their values
    ///
    /// Fails with `MalformedFiltration` on negative or non-finite values,
    /// repeated simplices, or missing faces.
    pub fn from_simplices<I>(simplices: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Simplex, f64)>,
    {
        let mut entries: Vec<FilteredSimplex> = simplices
            .into_iter()
            .map(|(simplex, value)| FilteredSimplex { simplex, value })
            .collect();

        if let Some(bad) = entries.iter().find(|e| !e.value.is_finite() || e.value < 0.0) {
            return Err(TdaError::MalformedFiltration(format!(
                "simplex {} has invalid filtration value {}",
                bad.simplex, bad.value
            )));
        }

        entries.sort_by(|a, b| {
            a.value
                .total_cmp(&b.value)
                .then(a.dimension().cmp(&b.dimension()))
                .then_with(|| a.simplex.cmp(&b.simplex))
        });

        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.simplex.clone(), pos).is_some() {
                return Err(TdaError::MalformedFiltration(format!(
                    "simplex {} appears more than once",
                    entry.simplex
                )));
            }
        }

        let mut faces = Vec::with_capacity(entries.len());
        for entry in &entries {
            let mut positions = Vec::with_capacity(entry.dimension() + 1);
            for face in entry.simplex.faces() {
                match index.get(&face) {
                    Some(&pos) => positions.push(pos),
                    None => {
                        return Err(TdaError::MalformedFiltration(format!(
                            "face {face} of simplex {} is missing",
                            entry.simplex
                        )))
                    }
                }
            }
            faces.push(positions);
        }

        Ok(Self { entries, index, faces })
    }

    /// Check that every face enters no later than its cofaces
    pub fn validate(&self) -> Result<()> {
        for (pos, entry) in self.entries.iter().enumerate() {
            for &face in &self.faces[pos] {
                let face_entry = &self.entries[face];
                if face_entry.value > entry.value {
                    return Err(TdaError::MalformedFiltration(format!(
                        "face {} enters at {} after its coface {} at {}",
                        face_entry.simplex, face_entry.value, entry.simplex, entry.value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Number of simplices
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at arena position `pos`
    pub fn get(&self, pos: usize) -> Option<&FilteredSimplex> {
        self.entries.get(pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilteredSimplex> {
        self.entries.iter()
    }

    /// Filtration value at arena position `pos`
    ///
    /// # Panics
    /// Panics if `pos >= self.len()`.
    pub fn value(&self, pos: usize) -> f64 {
        self.entries[pos].value
    }

    /// Dimension of the simplex at arena position `pos`
    ///
    /// # Panics
    /// Panics if `pos >= self.len()`.
    pub fn dimension(&self, pos: usize) -> usize {
        self.entries[pos].dimension()
    }

    /// Arena positions of the codimension-1 faces of `pos`, in boundary order
    ///
    /// # Panics
    /// Panics if `pos >= self.len()`.
    pub fn face_positions(&self, pos: usize) -> &[usize] {
        &self.faces[pos]
    }

    /// Arena position of `simplex`, if present
    pub fn position_of(&self, simplex: &Simplex) -> Option<usize> {
        self.index.get(simplex).copied()
    }

    /// Filtration value of `simplex`, if present
    pub fn value_of(&self, simplex: &Simplex) -> Option<f64> {
        self.position_of(simplex).map(|pos| self.entries[pos].value)
    }

    /// Highest simplex dimension present (0 for an empty filtration)
    pub fn max_dimension(&self) -> usize {
        self.entries.iter().map(FilteredSimplex::dimension).max().unwrap_or(0)
    }

    /// Number of simplices in each dimension, indexed by dimension
    pub fn count_by_dimension(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_dimension() + 1];
        for entry in &self.entries {
            counts[entry.dimension()] += 1;
        }
        counts
    }

    /// Sorted distinct filtration values
    pub fn distinct_values(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.entries.iter().map(|e| e.value).collect();
        values.dedup();
        values
    }

    /// Largest filtration value (0 for an empty filtration)
    pub fn max_value(&self) -> f64 {
        self.entries.last().map(|e| e.value).unwrap_or(0.0)
    }

    /// Connected components of the complex at scale `scale`
    pub fn component_count_at(&self, scale: f64) -> usize {
        let vertices: Vec<usize> = self
            .entries
            .iter()
            .filter(|e| e.dimension() == 0 && e.value <= scale)
            .map(|e| e.simplex.vertices()[0])
            .collect();
        if vertices.is_empty() {
            return 0;
        }

        let slot: HashMap<usize, usize> =
            vertices.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let n = vertices.len();
        let mut parent: Vec<usize> = (0..n).collect();
        let mut rank = vec![0usize; n];

        fn find(parent: &mut [usize], i: usize) -> usize {
            if parent[i] != i {
                parent[i] = find(parent, parent[i]);
            }
            parent[i]
        }

        fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
            let rx = find(parent, x);
            let ry = find(parent, y);
            if rx != ry {
                if rank[rx] < rank[ry] {
                    parent[rx] = ry;
                } else if rank[rx] > rank[ry] {
                    parent[ry] = rx;
                } else {
                    parent[ry] = rx;
                    rank[rx] += 1;
                }
            }
        }

        for entry in self.entries.iter().filter(|e| e.dimension() == 1 && e.value <= scale) {
            let v = entry.simplex.vertices();
            // an edge can precede its vertices in an unvalidated filtration
            if let (Some(&a), Some(&b)) = (slot.get(&v[0]), slot.get(&v[1])) {
                union(&mut parent, &mut rank, a, b);
            }
        }

        let mut roots = HashSet::new();
        for i in 0..n {
            roots.insert(find(&mut parent, i));
        }
        roots.len()
    }

    /// Connected components of the full complex
    pub fn component_count(&self) -> usize {
        self.component_count_at(f64::INFINITY)
    }
}
