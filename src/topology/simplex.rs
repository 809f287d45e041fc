//! Simplices over landmark vertices
//!
//! A k-simplex is identified by its sorted set of k+1 landmark positions.
//! Its boundary is the alternating sum of its codimension-1 faces:
//!
//!   ∂[v₀, …, vₖ] = Σᵢ (-1)ⁱ [v₀, …, v̂ᵢ, …, vₖ]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdaError};

/// A simplex as a sorted, duplicate-free list of vertex indices
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Simplex {
    vertices: Vec<usize>,
}

impl Simplex {
    /// Create a simplex from vertices in any order
    pub fn new(mut vertices: Vec<usize>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(TdaError::invalid("vertices", "a simplex needs at least one vertex"));
        }
        vertices.sort_unstable();
        if vertices.windows(2).any(|w| w[0] == w[1]) {
            return Err(TdaError::invalid(
                "vertices",
                format!("repeated vertex in {vertices:?}"),
            ));
        }
        Ok(Self { vertices })
    }

    /// Wrap vertices that are already strictly increasing
    pub(crate) fn from_sorted(vertices: Vec<usize>) -> Self {
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]));
        Self { vertices }
    }

    /// The 0-simplex on vertex `v`
    pub fn vertex(v: usize) -> Self {
        Self { vertices: vec![v] }
    }

    /// Sorted vertex list
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Dimension: number of vertices minus one
    pub fn dimension(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Codimension-1 faces with their boundary signs
    ///
    /// The i-th face omits the i-th vertex and carries sign (-1)ⁱ.
    /// A vertex has no faces.
    pub fn boundary(&self) -> impl Iterator<Item = (i64, Simplex)> + '_ {
        let k = if self.vertices.len() > 1 { self.vertices.len() } else { 0 };
        (0..k).map(move |i| {
            let mut face = self.vertices.clone();
            face.remove(i);
            let sign = if i % 2 == 0 { 1 } else { -1 };
            (sign, Simplex { vertices: face })
        })
    }

    /// Codimension-1 faces without signs
    pub fn faces(&self) -> impl Iterator<Item = Simplex> + '_ {
        self.boundary().map(|(_, face)| face)
    }

    pub fn contains(&self, v: usize) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_rejects_duplicates() {
        let s = Simplex::new(vec![3, 1, 2]).unwrap();
        assert_eq!(s.vertices(), &[1, 2, 3]);
        assert_eq!(s.dimension(), 2);
        assert!(Simplex::new(vec![1, 1]).is_err());
        assert!(Simplex::new(vec![]).is_err());
    }

    #[test]
    fn test_triangle_boundary_signs() {
        let s = Simplex::new(vec![0, 1, 2]).unwrap();
        let boundary: Vec<(i64, Vec<usize>)> = s
            .boundary()
            .map(|(sign, face)| (sign, face.vertices().to_vec()))
            .collect();
        assert_eq!(
            boundary,
            vec![(1, vec![1, 2]), (-1, vec![0, 2]), (1, vec![0, 1])]
        );
    }

    #[test]
    fn test_vertex_has_no_faces() {
        assert_eq!(Simplex::vertex(4).faces().count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Simplex::new(vec![2, 0]).unwrap().to_string(), "[0,2]");
    }
}
