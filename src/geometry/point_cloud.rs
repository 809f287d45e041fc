//! Point Cloud: the raw input of the pipeline
//!
//! A point cloud is a non-empty, rectangular matrix of finite reals with one
//! point per row. The row index is the identity of the point; every later
//! stage refers to points by index and borrows the cloud read-only.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Result, TdaError};

/// Immutable, validated set of points in ℝᵈ
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Array2<f64>,
}

impl PointCloud {
    /// Wrap a point matrix (rows = points, columns = coordinates)
    ///
    /// Fails with `EmptyInput` for a matrix without rows and with
    /// `MalformedInput` for zero-dimensional or non-finite coordinates.
    pub fn new(points: Array2<f64>) -> Result<Self> {
        if points.nrows() == 0 {
            return Err(TdaError::EmptyInput("point cloud has no points".into()));
        }
        if points.ncols() == 0 {
            return Err(TdaError::malformed("points have no coordinates"));
        }
        if let Some(((row, col), value)) = points.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(TdaError::malformed(format!(
                "coordinate {col} of point {row} is not finite ({value})"
            )));
        }
        Ok(Self { points })
    }

    /// Build a cloud from row vectors, rejecting ragged input
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Err(TdaError::EmptyInput("point cloud has no points".into()));
        };
        let dim = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(TdaError::malformed(format!(
                    "point {i} has {} coordinates, expected {dim}",
                    row.len()
                )));
            }
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let points = Array2::from_shape_vec((rows.len(), dim), flat)
            .map_err(|e| TdaError::malformed(e.to_string()))?;
        Self::new(points)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    /// Always false for a constructed cloud; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Ambient dimension (coordinates per point)
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    /// Row view of point `i`
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    /// View of the whole coordinate matrix
    pub fn points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    /// Select a subset of points by index, in the given order
    pub fn subset(&self, indices: &[usize]) -> Result<Self> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.len()) {
            return Err(TdaError::invalid(
                "indices",
                format!("index {bad} out of range for {} points", self.len()),
            ));
        }
        Self::new(self.points.select(ndarray::Axis(0), indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_new_rejects_empty() {
        let err = PointCloud::new(Array2::zeros((0, 3))).unwrap_err();
        assert!(matches!(err, TdaError::EmptyInput(_)));
    }

    #[test]
    fn test_new_rejects_nan() {
        let err = PointCloud::new(array![[0.0, 1.0], [f64::NAN, 2.0]]).unwrap_err();
        assert!(matches!(err, TdaError::MalformedInput { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![0.0, 1.0], vec![2.0]];
        let err = PointCloud::from_rows(&rows).unwrap_err();
        assert_eq!(err.kind(), "MalformedInput");
    }

    #[test]
    fn test_from_rows_shape() {
        let rows = vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]];
        let cloud = PointCloud::from_rows(&rows).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.dimension(), 3);
        assert_eq!(cloud.point(1)[2], 5.0);
        assert_eq!(cloud.points(), array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_subset_keeps_order() {
        let cloud = PointCloud::new(array![[0.0], [1.0], [2.0]]).unwrap();
        let sub = cloud.subset(&[2, 0]).unwrap();
        assert_eq!(sub.point(0)[0], 2.0);
        assert_eq!(sub.point(1)[0], 0.0);
        assert!(cloud.subset(&[3]).is_err());
    }
}
