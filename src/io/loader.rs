//! Point-cloud loader for delimited text files
//!
//! One point per line; coordinates separated by whitespace, commas,
//! semicolons or tabs. Blank lines and lines starting with `#` or `%` are
//! skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, TdaError};
use crate::geometry::PointCloud;

/// Read a point cloud from `path`
pub fn read_point_cloud(path: impl AsRef<Path>) -> Result<PointCloud> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| TdaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cloud = parse_point_cloud(&text)?;
    debug!(
        path = %path.display(),
        points = cloud.len(),
        dimension = cloud.dimension(),
        "point cloud loaded"
    );
    Ok(cloud)
}

/// Parse a point cloud from delimited text
pub fn parse_point_cloud(text: &str) -> Result<PointCloud> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut dim: Option<usize> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }

        let row = trimmed
            .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
            .filter(|token| !token.is_empty())
            .map(|token| parse_coordinate(token, line_no))
            .collect::<Result<Vec<f64>>>()?;

        match dim {
            None => dim = Some(row.len()),
            Some(d) if d != row.len() => {
                return Err(TdaError::malformed_at(
                    line_no,
                    format!("expected {d} coordinates, found {}", row.len()),
                ));
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TdaError::EmptyInput("no points found in input".into()));
    }
    PointCloud::from_rows(&rows)
}

fn parse_coordinate(token: &str, line_no: usize) -> Result<f64> {
    let value: f64 = token
        .parse()
        .map_err(|_| TdaError::malformed_at(line_no, format!("`{token}` is not a number")))?;
    if !value.is_finite() {
        return Err(TdaError::malformed_at(line_no, format!("`{token}` is not finite")));
    }
    Ok(value)
}
