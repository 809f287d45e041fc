//! Barcode reporter
//!
//! Three text formats:
//! - `javaplex`: `Dimension: k` headers followed by `[birth, death)` lines,
//!   the layout read by the persistence plotting script
//! - `simple`: one `dim birth death` line per interval
//! - `json`: intervals plus per-dimension summaries

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, TdaError};
use crate::persistence::{BarcodeCollection, Interval};

/// Output format of a barcode report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    #[default]
    Javaplex,
    Simple,
    Json,
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BarcodeFormat::Javaplex => "javaplex",
            BarcodeFormat::Simple => "simple",
            BarcodeFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for BarcodeFormat {
    type Err = TdaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "javaplex" | "java" => Ok(BarcodeFormat::Javaplex),
            "simple" => Ok(BarcodeFormat::Simple),
            "json" => Ok(BarcodeFormat::Json),
            other => Err(TdaError::invalid(
                "format",
                format!("unknown format `{other}` (expected javaplex, simple or json)"),
            )),
        }
    }
}

#[derive(Serialize)]
struct DimensionSummary {
    dimension: usize,
    intervals: usize,
    essential: usize,
    total_persistence: f64,
    persistence_entropy: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    dimensions: Vec<DimensionSummary>,
    intervals: &'a [Interval],
}

impl BarcodeFormat {
    /// Render `barcodes` as text in this format
    pub fn render(&self, barcodes: &BarcodeCollection) -> Result<String> {
        match self {
            BarcodeFormat::Javaplex => Ok(render_javaplex(barcodes)),
            BarcodeFormat::Simple => Ok(render_simple(barcodes)),
            BarcodeFormat::Json => render_json(barcodes),
        }
    }
}

fn render_javaplex(barcodes: &BarcodeCollection) -> String {
    let mut out = String::new();
    for d in barcodes.dimensions() {
        let _ = writeln!(out, "Dimension: {d}");
        for interval in barcodes.dim(d) {
            let _ = writeln!(out, "[{:?}, {})", interval.birth, javaplex_death(interval.death));
        }
    }
    out
}

fn javaplex_death(death: f64) -> String {
    if death.is_infinite() {
        "infinity".to_string()
    } else {
        format!("{death:?}")
    }
}

fn render_simple(barcodes: &BarcodeCollection) -> String {
    let mut out = String::new();
    for interval in barcodes.iter() {
        if interval.is_essential() {
            let _ = writeln!(out, "{} {:?} inf", interval.dimension, interval.birth);
        } else {
            let _ = writeln!(out, "{} {:?} {:?}", interval.dimension, interval.birth, interval.death);
        }
    }
    out
}

fn render_json(barcodes: &BarcodeCollection) -> Result<String> {
    let dimensions = barcodes
        .dimensions()
        .into_iter()
        .map(|d| DimensionSummary {
            dimension: d,
            intervals: barcodes.dim(d).len(),
            essential: barcodes.essential(d).len(),
            total_persistence: barcodes.total_persistence(d),
            persistence_entropy: barcodes.persistence_entropy(d),
        })
        .collect();
    let report = JsonReport {
        dimensions,
        intervals: barcodes.intervals(),
    };
    let mut text = serde_json::to_string_pretty(&report)?;
    text.push('\n');
    Ok(text)
}

/// Render `barcodes` and write them to `path`, replacing any existing file
pub fn write_barcodes(
    path: impl AsRef<Path>,
    barcodes: &BarcodeCollection,
    format: BarcodeFormat,
) -> Result<()> {
    let path = path.as_ref();
    let text = format.render(barcodes)?;
    fs::write(path, text).map_err(|source| TdaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), %format, intervals = barcodes.len(), "barcodes written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BarcodeCollection {
        BarcodeCollection::new(vec![
            Interval::new(0, 0.0, f64::INFINITY),
            Interval::new(0, 0.0, 0.5),
            Interval::new(1, 0.25, 0.75),
        ])
    }

    #[test]
    fn test_javaplex_layout() {
        let text = BarcodeFormat::Javaplex.render(&sample()).unwrap();
        assert_eq!(
            text,
            "Dimension: 0\n[0.0, 0.5)\n[0.0, infinity)\nDimension: 1\n[0.25, 0.75)\n"
        );
    }

    #[test]
    fn test_simple_layout() {
        let text = BarcodeFormat::Simple.render(&sample()).unwrap();
        assert_eq!(text, "0 0.0 0.5\n0 0.0 inf\n1 0.25 0.75\n");
    }

    #[test]
    fn test_json_has_summaries_and_null_death() {
        let text = BarcodeFormat::Json.render(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["dimensions"][0]["essential"], 1);
        assert_eq!(value["dimensions"][1]["intervals"], 1);
        assert!(value["intervals"][1]["death"].is_null());
    }

    #[test]
    fn test_empty_barcode_renders_empty() {
        let empty = BarcodeCollection::default();
        assert_eq!(BarcodeFormat::Javaplex.render(&empty).unwrap(), "");
        assert_eq!(BarcodeFormat::Simple.render(&empty).unwrap(), "");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::Json);
        assert_eq!("java".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::Javaplex);
        assert_eq!("csv".parse::<BarcodeFormat>().unwrap_err().kind(), "InvalidParameter");
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let err = write_barcodes("/definitely/not/here/out.txt", &sample(), BarcodeFormat::Simple)
            .unwrap_err();
        assert_eq!(err.kind(), "Io");
    }
}
