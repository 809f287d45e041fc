//! # TDA-Witness-Homology
//!
//! Persistent Homology of Point Clouds via Landmark Witness Complexes
//!
//! ## Theoretical Framework
//!
//! A Vietoris-Rips complex on N points grows like N^(k+1) in dimension k,
//! which rules it out for large samples. The witness complex replaces the
//! vertex set by a small set of landmarks L ⊂ X and lets the remaining
//! points act as *witnesses*: a simplex σ ⊆ L enters the complex once some
//! witness sees the vertices of σ as (approximately) its nearest landmarks.
//!
//! ### Pipeline
//!
//! 1. **Landmark selection**: greedy maxmin (farthest-point) sampling, or
//!    seeded random sampling
//!
//! 2. **Witness filtration**: strict (weak-witness) or lazy (flag) rule,
//!    values snapped to a uniform grid over [0, ratio × cover radius]
//!
//! 3. **Boundary reduction**: standard column algorithm over ℚ or ℤ/pℤ,
//!    yielding birth-death intervals per homological dimension
//!
//! ## References
//!
//! - de Silva & Carlsson, "Topological estimation using witness complexes",
//!   SPBG (2004)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Zomorodian & Carlsson, "Computing Persistent Homology", DCG 33 (2005)

pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod topology;
pub mod persistence;
pub mod io;
pub mod pipeline;

pub use error::{Result, TdaError};

// Re-exports from geometry
pub use geometry::{
    PointCloud,
    DistanceMetric,
    Euclidean,
    Manhattan,
    Chebyshev,
    Metric,
};

// Re-exports from landmarks
pub use landmarks::{
    LandmarkSelector,
    LandmarkSet,
    LandmarkStrategy,
    MaxMinSelector,
    RandomSelector,
};

// Re-exports from topology
pub use topology::{
    Simplex,
    FilteredSimplex,
    Filtration,
    WitnessFiltrationBuilder,
    WitnessMode,
    build_witness_filtration,
};

// Re-exports from persistence
pub use persistence::{
    CoefficientField,
    PersistenceEngine,
    PersistencePairs,
    BarcodeCollection,
    Interval,
    BettiNumbers,
    BettiCurve,
};

// Re-exports from io
pub use io::{read_point_cloud, parse_point_cloud, write_barcodes, BarcodeFormat};

// Re-exports from pipeline
pub use pipeline::{PipelineConfig, PipelineOutput, WitnessPipeline, compute_barcodes};
