//! Topology Module: Simplicial Complexes and Filtrations
//!
//! Builds the filtered witness complex on a landmark set:
//! - `Simplex`: sorted vertex sets with signed boundaries
//! - `Filtration`: simplices ordered by entry scale, faces by arena position
//! - `WitnessFiltrationBuilder`: strict and lazy witness rules on a grid
//!
//! ## Mathematical Background
//!
//! For a point cloud X with landmarks L ⊂ X, the witness complex W(X, L)
//! has vertices L, and a simplex σ ⊆ L enters once some point of X is
//! close enough to all of σ relative to its other landmarks. Indexing by
//! a scale parameter gives a nested family of complexes whose persistent
//! homology approximates that of the space X is sampled from, using far
//! fewer simplices than a Vietoris-Rips complex on all of X.

mod simplex;
mod filtration;
mod witness;

pub use simplex::Simplex;
pub use filtration::{FilteredSimplex, Filtration};
pub use witness::{
    build_witness_filtration,
    WitnessFiltrationBuilder,
    WitnessMode,
    DEFAULT_LAZY_NU,
};
