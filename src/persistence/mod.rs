//! Persistence Module: Barcodes from a Filtration
//!
//! - `field`: coefficient fields (ℚ and ℤ/pℤ)
//! - `reduction`: boundary matrix reduction and pairing
//! - `barcode`: intervals and their summary statistics
//! - `betti`: Betti numbers and curves read off a barcode

mod field;
mod reduction;
mod barcode;
mod betti;

pub use field::{is_prime, CoefficientField, Field, PrimeField, RationalField};
pub use reduction::{PersistenceEngine, PersistencePair, PersistencePairs};
pub use barcode::{BarcodeCollection, Interval};
pub use betti::{BettiCurve, BettiNumbers};
