//! I/O Module: Reading Point Clouds and Writing Barcodes

mod loader;
mod reporter;

pub use loader::{parse_point_cloud, read_point_cloud};
pub use reporter::{write_barcodes, BarcodeFormat};
