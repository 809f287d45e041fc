//! Landmarks Module: Choosing the Vertices of the Witness Complex
//!
//! Only a subset of the cloud becomes simplex vertices; the remaining
//! points act as witnesses. Two selectors are provided:
//! - `MaxMinSelector`: deterministic greedy farthest-point sampling
//! - `RandomSelector`: seeded uniform sampling without replacement

mod selector;

pub use selector::{
    LandmarkSelector,
    LandmarkSet,
    LandmarkStrategy,
    MaxMinSelector,
    RandomSelector,
};
