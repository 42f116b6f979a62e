//! Data management module
//!
//! Holds the tabular dataset the engine reads from and the CSV / JSON loaders
//! that build it.

pub mod dataset;
pub mod loader;

pub use dataset::*;
pub use loader::*;
