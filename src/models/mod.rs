//! Domain models for the catalog service.

mod file;

pub use file::*;
