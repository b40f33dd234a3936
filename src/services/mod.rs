//! Service layer for the catalog.
//!
//! - Upload (content directory storage, filename sanitizing, classification)
//! - Catalog (record lifecycle over the `files` table)

mod catalog;
pub mod upload;

pub use catalog::CatalogService;
pub use upload::{StoredUpload, UploadService};
