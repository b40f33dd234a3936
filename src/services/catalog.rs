//! Catalog service for record lifecycle.
//!
//! Creates records from validated uploads, lists them, edits descriptions and
//! deletes records together with their backing files.

use chrono::Local;
use tracing::{debug, info};

use crate::db::{self, DbPool};
use crate::error::Result;
use crate::models::{FileKind, FileRecord, NewUpload, UploadPayload};

use super::UploadService;

/// Date format stored in the `date` column.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Service for managing catalogue records.
#[derive(Clone)]
pub struct CatalogService {
    db: DbPool,
    uploads: UploadService,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(db: DbPool, uploads: UploadService) -> Self {
        Self { db, uploads }
    }

    pub fn uploads(&self) -> &UploadService {
        &self.uploads
    }

    /// List all records, newest first.
    pub async fn list(&self) -> Result<Vec<FileRecord>> {
        db::list_files(&self.db).await
    }

    /// Create a record from a link or an uploaded file.
    ///
    /// File payloads are written to the content directory before the row is
    /// inserted. The two steps are not atomic: if the insert fails the blob
    /// stays behind without a record.
    pub async fn create(&self, upload: NewUpload) -> Result<FileRecord> {
        let (kind, content, filename) = match upload.payload {
            UploadPayload::Link { url } => (FileKind::Link, url, String::new()),
            UploadPayload::File { filename, data } => {
                let stored = self.uploads.store(&filename, &data).await?;
                (stored.kind, stored.content, stored.original_filename)
            }
        };

        let record = db::create_file(
            &self.db,
            db::CreateFile {
                title: upload.title,
                description: upload.description,
                kind,
                content,
                filename,
                date: Local::now().format(DATE_FORMAT).to_string(),
            },
        )
        .await?;

        info!(id = record.id, kind = %record.kind, "Created record");

        Ok(record)
    }

    /// Overwrite a record's description.
    ///
    /// An unknown id is not an error; nothing is updated.
    pub async fn update_description(&self, id: i64, description: &str) -> Result<()> {
        let touched = db::update_file_description(&self.db, id, description).await?;
        if touched == 0 {
            debug!(id, "Description update matched no record");
        } else {
            info!(id, "Updated description");
        }
        Ok(())
    }

    /// Delete a record, removing its backing file first when it has one.
    ///
    /// Returns [`crate::Error::NotFound`] if the id is unknown. Failing to
    /// remove the file does not stop the row from being deleted.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let record = db::get_file(&self.db, id).await?;

        if !record.kind.is_link() {
            self.uploads.remove(&record.content).await;
        }

        db::delete_file(&self.db, id).await?;
        info!(id, kind = %record.kind, "Deleted record");

        Ok(())
    }
}
