//! Record Routes
//!
//! Listing, upload, deletion and description edits for catalogue records.
//!
//! Routes:
//! - GET /api/files - List records, newest first
//! - POST /upload - Create a record from a link or a file (multipart)
//! - DELETE /delete/:id - Delete a record and its backing file
//! - PUT /update/:id - Replace a record's description

use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection},
        DefaultBodyLimit, Multipart, Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::{FileRecord, NewUpload, UploadPayload};
use crate::{AppState, Error, Result};

/// Build record routes. `max_upload_size` caps the upload request body.
pub fn routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        .route("/api/files", get(list_files))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/delete/:id", delete(delete_file))
        .route("/update/:id", put(update_file))
}

// ============================================================================
// Request Types
// ============================================================================

/// Multipart fields accepted by `POST /upload`.
///
/// `type = "link"` requires `url`; any other `type` (or none) requires a
/// `file` part. `title` and `description` default to empty text.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub url: Option<String>,
    pub file: Option<FilePart>,
}

/// A file part with its client-supplied filename.
#[derive(Debug)]
pub struct FilePart {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadForm {
    /// Collect the known fields from a multipart body. Unknown fields are
    /// skipped, as are `file` parts that carry no filename.
    pub async fn from_multipart(mut multipart: Multipart, max_size: usize) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, max_size))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "file" {
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?;
                form.file = Some(FilePart {
                    filename,
                    data: data.to_vec(),
                });
                continue;
            }

            let slot = match name.as_str() {
                "title" => &mut form.title,
                "description" => &mut form.description,
                "type" => &mut form.kind,
                "url" => &mut form.url,
                _ => continue,
            };
            *slot = Some(
                field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?,
            );
        }

        Ok(form)
    }

    /// Check presence of the fields the chosen mode needs.
    pub fn into_new_upload(self) -> Result<NewUpload> {
        let payload = if self.kind.as_deref() == Some("link") {
            let url = self
                .url
                .filter(|url| !url.trim().is_empty())
                .ok_or_else(|| Error::Validation("url is required for links".into()))?;
            UploadPayload::Link { url }
        } else {
            let file = self.file.ok_or(Error::MissingFile)?;
            if file.filename.is_empty() {
                return Err(Error::EmptyFilename);
            }
            UploadPayload::File {
                filename: file.filename,
                data: file.data,
            }
        };

        Ok(NewUpload {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            payload,
        })
    }
}

/// Body of `PUT /update/:id`. A missing `description` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDescriptionRequest {
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// List all records.
///
/// GET /api/files
#[axum::debug_handler]
async fn list_files(State(state): State<AppState>) -> Result<Json<Vec<FileRecord>>> {
    let files = state.catalog.list().await?;
    Ok(Json(files))
}

/// Create a record from a link or an uploaded file.
///
/// POST /upload
#[axum::debug_handler]
async fn upload_file(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>> {
    let max_size = state.config.storage.max_upload_size;
    let upload = UploadForm::from_multipart(multipart, max_size)
        .await?
        .into_new_upload()?;

    state.catalog.create(upload).await?;

    Ok(Json(json!({ "success": true })))
}

/// Delete a record.
///
/// DELETE /delete/:id
#[axum::debug_handler]
async fn delete_file(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    state.catalog.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Replace a record's description.
///
/// PUT /update/:id
#[axum::debug_handler]
async fn update_file(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    request: std::result::Result<Json<UpdateDescriptionRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Path(id) = id?;
    let Json(request) = request?;
    let description = request.description.unwrap_or_default();

    state.catalog.update_description(id, &description).await?;
    Ok(Json(json!({ "success": true })))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn multipart_error(err: MultipartError, max_size: usize) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::FileTooLarge { max_size }
    } else {
        Error::InvalidInput(format!("Failed to read multipart field: {}", err.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_form(filename: &str) -> UploadForm {
        UploadForm {
            title: Some("Title".into()),
            description: Some("Desc".into()),
            kind: Some("file".into()),
            url: None,
            file: Some(FilePart {
                filename: filename.into(),
                data: b"data".to_vec(),
            }),
        }
    }

    #[test]
    fn test_update_request_description_is_optional() {
        let request: UpdateDescriptionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.description, None);

        let request: UpdateDescriptionRequest =
            serde_json::from_str(r#"{"description": "new"}"#).unwrap();
        assert_eq!(request.description.as_deref(), Some("new"));
    }

    #[test]
    fn test_link_form_becomes_link_upload() {
        let form = UploadForm {
            title: Some("Rust".into()),
            kind: Some("link".into()),
            url: Some("https://www.rust-lang.org".into()),
            ..Default::default()
        };

        let upload = form.into_new_upload().unwrap();
        assert_eq!(upload.title, "Rust");
        assert_eq!(upload.description, "");
        assert!(matches!(
            upload.payload,
            UploadPayload::Link { ref url } if url == "https://www.rust-lang.org"
        ));
    }

    #[test]
    fn test_link_form_without_url_is_rejected() {
        let form = UploadForm {
            kind: Some("link".into()),
            url: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(form.into_new_upload(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_file_form_requires_file_part() {
        let form = UploadForm {
            kind: Some("file".into()),
            ..Default::default()
        };
        assert!(matches!(form.into_new_upload(), Err(Error::MissingFile)));

        // No type at all also means file mode
        assert!(matches!(
            UploadForm::default().into_new_upload(),
            Err(Error::MissingFile)
        ));
    }

    #[test]
    fn test_file_form_requires_filename() {
        assert!(matches!(
            file_form("").into_new_upload(),
            Err(Error::EmptyFilename)
        ));
    }

    #[test]
    fn test_file_form_becomes_file_upload() {
        let upload = file_form("report.pdf").into_new_upload().unwrap();
        match upload.payload {
            UploadPayload::File { filename, data } => {
                assert_eq!(filename, "report.pdf");
                assert_eq!(data, b"data");
            }
            other => panic!("expected file payload, got {:?}", other),
        }
    }
}
