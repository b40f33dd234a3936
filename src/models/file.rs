//! Catalog record models
//!
//! A record is either an external link or an uploaded file stored in the
//! content directory. Column and JSON names follow the `files` table.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Extensions classified as images.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Classification of a record's payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FileKind {
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "doc")]
    Document,
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "pdf")]
    Pdf,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Link => "link",
            FileKind::Document => "doc",
            FileKind::Image => "img",
            FileKind::Pdf => "pdf",
        }
    }

    /// Parse a stored `type` value. Anything unrecognised reads as a document.
    pub fn from_db(s: &str) -> Self {
        match s {
            "link" => FileKind::Link,
            "img" => FileKind::Image,
            "pdf" => FileKind::Pdf,
            _ => FileKind::Document,
        }
    }

    /// Classify an uploaded file by its lowercased extension.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            FileKind::Image
        } else if ext == "pdf" {
            FileKind::Pdf
        } else {
            FileKind::Document
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, FileKind::Link)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogue entry as stored in the `files` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// External URL for links, `/static/uploads/<name>` for uploads.
    pub content: String,
    /// Sanitized client filename; empty for links.
    #[serde(rename = "filename")]
    pub original_filename: String,
    /// Creation date as `dd/mm/YYYY`.
    #[serde(rename = "date")]
    pub created_date: String,
}

// Text columns are nullable in the schema, so NULL reads back as empty.
impl<'r> FromRow<'r, SqliteRow> for FileRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let text = |column: &str| -> sqlx::Result<String> {
            Ok(row
                .try_get::<Option<String>, _>(column)?
                .unwrap_or_default())
        };

        Ok(Self {
            id: row.try_get("id")?,
            title: text("title")?,
            description: text("description")?,
            kind: FileKind::from_db(&text("type")?),
            content: text("content")?,
            original_filename: text("filename")?,
            created_date: text("date")?,
        })
    }
}

/// Payload of a new catalogue entry.
#[derive(Debug, Clone)]
pub enum UploadPayload {
    Link { url: String },
    File { filename: String, data: Vec<u8> },
}

/// A validated create request, ready for the upload handler.
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub title: String,
    pub description: String,
    pub payload: UploadPayload,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("photo.JPG", FileKind::Image)]
    #[case("banner.jpeg", FileKind::Image)]
    #[case("logo.png", FileKind::Image)]
    #[case("anim.gif", FileKind::Image)]
    #[case("shot.WebP", FileKind::Image)]
    #[case("report.pdf", FileKind::Pdf)]
    #[case("REPORT.PDF", FileKind::Pdf)]
    #[case("doc.txt", FileKind::Document)]
    #[case("archive.tar.gz", FileKind::Document)]
    #[case("noextension", FileKind::Document)]
    #[case("image.png.exe", FileKind::Document)]
    fn test_classify_by_extension(#[case] filename: &str, #[case] expected: FileKind) {
        assert_eq!(FileKind::from_filename(filename), expected);
    }

    #[test]
    fn test_kind_db_values() {
        for kind in [
            FileKind::Link,
            FileKind::Document,
            FileKind::Image,
            FileKind::Pdf,
        ] {
            assert_eq!(FileKind::from_db(kind.as_str()), kind);
        }
        assert_eq!(FileKind::from_db("something-else"), FileKind::Document);
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = FileRecord {
            id: 3,
            title: "Rust book".into(),
            description: "Reference".into(),
            kind: FileKind::Link,
            content: "https://doc.rust-lang.org/book/".into(),
            original_filename: String::new(),
            created_date: "19/10/2026".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["type"], "link");
        assert_eq!(value["filename"], "");
        assert_eq!(value["date"], "19/10/2026");
        assert!(value.get("kind").is_none());
    }
}
