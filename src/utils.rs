// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Content type sent along with an uploaded document
pub fn content_type_for(filename: &str) -> &'static str {
    match get_file_extension(filename).as_deref() {
        Some("pdf") => PDF_CONTENT_TYPE,
        Some("docx") => DOCX_CONTENT_TYPE,
        Some("txt") => TEXT_CONTENT_TYPE,
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Final path component as an owned string
pub fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Path has no usable file name: {}", path.display()))
}

/// Read file content as bytes with proper error context
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_file_extension() {
        assert_eq!(get_file_extension("test.pdf"), Some("pdf".to_string()));
        assert_eq!(
            get_file_extension("document.DOCX"),
            Some("docx".to_string())
        );
        assert_eq!(get_file_extension("noext"), None);
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("cv.PDF"), PDF_CONTENT_TYPE);
        assert_eq!(content_type_for("cv.docx"), DOCX_CONTENT_TYPE);
        assert_eq!(content_type_for("jd.txt"), TEXT_CONTENT_TYPE);
        assert_eq!(content_type_for("photo.png"), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for("README"), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/a/cv.pdf")).unwrap(), "cv.pdf");
        assert!(file_name_of(Path::new("/")).is_err());
    }
}
