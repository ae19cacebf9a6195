// src/file_selector.rs
//! File picking control: an accept filter, a multiplicity flag and a label.
//!
//! The selector holds no selection of its own. A completed pick is handed to
//! the caller's callback; an empty pick (cancelled dialog) is dropped, so the
//! caller's previous selection stands.

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::utils::{content_type_for, file_name_of, get_file_extension, read_file_bytes};

/// A picked document: name, content type and raw bytes, never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Content type derived from the file extension
    pub fn from_bytes(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename);
        Self::new(filename, content_type, bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// Blobs can be large; keep them out of debug output.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Comma-separated accept list such as `.pdf,.docx,.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    raw: String,
}

impl AcceptFilter {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Display form: `.pdf,.docx` becomes `PDF, DOCX`.
    pub fn display(&self) -> String {
        self.raw
            .split(',')
            .map(|token| token.trim().replacen('.', "", 1).to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn extensions(&self) -> impl Iterator<Item = String> + '_ {
        self.raw
            .split(',')
            .map(str::trim)
            .filter(|token| token.starts_with('.') && token.len() > 1)
            .map(|token| token[1..].to_lowercase())
    }

    /// Whether the picker would offer `filename`. MIME tokens are not
    /// matched; a filter without extension tokens allows everything.
    pub fn allows(&self, filename: &str) -> bool {
        let mut extensions = self.extensions().peekable();
        if extensions.peek().is_none() {
            return true;
        }

        match get_file_extension(filename) {
            Some(ext) => extensions.any(|allowed| allowed == ext),
            None => false,
        }
    }
}

impl fmt::Display for AcceptFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[derive(Debug, Clone)]
pub struct FileSelector {
    pub id: String,
    pub label: String,
    pub accept: AcceptFilter,
    pub multiple: bool,
}

impl FileSelector {
    pub fn new(id: &str, label: &str, accept: &str, multiple: bool) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            accept: AcceptFilter::new(accept),
            multiple,
        }
    }

    pub fn hint(&self) -> &'static str {
        if self.multiple {
            "Drag & drop multiple files or click to browse"
        } else {
            "Drag & drop a file or click to browse"
        }
    }

    /// Deliver a completed pick. The callback runs once for a non-empty
    /// pick and never for an empty one. Returns whether it ran.
    pub fn on_change<F>(&self, files: Vec<SelectedFile>, on_files_selected: F) -> bool
    where
        F: FnOnce(Vec<SelectedFile>),
    {
        if files.is_empty() {
            debug!("{}: empty pick ignored", self.id);
            return false;
        }

        debug!("{}: {} file(s) picked", self.id, files.len());
        on_files_selected(files);
        true
    }

    /// Stand-in for the native dialog: load the given paths, skipping
    /// anything the accept filter would have hidden.
    pub async fn browse(&self, paths: &[PathBuf]) -> Result<Vec<SelectedFile>> {
        let mut picked = Vec::new();

        for path in paths {
            let filename = file_name_of(path)?;
            if !self.accept.allows(&filename) {
                warn!(
                    "{}: skipping {} (accepted file types: {})",
                    self.id,
                    path.display(),
                    self.accept
                );
                continue;
            }

            let bytes = read_file_bytes(path).await?;
            picked.push(SelectedFile::from_bytes(filename, bytes));

            if !self.multiple {
                break;
            }
        }

        Ok(picked)
    }

    /// Text rendering of the drop zone
    pub fn render(&self) -> String {
        format!(
            "[ {} ]\n  {}\n  Accepted file types: {}",
            self.label,
            self.hint(),
            self.accept
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn file(name: &str) -> SelectedFile {
        SelectedFile::from_bytes(name, name.as_bytes().to_vec())
    }

    #[test]
    fn test_accept_display() {
        assert_eq!(AcceptFilter::new(".pdf,.docx").display(), "PDF, DOCX");
        assert_eq!(AcceptFilter::new(".pdf, .docx, .txt").display(), "PDF, DOCX, TXT");
    }

    #[test]
    fn test_accept_allows() {
        let filter = AcceptFilter::new(".pdf,.docx,.txt");
        assert!(filter.allows("cv.pdf"));
        assert!(filter.allows("CV.DOCX"));
        assert!(!filter.allows("cv.png"));
        assert!(!filter.allows("README"));

        assert!(AcceptFilter::new("").allows("anything.bin"));
        assert!(AcceptFilter::new("image/*").allows("photo.png"));
    }

    #[test]
    fn test_display_does_not_change_filtering() {
        let filter = AcceptFilter::new(".pdf");
        let _ = filter.display();
        assert_eq!(filter.raw(), ".pdf");
        assert!(!filter.allows("PDF"));
    }

    #[test]
    fn test_non_empty_pick_invokes_callback_once() {
        let selector = FileSelector::new("resumes", "Resume Files", ".pdf", true);
        let calls = Cell::new(0);
        let picked = vec![file("a.pdf"), file("b.pdf")];

        let delivered = selector.on_change(picked.clone(), |files| {
            calls.set(calls.get() + 1);
            assert_eq!(files, picked);
        });

        assert!(delivered);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_pick_never_invokes_callback() {
        let selector = FileSelector::new("resumes", "Resume Files", ".pdf", true);
        let delivered = selector.on_change(Vec::new(), |_| panic!("callback ran on empty pick"));
        assert!(!delivered);
    }

    #[test]
    fn test_single_selector_delivers_whole_selection() {
        let selector = FileSelector::new("job-description", "Job Description File", ".pdf", false);
        let picked = vec![file("jd.pdf"), file("other.pdf")];
        let mut received = Vec::new();

        selector.on_change(picked.clone(), |files| received = files);

        assert_eq!(received, picked);
    }

    #[test]
    fn test_hint_follows_multiplicity() {
        assert_eq!(
            FileSelector::new("a", "A", ".pdf", true).hint(),
            "Drag & drop multiple files or click to browse"
        );
        assert_eq!(
            FileSelector::new("a", "A", ".pdf", false).hint(),
            "Drag & drop a file or click to browse"
        );
    }

    #[tokio::test]
    async fn test_browse_skips_rejected_types() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("cv.pdf");
        let png = dir.path().join("photo.png");
        let txt = dir.path().join("notes.txt");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        std::fs::write(&png, b"png").unwrap();
        std::fs::write(&txt, b"notes").unwrap();

        let selector = FileSelector::new("resumes", "Resume Files", ".pdf,.docx,.txt", true);
        let picked = selector.browse(&[pdf, png, txt]).await.unwrap();

        let names: Vec<_> = picked.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(names, vec!["cv.pdf", "notes.txt"]);
        assert_eq!(picked[0].bytes, b"%PDF-1.4");
        assert_eq!(picked[0].content_type, "application/pdf");
    }

    #[tokio::test]
    async fn test_browse_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let selector = FileSelector::new("resumes", "Resume Files", ".pdf", true);

        let err = selector
            .browse(&[dir.path().join("missing.pdf")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing.pdf"));
    }
}
