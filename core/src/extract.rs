use crate::error::ExtractionError;
use std::fs;
use std::path::Path;

/// Source formats a resume or job description may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    PlainText,
}

impl FileKind {
    pub const EXTENSIONS: [&'static str; 3] = ["pdf", "docx", "txt"];

    /// Classify by extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Turns a file into plain text.
pub trait TextExtractor {
    fn extract(&self, path: &Path, kind: FileKind) -> Result<String, ExtractionError>;

    /// Check the path, classify it and hand it to [`TextExtractor::extract`].
    fn extract_text(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }
        let kind = FileKind::from_path(path)
            .ok_or_else(|| ExtractionError::Unsupported(path.to_path_buf()))?;
        self.extract(path, kind)
    }
}

/// Reads `.txt` files. PDF and DOCX need an external decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path, kind: FileKind) -> Result<String, ExtractionError> {
        match kind {
            FileKind::PlainText => fs::read_to_string(path)
                .map(|text| text.trim().to_string())
                .map_err(|source| ExtractionError::Io { path: path.to_path_buf(), source }),
            FileKind::Pdf | FileKind::Docx => Err(ExtractionError::Unsupported(path.to_path_buf())),
        }
    }
}
