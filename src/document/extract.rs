//! Text extraction from plain text, PDF and DOCX files.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use xml::reader::{EventReader, XmlEvent};

/// Largest input document accepted, in bytes.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Supported input document formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detect the format from the extension; files without one are text.
    pub fn from_path(path: &Path) -> Option<Self> {
        let Some(ext) = path.extension() else {
            return Some(DocumentKind::PlainText);
        };

        match ext.to_str()?.to_ascii_lowercase().as_str() {
            "txt" | "text" | "md" => Some(DocumentKind::PlainText),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// Errors that can occur while extracting text from a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    Unsupported(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text file is not valid UTF-8: {0}")]
    Encoding(PathBuf),

    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),

    #[error("Failed to read DOCX: {0}")]
    Docx(String),
}

/// Read a document and return its raw text.
///
/// Size limits are the caller's concern; this reads the whole file.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let kind =
        DocumentKind::from_path(path).ok_or_else(|| DocumentError::Unsupported(path.to_path_buf()))?;

    let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), ?kind, "extracting text");

    match kind {
        DocumentKind::PlainText => {
            String::from_utf8(bytes).map_err(|_| DocumentError::Encoding(path.to_path_buf()))
        }
        DocumentKind::Pdf => pdf_text(&bytes),
        DocumentKind::Docx => docx_text(&bytes),
    }
}

fn pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))
}

fn docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    document_xml_text(&xml)
}

/// Collect the text runs of a WordprocessingML body.
///
/// Paragraph ends and breaks become newlines, tabs stay tabs.
pub(super) fn document_xml_text(xml: &str) -> Result<String, DocumentError> {
    let mut text = String::new();
    let mut in_run_text = false;

    for event in EventReader::from_str(xml) {
        match event.map_err(|e| DocumentError::Docx(e.to_string()))? {
            XmlEvent::StartElement { name, .. } => match name.local_name.as_str() {
                "t" => in_run_text = true,
                "tab" => text.push('\t'),
                "br" | "cr" => text.push('\n'),
                _ => {}
            },
            XmlEvent::EndElement { name } => match name.local_name.as_str() {
                "t" => in_run_text = false,
                "p" => text.push('\n'),
                _ => {}
            },
            XmlEvent::Characters(s) | XmlEvent::Whitespace(s) if in_run_text => {
                text.push_str(&s);
            }
            _ => {}
        }
    }

    Ok(text)
}
