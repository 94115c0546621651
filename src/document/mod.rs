//! Input documents for `--from-file`.
//!
//! Plain text, PDF and DOCX files are reduced to raw text before they are
//! sanitized and sent for synthesis.

mod extract;

pub use extract::{DocumentError, DocumentKind, MAX_FILE_SIZE, extract_text};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<?xml version=\"1.0\"?><Types/>").unwrap();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();

        writer.finish().unwrap().into_inner()
    }

    fn pdf_with_text(path: &Path, text: &str) {
        use lopdf::content::{Content, Operation};
        use lopdf::{Document, Object, Stream, dictionary};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        doc.save(path).unwrap();
    }

    // ===========================================
    // Format detection
    // ===========================================

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("notes.txt")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("README")),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("REPORT.PDF")),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("letter.docx")),
            Some(DocumentKind::Docx)
        );
        assert_eq!(DocumentKind::from_path(Path::new("image.png")), None);
    }

    #[test]
    fn test_extract_unsupported_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.png");
        std::fs::write(&path, b"\x89PNG").unwrap();

        assert!(matches!(
            extract_text(&path).unwrap_err(),
            DocumentError::Unsupported(_)
        ));
    }

    #[test]
    fn test_extract_missing_file() {
        let result = extract_text(&PathBuf::from("/nonexistent/input.txt"));
        assert!(matches!(result.unwrap_err(), DocumentError::Io { .. }));
    }

    // ===========================================
    // Plain text
    // ===========================================

    #[test]
    fn test_extract_plain_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "Plain text\nsecond line").unwrap();

        assert_eq!(extract_text(&path).unwrap(), "Plain text\nsecond line");
    }

    #[test]
    fn test_extract_plain_text_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.txt");
        std::fs::write(&path, b"\xff\xfe\x00bad").unwrap();

        assert!(matches!(
            extract_text(&path).unwrap_err(),
            DocumentError::Encoding(_)
        ));
    }

    // ===========================================
    // DOCX
    // ===========================================

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>
    <w:p><w:r><w:t>Name</w:t><w:tab/><w:t>Value</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_document_xml_text() {
        let text = extract::document_xml_text(DOCUMENT_XML).unwrap();
        assert_eq!(text, "Hello world\nName\tValue\n");
    }

    #[test]
    fn test_extract_docx() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("letter.docx");
        std::fs::write(&path, docx_bytes(DOCUMENT_XML)).unwrap();

        assert_eq!(extract_text(&path).unwrap(), "Hello world\nName\tValue\n");
    }

    #[test]
    fn test_extract_docx_not_a_zip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fake.docx");
        std::fs::write(&path, b"plain bytes, not an archive").unwrap();

        assert!(matches!(
            extract_text(&path).unwrap_err(),
            DocumentError::Docx(_)
        ));
    }

    #[test]
    fn test_extract_docx_without_body() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.docx");
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            extract_text(&path).unwrap_err(),
            DocumentError::Docx(_)
        ));
    }

    // ===========================================
    // PDF
    // ===========================================

    #[test]
    fn test_extract_pdf() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.pdf");
        pdf_with_text(&path, "Hello PDF");

        let text = extract_text(&path).unwrap();
        assert!(text.contains("Hello PDF"), "extracted: {text:?}");
    }

    #[test]
    fn test_extract_pdf_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(matches!(
            extract_text(&path).unwrap_err(),
            DocumentError::Pdf(_)
        ));
    }
}
