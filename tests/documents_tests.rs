use std::io::Write;
use std::path::Path;

use babelterm::documents::{DocumentError, DocumentKind, classify, read_document};

const DOCUMENT_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    r#"<w:body>"#,
    r#"<w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Quarterly notes</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t xml:space="preserve">Sales rose </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>12%</w:t></w:r><w:r><w:t> &lt;est.&gt;</w:t></w:r></w:p>"#,
    r#"<w:sectPr/>"#,
    r#"</w:body></w:document>"#
);

fn write_docx(path: &Path, entries: &[(&str, &str)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_classify_accepts_text_and_docx_only() {
    assert_eq!(classify(Path::new("a.txt")), Some(DocumentKind::PlainText));
    assert_eq!(classify(Path::new("a.TXT")), Some(DocumentKind::PlainText));
    assert_eq!(classify(Path::new("a.docx")), Some(DocumentKind::WordDocx));
    assert_eq!(classify(Path::new("a.pdf")), None);
    assert_eq!(classify(Path::new("a.doc")), None);
    assert_eq!(classify(Path::new("a.png")), None);
    assert_eq!(classify(Path::new("README")), None);
}

#[test]
fn test_plain_text_is_loaded_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("note.txt");
    std::fs::write(&path, "line one\r\n  line two\n\n").unwrap();

    let text = read_document(&path, DocumentKind::PlainText).unwrap();

    assert_eq!(text, "line one\r\n  line two\n\n");
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    std::fs::write(&path, b"caf\xe9").unwrap();

    let text = read_document(&path, DocumentKind::PlainText).unwrap();

    assert_eq!(text, "caf\u{fffd}");
}

#[test]
fn test_docx_text_is_extracted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    write_docx(
        &path,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("word/document.xml", DOCUMENT_XML),
        ],
    );

    let text = read_document(&path, DocumentKind::WordDocx).unwrap();

    assert_eq!(text, "Quarterly notes\nSales rose 12% <est.>");
}

#[test]
fn test_docx_without_body_is_an_archive_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");
    write_docx(&path, &[("[Content_Types].xml", "<Types/>")]);

    let err = read_document(&path, DocumentKind::WordDocx).unwrap_err();

    assert!(matches!(err, DocumentError::Archive(_)), "{err:?}");
}

#[test]
fn test_docx_that_is_not_a_zip_is_an_archive_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.docx");
    std::fs::write(&path, "just text").unwrap();

    let err = read_document(&path, DocumentKind::WordDocx).unwrap_err();

    assert!(matches!(err, DocumentError::Archive(_)), "{err:?}");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = read_document(&dir.path().join("gone.txt"), DocumentKind::PlainText).unwrap_err();

    assert!(matches!(err, DocumentError::Io { .. }), "{err:?}");
    assert!(err.to_string().contains("gone.txt"));
}
