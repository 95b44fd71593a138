//! Document import: declared-type allow-list and text extraction.
//!
//! The declared type of a file is derived from its extension. Plain text is
//! loaded verbatim. DOCX files are unpacked and the text runs of
//! `word/document.xml` are extracted. PDF and legacy Word files are recognized
//! but rejected, since no text extraction exists for them.

use std::io::Read;
use std::path::Path;

/// Label shown when no document is loaded.
pub const DEFAULT_UPLOAD_LABEL: &str = "Upload Document";

/// Alert raised for files outside the allow-list.
pub const REJECTED_FILE_MESSAGE: &str = "Please upload a valid file (TXT, DOCX).";

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_MSWORD: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_UNKNOWN: &str = "application/octet-stream";

/// Declared types that are imported.
pub const ACCEPTED_TYPES: &[&str] = &[MIME_TEXT, MIME_DOCX];

/// Extension to declared type table.
const EXTENSION_TYPES: &[(&str, &str)] = &[
    ("txt", MIME_TEXT),
    ("text", MIME_TEXT),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("pdf", MIME_PDF),
    ("doc", MIME_MSWORD),
    ("docx", MIME_DOCX),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("rtf", "application/rtf"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
];

/// Error type for document loading.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("not a valid DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// How an accepted document is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    WordDocx,
}

/// Declared type of `path`, from its extension.
pub fn declared_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return MIME_UNKNOWN;
    };
    let ext = ext.to_ascii_lowercase();
    EXTENSION_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map_or(MIME_UNKNOWN, |(_, mime)| mime)
}

/// Map a declared type onto the allow-list.
pub fn kind_for_type(mime: &str) -> Option<DocumentKind> {
    match mime {
        MIME_TEXT => Some(DocumentKind::PlainText),
        MIME_DOCX => Some(DocumentKind::WordDocx),
        _ => None,
    }
}

/// Classify a file; `None` means it is rejected.
pub fn classify(path: &Path) -> Option<DocumentKind> {
    kind_for_type(declared_type(path))
}

/// Name shown in the upload label.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load the text content of an accepted document.
pub fn read_document(path: &Path, kind: DocumentKind) -> Result<String, DocumentError> {
    let io_err = |source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    };

    match kind {
        DocumentKind::PlainText => {
            let bytes = std::fs::read(path).map_err(io_err)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        DocumentKind::WordDocx => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            let mut archive = zip::ZipArchive::new(file)?;
            let mut xml = String::new();
            archive
                .by_name("word/document.xml")?
                .read_to_string(&mut xml)
                .map_err(io_err)?;
            Ok(docx_text(&xml))
        }
    }
}

/// Extract the visible text of a WordprocessingML body.
///
/// Text runs (`w:t`) are concatenated, tabs and breaks become `\t` and `\n`,
/// and every paragraph end becomes a newline.
pub fn docx_text(xml: &str) -> String {
    let mut out = String::new();
    let mut rest = xml;
    let mut in_text = false;

    while let Some(open) = rest.find('<') {
        if in_text {
            out.push_str(&unescape_xml(&rest[..open]));
        }
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let name = tag
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");
        let closing = tag.starts_with('/');
        let self_closing = tag.ends_with('/');

        match name {
            "w:t" => in_text = !closing && !self_closing,
            "w:tab" if !closing => out.push('\t'),
            "w:br" | "w:cr" if !closing => out.push('\n'),
            "w:p" if closing => out.push('\n'),
            _ => {}
        }
    }

    let trimmed_len = out.trim_end_matches('\n').len();
    out.truncate(trimmed_len);
    out
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
