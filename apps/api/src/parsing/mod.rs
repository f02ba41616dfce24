//! File Parser — extension-dispatched text extraction for uploaded documents.
//!
//! Supported: `pdf`, `docx`, `json`, `txt`. Every handler is best-effort and
//! returns a tagged `Result` per file; the upload pipeline converts failures
//! into fail-soft `ParsedDocument`s so one bad file never aborts a batch.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use thiserror::Error;

/// Upload extensions accepted by the service.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "json", "txt"];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file type")]
    Unsupported { extension: String },

    #[error("Error parsing PDF: {0}")]
    Pdf(String),

    #[error("Error parsing DOCX: {0}")]
    Docx(String),

    #[error("Error parsing JSON: {0}")]
    Json(String),

    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),
}

/// Lowercased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Whether `filename` carries one of the accepted upload extensions.
pub fn is_allowed(filename: &str) -> bool {
    extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Dispatches to the extractor for the file's extension.
///
/// `path` is where the bytes live (a scoped temp file during upload);
/// `filename` is the client-supplied name used for dispatch.
pub fn parse_file(path: &Path, filename: &str) -> Result<String, ParseError> {
    let ext = extension(filename).unwrap_or_default();
    match ext.as_str() {
        "pdf" => parse_pdf(path),
        "docx" => parse_docx(path),
        "json" => parse_json(path),
        "txt" => Ok(std::fs::read_to_string(path)?),
        _ => Err(ParseError::Unsupported { extension: ext }),
    }
}

fn parse_pdf(path: &Path) -> Result<String, ParseError> {
    pdf_extract::extract_text(path).map_err(|e| ParseError::Pdf(e.to_string()))
}

/// Extracts paragraph text from a DOCX file.
///
/// A DOCX is a zip archive; the document body lives in `word/document.xml`.
/// We walk the XML and collect the contents of `<w:t>` runs, emitting a
/// newline at each paragraph boundary — the same paragraph walk a
/// word-processor library would do, without loading styles or media.
fn parse_docx(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ParseError::Docx(e.to_string()))?;
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|e| ParseError::Docx(e.to_string()))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|e| ParseError::Docx(e.to_string()))?;

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"t" => in_run_text = true,
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"p" => text.push('\n'),
            Ok(Event::Text(ref t)) if in_run_text => {
                let run = t
                    .unescape()
                    .map_err(|e| ParseError::Docx(e.to_string()))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Docx(e.to_string())),
            _ => {}
        }
    }

    Ok(text)
}

/// Re-serializes JSON with stable 2-space indentation for readability.
fn parse_json(path: &Path) -> Result<String, ParseError> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| ParseError::Json(e.to_string()))?;
    serde_json::to_string_pretty(&value).map_err(|e| ParseError::Json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Builds a minimal but valid DOCX: a zip with just `word/document.xml`.
    fn write_docx(dir: &tempfile::TempDir, name: &str, paragraphs: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();

        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
            .collect();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(extension("Complaint.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension("no-extension"), None);
    }

    #[test]
    fn test_is_allowed_covers_the_four_supported_types() {
        for name in ["a.pdf", "b.docx", "c.json", "d.txt", "E.TXT"] {
            assert!(is_allowed(name), "{name} should be allowed");
        }
        assert!(!is_allowed("malware.exe"));
        assert!(!is_allowed("README"));
    }

    #[test]
    fn test_txt_reads_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "facts.txt", b"Client rear-ended on I-80.\n");
        let text = parse_file(&path, "facts.txt").unwrap();
        assert_eq!(text, "Client rear-ended on I-80.\n");
    }

    #[test]
    fn test_json_is_reserialized_with_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "case.json", br#"{"plaintiff":"Smith","injuries":["whiplash"]}"#);
        let text = parse_file(&path, "case.json").unwrap();
        assert!(text.contains("{\n  \"injuries\""), "got: {text}");
        assert!(text.contains("\n    \"whiplash\"\n"), "got: {text}");
    }

    #[test]
    fn test_malformed_json_yields_tagged_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "broken.json", b"{not json");
        let err = parse_file(&path, "broken.json").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing JSON:"));
    }

    #[test]
    fn test_docx_extracts_paragraph_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(
            &dir,
            "complaint.docx",
            &["COMPLAINT FOR DAMAGES", "Plaintiff alleges as follows:"],
        );
        let text = parse_file(&path, "complaint.docx").unwrap();
        assert_eq!(text, "COMPLAINT FOR DAMAGES\nPlaintiff alleges as follows:\n");
    }

    #[test]
    fn test_docx_unescapes_entities() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(&dir, "entities.docx", &["Smith &amp; Sons"]);
        let text = parse_file(&path, "entities.docx").unwrap();
        assert_eq!(text, "Smith & Sons\n");
    }

    #[test]
    fn test_non_zip_bytes_as_docx_yield_tagged_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "fake.docx", b"plain text pretending");
        let err = parse_file(&path, "fake.docx").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing DOCX:"));
    }

    #[test]
    fn test_garbage_bytes_as_pdf_yield_tagged_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "fake.pdf", b"not a pdf at all");
        let err = parse_file(&path, "fake.pdf").unwrap_err();
        assert!(err.to_string().starts_with("Error parsing PDF:"));
    }

    #[test]
    fn test_unsupported_extension_is_rejected_not_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "notes.md", b"# notes");
        let err = parse_file(&path, "notes.md").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type");
        assert!(matches!(err, ParseError::Unsupported { extension } if extension == "md"));
    }
}
