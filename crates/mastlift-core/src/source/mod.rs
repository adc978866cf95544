pub mod docx;
pub mod pdftotext;

use crate::error::MastliftError;
use crate::model::TextDocument;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Input formats the pipeline can linearize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Txt,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// Parse a format tag such as `"pdf"` or `".DOCX"`.
    pub fn from_tag(tag: &str) -> Result<SourceFormat, MastliftError> {
        let lower = tag.trim().trim_start_matches('.').to_lowercase();
        match lower.as_str() {
            "txt" | "text" => Ok(SourceFormat::Txt),
            "docx" => Ok(SourceFormat::Docx),
            "pdf" => Ok(SourceFormat::Pdf),
            _ => Err(MastliftError::UnsupportedFormat(tag.trim().to_string())),
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<SourceFormat, MastliftError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| MastliftError::UnsupportedFormat(path.display().to_string()))?;
        SourceFormat::from_tag(ext)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Txt => write!(f, "txt"),
            SourceFormat::Docx => write!(f, "docx"),
            SourceFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// One page (PDF) or paragraph (DOCX) of extracted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub ordinal: usize,
    pub text: String,
}

/// Raw bytes of one input together with how to read them.
#[derive(Debug, Clone)]
pub struct DocumentSource {
    /// Identifier reported back in errors and results (usually the file path).
    pub id: String,
    pub format: SourceFormat,
    pub bytes: Vec<u8>,
}

impl DocumentSource {
    pub fn new(id: impl Into<String>, format: SourceFormat, bytes: Vec<u8>) -> Self {
        DocumentSource {
            id: id.into(),
            format,
            bytes,
        }
    }

    /// Read a file, taking the format from `format_tag` or else the extension.
    ///
    /// A read failure is reported as an extraction failure naming the path.
    pub fn from_file(path: &Path, format_tag: Option<&str>) -> Result<Self, MastliftError> {
        let id = path.display().to_string();
        let format = match format_tag {
            Some(tag) => SourceFormat::from_tag(tag)?,
            None => SourceFormat::from_path(path)?,
        };
        let bytes = std::fs::read(path).map_err(|e| MastliftError::from(e).for_source(&id))?;
        Ok(DocumentSource::new(id, format, bytes))
    }
}

/// Trait for text extraction backends.
pub trait TextExtractor: Send + Sync {
    /// Extract ordered text units from document bytes.
    fn extract_units(
        &self,
        bytes: &[u8],
        format: SourceFormat,
    ) -> Result<Vec<TextUnit>, MastliftError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Plain text backend: the whole file is a single unit.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_units(
        &self,
        bytes: &[u8],
        _format: SourceFormat,
    ) -> Result<Vec<TextUnit>, MastliftError> {
        let text = String::from_utf8_lossy(bytes).into_owned();
        Ok(vec![TextUnit { ordinal: 1, text }])
    }

    fn backend_name(&self) -> &str {
        "plain"
    }
}

/// Dispatches to the plain, DOCX or pdftotext backend by format.
pub struct DefaultExtractor {
    pdf: pdftotext::PdftotextExtractor,
}

impl DefaultExtractor {
    pub fn new() -> Self {
        DefaultExtractor {
            pdf: pdftotext::PdftotextExtractor,
        }
    }
}

impl Default for DefaultExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DefaultExtractor {
    fn extract_units(
        &self,
        bytes: &[u8],
        format: SourceFormat,
    ) -> Result<Vec<TextUnit>, MastliftError> {
        match format {
            SourceFormat::Txt => PlainTextExtractor.extract_units(bytes, format),
            SourceFormat::Docx => docx::DocxExtractor.extract_units(bytes, format),
            SourceFormat::Pdf => self.pdf.extract_units(bytes, format),
        }
    }

    fn backend_name(&self) -> &str {
        "default"
    }
}

/// Linearize a source into a `TextDocument`.
///
/// Units are concatenated in order with a line break between them. Units
/// without text contribute nothing. An empty byte stream never reaches the
/// backend and yields an empty document.
pub fn read_document(
    source: &DocumentSource,
    extractor: &dyn TextExtractor,
) -> Result<TextDocument, MastliftError> {
    if source.bytes.is_empty() {
        debug!(source = %source.id, "empty input, skipping extraction");
        return Ok(TextDocument::empty(&source.id));
    }

    let units = extractor
        .extract_units(&source.bytes, source.format)
        .map_err(|e| e.for_source(&source.id))?;
    debug!(
        source = %source.id,
        backend = extractor.backend_name(),
        units = units.len(),
        "extracted text units"
    );

    Ok(assemble(&source.id, &units))
}

fn assemble(source_id: &str, units: &[TextUnit]) -> TextDocument {
    let mut lines = Vec::new();
    for unit in units {
        if unit.text.trim().is_empty() {
            debug!(source = source_id, unit = unit.ordinal, "no text in unit");
            continue;
        }
        lines.extend(unit.text.lines().map(|l| l.to_string()));
    }
    TextDocument::new(source_id, units.len(), lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingExtractor;

    impl TextExtractor for FailingExtractor {
        fn extract_units(
            &self,
            _bytes: &[u8],
            _format: SourceFormat,
        ) -> Result<Vec<TextUnit>, MastliftError> {
            Err(MastliftError::Docx("corrupt archive".into()))
        }

        fn backend_name(&self) -> &str {
            "failing"
        }
    }

    fn unit(ordinal: usize, text: &str) -> TextUnit {
        TextUnit {
            ordinal,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_format_from_tag() {
        assert_eq!(SourceFormat::from_tag("PDF").unwrap(), SourceFormat::Pdf);
        assert_eq!(SourceFormat::from_tag(".docx").unwrap(), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_tag("txt").unwrap(), SourceFormat::Txt);
    }

    #[test]
    fn test_unsupported_format() {
        let err = SourceFormat::from_tag("xlsx").unwrap_err();
        assert!(matches!(err, MastliftError::UnsupportedFormat(ref t) if t == "xlsx"));
    }

    #[test]
    fn test_format_from_path() {
        let fmt = SourceFormat::from_path(Path::new("site/Proposal.PDF")).unwrap();
        assert_eq!(fmt, SourceFormat::Pdf);
        assert!(SourceFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_assemble_skips_empty_units() {
        let units = vec![unit(1, "Page one"), unit(2, "   "), unit(3, "Page three\nmore")];
        let doc = assemble("p.pdf", &units);
        assert_eq!(doc.lines(), ["Page one", "Page three", "more"]);
        assert_eq!(doc.unit_count, 3);
    }

    #[test]
    fn test_empty_bytes_skip_backend() {
        let source = DocumentSource::new("empty.pdf", SourceFormat::Pdf, Vec::new());
        let doc = read_document(&source, &FailingExtractor).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_backend_failure_names_source() {
        let source = DocumentSource::new("bad.docx", SourceFormat::Docx, b"PK".to_vec());
        let err = read_document(&source, &FailingExtractor).unwrap_err();
        match err {
            MastliftError::ExtractionFailure { source_id, .. } => assert_eq!(source_id, "bad.docx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plain_text_lossy() {
        let units = PlainTextExtractor
            .extract_units(b"Tower \xff 30 m", SourceFormat::Txt)
            .unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].text.contains("30 m"));
    }

    #[test]
    fn test_from_file_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.odt");
        std::fs::write(&path, b"tower").unwrap();
        assert!(matches!(
            DocumentSource::from_file(&path, None),
            Err(MastliftError::UnsupportedFormat(_))
        ));
        let src = DocumentSource::from_file(&path, Some("txt")).unwrap();
        assert_eq!(src.format, SourceFormat::Txt);
        assert_eq!(src.bytes, b"tower");
    }

    #[test]
    fn test_from_file_missing_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.txt");
        let err = DocumentSource::from_file(&path, None).unwrap_err();
        match err {
            MastliftError::ExtractionFailure { source_id, .. } => {
                assert_eq!(source_id, path.display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
