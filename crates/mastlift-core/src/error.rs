use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MastliftError {
    #[error("unsupported format '{0}'. Supported formats: txt, docx, pdf")]
    UnsupportedFormat(String),

    #[error("could not extract text from {source_id}: {reason}")]
    ExtractionFailure { source_id: String, reason: String },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to read DOCX: {0}")]
    Docx(String),

    #[error("failed to load keyword table from {path}: {reason}")]
    KeywordTableLoad { path: PathBuf, reason: String },

    #[error("invalid keyword table: {0}")]
    KeywordTableInvalid(String),

    #[error("invalid lifting policy: {0}")]
    PolicyInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MastliftError {
    /// Attach a source identifier to a backend failure.
    ///
    /// Format errors pass through unchanged; everything else becomes an
    /// `ExtractionFailure` naming the offending input.
    pub fn for_source(self, source_id: &str) -> MastliftError {
        match self {
            MastliftError::UnsupportedFormat(_) | MastliftError::ExtractionFailure { .. } => self,
            other => MastliftError::ExtractionFailure {
                source_id: source_id.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_source_wraps_backend_errors() {
        let err = MastliftError::PdftotextFailed {
            code: 1,
            stderr: "Syntax Error".into(),
        }
        .for_source("proposal.pdf");
        match err {
            MastliftError::ExtractionFailure { source_id, reason } => {
                assert_eq!(source_id, "proposal.pdf");
                assert!(reason.contains("exit code 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_for_source_keeps_unsupported_format() {
        let err = MastliftError::UnsupportedFormat("xls".into()).for_source("a.xls");
        assert!(matches!(err, MastliftError::UnsupportedFormat(ref t) if t == "xls"));
    }
}
