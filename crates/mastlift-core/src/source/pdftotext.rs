use crate::error::MastliftError;
use crate::source::{SourceFormat, TextExtractor, TextUnit};
use std::io::Write;
use std::process::Command;

/// Runs poppler's `pdftotext -layout` so table rows in proposals stay on one
/// line. Each page becomes one unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdftotextExtractor;

impl TextExtractor for PdftotextExtractor {
    fn extract_units(
        &self,
        bytes: &[u8],
        _format: SourceFormat,
    ) -> Result<Vec<TextUnit>, MastliftError> {
        // The temp file is removed when `tmpfile` drops, on every return path.
        let mut tmpfile = tempfile::NamedTempFile::new()?;
        tmpfile.write_all(bytes)?;
        tmpfile.flush()?;

        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    MastliftError::PdftotextNotFound
                } else {
                    MastliftError::Io(e)
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(MastliftError::PdftotextFailed { code, stderr });
        }

        Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages on form feed.
///
/// pdftotext terminates every page with `\x0c`, so the segment after the
/// last separator is dropped when it is blank.
fn split_pages(text: &str) -> Vec<TextUnit> {
    let mut pages: Vec<&str> = text.split('\x0c').collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }

    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| TextUnit {
            ordinal: i + 1,
            text: page.trim_end_matches('\n').to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_pages_drops_trailing_feed() {
        let pages = split_pages("Tower 30 m\n\x0cRRU 22 kg\n\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "Tower 30 m");
        assert_eq!(pages[1].ordinal, 2);
        assert_eq!(pages[1].text, "RRU 22 kg");
    }

    #[test]
    fn test_split_pages_keeps_blank_middle_page() {
        let pages = split_pages("one\x0c\x0cthree\x0c");
        assert_eq!(pages.len(), 3);
        assert!(pages[1].text.is_empty());
    }

    #[test]
    fn test_split_pages_without_feed() {
        let pages = split_pages("single page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "single page");
    }
}
