use crate::error::MastliftError;
use crate::source::{SourceFormat, TextExtractor, TextUnit};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX backend: one text unit per non-empty `w:p` paragraph of the main
/// document part, table cells included, in document order.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract_units(
        &self,
        bytes: &[u8],
        _format: SourceFormat,
    ) -> Result<Vec<TextUnit>, MastliftError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| MastliftError::Docx(format!("not a DOCX container: {e}")))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| MastliftError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        parse_paragraphs(&xml)
    }

    fn backend_name(&self) -> &str {
        "docx"
    }
}

/// Paragraphs nest when a run holds a text box, so open paragraphs form a
/// stack; the inner one is emitted first and the outer keeps its own text.
fn parse_paragraphs(xml: &str) -> Result<Vec<TextUnit>, MastliftError> {
    let mut reader = Reader::from_str(xml);
    let mut units = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut run_depth = 0usize;
    // `w:tab` inside `w:pPr/w:tabs` is a tab stop definition, not content
    let mut tab_stops_depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| MastliftError::Docx(format!("malformed XML: {e}")))?;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"r" => run_depth += 1,
                b"tabs" => tab_stops_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let in_run = run_depth > 0 && tab_stops_depth == 0;
                let mark = match e.local_name().as_ref() {
                    b"tab" if in_run => Some('\t'),
                    b"br" | b"cr" if in_run => Some('\n'),
                    _ => None,
                };
                if let (Some(c), Some(current)) = (mark, open.last_mut()) {
                    current.push(c);
                }
            }
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| MastliftError::Docx(format!("bad text run: {e}")))?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"tabs" => tab_stops_depth = tab_stops_depth.saturating_sub(1),
                b"p" => {
                    if let Some(text) = open.pop() {
                        if !text.trim().is_empty() {
                            units.push(TextUnit {
                                ordinal: units.len() + 1,
                                text,
                            });
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(units)
}
