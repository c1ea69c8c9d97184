//! Text extraction from PDF and Word documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentFormat;
use docx_rs::{read_docx, DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::panic;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Text of one uploaded document, already normalized for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub source_format: DocumentFormat,
    pub normalized_text: String,
}

pub trait TextExtractor {
    /// Raw text of the document, in document order
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(ScreenerError::Extraction("PDF document is empty (0 bytes)".to_string()));
        }

        // pdf-extract understands ToUnicode maps and composite fonts, so it
        // goes first. lopdf only decodes simple font encodings.
        let primary = extract_with_pdf_extract(bytes);
        match &primary {
            Ok(text) if !text.trim().is_empty() => return Ok(text.clone()),
            Ok(_) => debug!("pdf-extract found no text, trying page-level extraction"),
            Err(e) => warn!("pdf-extract failed ({}), trying page-level extraction", e),
        }

        let document = match lopdf::Document::load_mem(bytes) {
            Ok(document) => document,
            Err(load_error) => {
                return match primary {
                    Ok(text) => {
                        warn!("PDF has no extractable text; treating as image-only");
                        Ok(text)
                    }
                    Err(e) => Err(ScreenerError::Extraction(format!(
                        "Failed to load PDF. pdf-extract: {}; lopdf: {}",
                        e, load_error
                    ))),
                };
            }
        };

        if uses_composite_fonts(&document) {
            // lopdf renders these as placeholder text instead of failing
            return match primary {
                Ok(text) => {
                    warn!("PDF uses composite fonts and no text could be decoded");
                    Ok(text)
                }
                Err(e) => Err(ScreenerError::Extraction(format!(
                    "Failed to extract text from PDF with composite fonts: {}",
                    e
                ))),
            };
        }

        let text = self.extract_pages(&document)?;
        if text.trim().is_empty() {
            warn!("PDF has no extractable text; treating as image-only");
        }
        Ok(text)
    }
}

impl PdfExtractor {
    /// Concatenate page text in page order; pages without text add nothing
    fn extract_pages(&self, document: &lopdf::Document) -> Result<String> {
        let pages = document.get_pages();
        let mut text = String::new();

        for page_number in pages.keys() {
            let page_text = document.extract_text(&[*page_number]).map_err(|e| {
                ScreenerError::Extraction(format!("Failed to extract text from page {}: {}", page_number, e))
            })?;

            if page_text.trim().is_empty() {
                debug!("Page {} has no extractable text", page_number);
                continue;
            }
            text.push_str(&page_text);
        }

        info!("Extracted {} characters from {} PDF pages", text.len(), pages.len());
        Ok(text)
    }
}

/// pdf-extract panics on some malformed inputs; those become ordinary errors
fn extract_with_pdf_extract(bytes: &[u8]) -> std::result::Result<String, String> {
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(format!("parser panicked: {}", reason))
        }
    }
}

/// Type0 (CID-keyed) fonts, e.g. `Identity-H` encoded, which lopdf cannot decode
fn uses_composite_fonts(document: &lopdf::Document) -> bool {
    document.objects.values().any(|object| {
        object
            .as_dict()
            .ok()
            .and_then(|dict| dict.get(b"Subtype").ok())
            .and_then(|subtype| subtype.as_name().ok())
            .map_or(false, |name| name == b"Type0")
    })
}

pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = read_docx(bytes)
            .map_err(|e| ScreenerError::Extraction(format!("Failed to read Word document: {:?}", e)))?;

        let mut text = String::new();
        let mut paragraphs = 0;
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                text.push_str(&paragraph_text(paragraph));
                text.push('\n');
                paragraphs += 1;
            }
        }

        info!("Extracted {} characters from {} Word paragraphs", text.len(), paragraphs);
        Ok(text)
    }
}

/// Paragraph → Run → Text; runs are parts of the same line and join with no separator
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

/// Runs nested in hyperlinks and tracked insertions read in document order
fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, text),
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run_text(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Extract and normalize a document held in memory
pub fn extract_bytes(format: DocumentFormat, bytes: &[u8]) -> Result<ExtractedDocument> {
    let raw = match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes)?,
        DocumentFormat::Word => WordExtractor.extract(bytes)?,
    };

    Ok(ExtractedDocument {
        source_format: format,
        normalized_text: normalize_text(&raw),
    })
}

/// Fold typography and diacritics to ASCII, then lowercase
pub fn normalize_text(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect();

    folded
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
