//! The document text extractor: opens a PDF and emits one [`LineRecord`]
//! per rendered visual line, with font and position metadata.
//!
//! Failure to open a document is an error; a document that opens but has
//! no text yields an empty record list. The outline core treats both the
//! same way, but callers (the batch driver) report them differently.

mod content;

use std::collections::HashMap;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{BBox, LineRecord};

use content::{collect_spans, RawSpan};

/// PDF magic bytes.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Default page height in points when no MediaBox is present (A4).
const DEFAULT_PAGE_HEIGHT: f32 = 842.0;

/// Extracts line records from a PDF document.
pub struct LineExtractor {
    doc: LopdfDocument,
}

impl LineExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let header = {
            use std::io::Read;
            let mut file = std::fs::File::open(path)?;
            let mut buf = [0u8; 8];
            let n = file.read(&mut buf)?;
            buf[..n].to_vec()
        };
        if !header.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Open a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !data.starts_with(PDF_MAGIC) {
            return Err(Error::UnknownFormat);
        }
        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Extract line records for all pages, in page order.
    ///
    /// Pages whose content streams fail to decode are skipped with a
    /// warning; a document with no text yields an empty list.
    pub fn extract_lines(&self) -> Result<Vec<LineRecord>> {
        let mut records = Vec::new();
        for (page_num, page_id) in self.doc.get_pages() {
            match self.page_lines(page_num, page_id) {
                Ok(mut lines) => records.append(&mut lines),
                Err(e) => {
                    log::warn!("skipping page {}: {}", page_num, e);
                }
            }
        }
        Ok(records)
    }

    /// Extract the line records of one page.
    fn page_lines(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<LineRecord>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // Resolve resource names to their BaseFont names once per page.
        let mut base_names = HashMap::new();
        for (name, font) in &fonts {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            base_names.insert(name.clone(), base);
        }

        let content = match self.page_content(page_id)? {
            Some(content) => content,
            // A page without content streams simply has no text.
            None => return Ok(Vec::new()),
        };

        let spans = collect_spans(&self.doc, &content, &fonts, &base_names)?;
        let page_height = self.page_height(page_id);
        Ok(group_into_lines(spans, page_num, page_height))
    }

    /// Concatenated content stream bytes for a page, or `None` when the
    /// page carries no content.
    fn page_content(&self, page_id: ObjectId) -> Result<Option<Vec<u8>>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(None),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    let data = s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()))?;
                    return Ok(Some(data));
                }
                Err(Error::PdfParse("invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut data = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(part) = s.decompressed_content() {
                                data.extend_from_slice(&part);
                                data.push(b' ');
                            }
                        }
                    }
                }
                Ok(Some(data))
            }
            Object::Stream(s) => {
                let data = s
                    .decompressed_content()
                    .map_err(|e| Error::PdfParse(e.to_string()))?;
                Ok(Some(data))
            }
            _ => Err(Error::PdfParse("invalid content stream".to_string())),
        }
    }

    /// Page height from the MediaBox, defaulting to A4.
    fn page_height(&self, page_id: ObjectId) -> f32 {
        let media_box = self
            .doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(b"MediaBox").ok())
            .and_then(|obj| self.resolve_array(obj));

        match media_box {
            Some(values) if values.len() == 4 => values[3] - values[1],
            _ => DEFAULT_PAGE_HEIGHT,
        }
    }

    fn resolve_array(&self, obj: &Object) -> Option<Vec<f32>> {
        let arr = match obj {
            Object::Array(arr) => arr.clone(),
            Object::Reference(r) => match self.doc.get_object(*r).ok()? {
                Object::Array(arr) => arr.clone(),
                _ => return None,
            },
            _ => return None,
        };
        arr.iter()
            .map(|o| match o {
                Object::Integer(i) => Some(*i as f32),
                Object::Real(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

/// Group spans sharing a baseline into visual lines and convert them to
/// top-left-origin line records.
///
/// Spans are sorted top-to-bottom; a span joins the current line when its
/// baseline is within 30% of its font size of the line's first span, so
/// sub-point baseline jitter does not split a line. Each line's spans are
/// ordered left-to-right again before joining, since the vertical sort
/// says nothing about horizontal order within a jittered line.
fn group_into_lines(mut spans: Vec<RawSpan>, page_num: u32, page_height: f32) -> Vec<LineRecord> {
    if spans.is_empty() {
        return Vec::new();
    }

    spans.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut lines = Vec::new();
    let mut current: Vec<RawSpan> = Vec::new();

    for span in spans {
        let same_line = current
            .first()
            .map(|first| (span.y - first.y).abs() <= span.font_size * 0.3)
            .unwrap_or(false);
        if !same_line && !current.is_empty() {
            if let Some(record) = line_record(&current, page_num, page_height) {
                lines.push(record);
            }
            current.clear();
        }
        current.push(span);
    }
    if let Some(record) = line_record(&current, page_num, page_height) {
        lines.push(record);
    }

    lines
}

/// Build one line record from the spans of a visual line.
///
/// Font name and size come from the leftmost span, which is accurate for
/// the single-style lines headings are.
fn line_record(spans: &[RawSpan], page_num: u32, page_height: f32) -> Option<LineRecord> {
    let mut spans: Vec<&RawSpan> = spans.iter().collect();
    spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    let first = *spans.first()?;

    let mut text = String::new();
    for (i, span) in spans.iter().enumerate() {
        if i > 0 && !text.ends_with(' ') && !span.text.starts_with(' ') {
            // Spans split mid-line get a space when there is a real gap.
            let prev = spans[i - 1];
            if span.x - (prev.x + prev.width()) > prev.font_size * 0.1 {
                text.push(' ');
            }
        }
        text.push_str(&span.text);
    }
    let text: String = text.nfc().collect::<String>().trim().to_string();
    if text.is_empty() {
        return None;
    }

    let x0 = spans
        .iter()
        .map(|s| s.x)
        .fold(f32::INFINITY, f32::min);
    let x1 = spans
        .iter()
        .map(|s| s.x + s.width())
        .fold(f32::NEG_INFINITY, f32::max);
    let top = spans.iter().map(|s| s.top()).fold(f32::NEG_INFINITY, f32::max);
    let bottom = spans.iter().map(|s| s.bottom()).fold(f32::INFINITY, f32::min);

    // Flip the PDF bottom-up axis into top-left-origin coordinates.
    let bbox = BBox::new(x0, page_height - top, x1, page_height - bottom);

    Some(LineRecord::new(
        text,
        first.font_name.clone(),
        first.font_size,
        bbox,
        page_num,
    ))
}
