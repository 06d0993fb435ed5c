//! Content stream interpretation: walks text operators and produces
//! positioned spans in PDF user space (bottom-up y axis).

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// A text span with position and style, before line grouping.
#[derive(Debug, Clone)]
pub(super) struct RawSpan {
    pub text: String,
    /// Left edge, PDF user space
    pub x: f32,
    /// Baseline, PDF user space (bottom-up)
    pub y: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Resolved base font name
    pub font_name: String,
}

impl RawSpan {
    /// Approximate ascender above the baseline.
    pub fn top(&self) -> f32 {
        self.y + self.font_size * 0.8
    }

    /// Approximate descender below the baseline.
    pub fn bottom(&self) -> f32 {
        self.y - self.font_size * 0.2
    }

    /// Rough advance width: average glyph width of half the font size.
    pub fn width(&self) -> f32 {
        self.text.chars().count() as f32 * self.font_size * 0.5
    }
}

/// Text matrix state for tracking the drawing position.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        // Default leading when no TL was tracked.
        self.f -= 12.0 * self.d;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Walk a page's content stream and collect text spans.
///
/// `fonts` maps resource names to font dictionaries (for encodings);
/// `base_names` maps resource names to resolved BaseFont names.
pub(super) fn collect_spans(
    doc: &LopdfDocument,
    content: &[u8],
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    base_names: &HashMap<Vec<u8>, String>,
) -> Result<Vec<RawSpan>> {
    let content =
        lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut spans = Vec::new();
    let mut matrix = TextMatrix::default();
    let mut in_text = false;
    let mut resource_name: Vec<u8> = Vec::new();
    let mut font_name = String::new();
    let mut font_size: f32 = 12.0;

    for op in content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                matrix = TextMatrix::default();
            }
            "ET" => {
                in_text = false;
            }
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Object::Name(name) = &op.operands[0] {
                        resource_name = name.clone();
                        font_name = base_names
                            .get(name.as_slice())
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    }
                    font_size = number(&op.operands[1]).unwrap_or(12.0);
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = number(&op.operands[0]).unwrap_or(0.0);
                    let ty = number(&op.operands[1]).unwrap_or(0.0);
                    matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    matrix.set(
                        number(&op.operands[0]).unwrap_or(1.0),
                        number(&op.operands[1]).unwrap_or(0.0),
                        number(&op.operands[2]).unwrap_or(0.0),
                        number(&op.operands[3]).unwrap_or(1.0),
                        number(&op.operands[4]).unwrap_or(0.0),
                        number(&op.operands[5]).unwrap_or(0.0),
                    );
                }
            }
            "T*" => {
                matrix.next_line();
            }
            "Tj" | "TJ" => {
                if in_text {
                    let text = decode_show_text(doc, &op.operands, fonts, &resource_name);
                    push_span(&mut spans, text, &matrix, font_size, &font_name);
                }
            }
            "'" | "\"" => {
                matrix.next_line();
                if in_text {
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = op.operands.get(index) {
                        let text = decode_string(doc, fonts, &resource_name, bytes);
                        push_span(&mut spans, text, &matrix, font_size, &font_name);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(spans)
}

fn push_span(
    spans: &mut Vec<RawSpan>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font_name: &str,
) {
    if text.trim().is_empty() {
        return;
    }
    let (x, y) = matrix.position();
    spans.push(RawSpan {
        text,
        x,
        y,
        font_size: font_size * matrix.scale(),
        font_name: font_name.to_string(),
    });
}

/// Decode the operand of a Tj/TJ operator.
fn decode_show_text(
    doc: &LopdfDocument,
    operands: &[Object],
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    resource_name: &[u8],
) -> String {
    match operands.first() {
        // Tj: a single string.
        Some(Object::String(bytes, _)) => decode_string(doc, fonts, resource_name, bytes),
        // TJ: strings interleaved with kerning adjustments; a large
        // negative adjustment usually stands in for a word space.
        Some(Object::Array(items)) => {
            let mut combined = String::new();
            for item in items {
                match item {
                    Object::String(bytes, _) => {
                        combined.push_str(&decode_string(doc, fonts, resource_name, bytes));
                    }
                    Object::Integer(n) => {
                        maybe_push_space(&mut combined, -(*n as f32));
                    }
                    Object::Real(n) => {
                        maybe_push_space(&mut combined, -n);
                    }
                    _ => {}
                }
            }
            combined
        }
        _ => String::new(),
    }
}

/// Kerning adjustments beyond this (in 1/1000 text space units) are word
/// breaks.
const SPACE_ADJUSTMENT: f32 = 200.0;

fn maybe_push_space(combined: &mut String, adjustment: f32) {
    if adjustment > SPACE_ADJUSTMENT
        && !combined.is_empty()
        && !combined.ends_with(' ')
        && !combined.ends_with('\u{00A0}')
    {
        combined.push(' ');
    }
}

/// Decode a text string through the current font's encoding, falling back
/// to byte-level heuristics.
fn decode_string(
    doc: &LopdfDocument,
    fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    resource_name: &[u8],
    bytes: &[u8],
) -> String {
    let encoding = fonts
        .get(resource_name)
        .and_then(|font| font.get_font_encoding(doc).ok());

    if let Some(enc) = encoding {
        if let Ok(decoded) = LopdfDocument::decode_text(&enc, bytes) {
            return decoded;
        }
    }
    decode_text_simple(bytes)
}

/// Fallback decoding when no encoding is available: UTF-16BE with BOM,
/// then UTF-8, then Latin-1.
fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    bytes.iter().map(|&b| b as char).collect()
}

/// Extract a number from a PDF object.
fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
