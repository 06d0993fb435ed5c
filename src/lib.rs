//! # pdfoutline
//!
//! Heuristic document outline extraction for PDF papers.
//!
//! This library reads a PDF, reconstructs its visual lines with font and
//! position metadata, and infers the document title plus a three-level
//! heading outline (H1/H2/H3) from typography: font prominence, boldness,
//! numbering patterns, and page position.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = outline_file("paper.pdf")?;
//!     println!("{}", result.to_json(JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Title detection**: largest bold text on page 1, with multi-line
//!   titles joined, plus a configurable allow-list of known titles
//! - **Heading classification**: numbered ("2.1 Methods"), named
//!   ("Abstract", "References"), and style-based headings
//! - **Noise suppression**: page numbers, review watermarks, author
//!   metadata, citations, and equations never become headings
//! - **Deterministic output**: identical input lines always yield the
//!   same outline, regardless of input order

pub mod error;
pub mod extract;
pub mod model;
pub mod outline;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::LineExtractor;
pub use model::{BBox, DocumentOutline, HeadingLevel, JsonFormat, LineRecord, OutlineEntry};
pub use outline::{OutlineConfig, OutlineExtractor};

use std::path::Path;

/// Extract the title and heading outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let result = outline_file("paper.pdf").unwrap();
/// println!("{} ({} headings)", result.title, result.outline.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    outline_file_with_config(path, OutlineConfig::default())
}

/// Extract the outline of a PDF file with a custom configuration.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{outline_file_with_config, OutlineConfig};
///
/// let config = OutlineConfig::new().with_indent_tolerance(30.0);
/// let result = outline_file_with_config("paper.pdf", config).unwrap();
/// ```
pub fn outline_file_with_config<P: AsRef<Path>>(
    path: P,
    config: OutlineConfig,
) -> Result<DocumentOutline> {
    let lines = LineExtractor::open(path)?.extract_lines()?;
    OutlineExtractor::with_config(config).extract(lines)
}

/// Extract the outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<DocumentOutline> {
    outline_bytes_with_config(data, OutlineConfig::default())
}

/// Extract the outline of in-memory PDF data with a custom configuration.
pub fn outline_bytes_with_config(data: &[u8], config: OutlineConfig) -> Result<DocumentOutline> {
    let lines = LineExtractor::from_bytes(data)?.extract_lines()?;
    OutlineExtractor::with_config(config).extract(lines)
}

/// Extract the outline from pre-extracted line records.
///
/// Useful when the line records come from another text extraction stage
/// (or from a JSON dump) rather than from [`LineExtractor`].
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{outline_lines, LineRecord};
///
/// let lines: Vec<LineRecord> =
///     serde_json::from_str(&std::fs::read_to_string("lines.json").unwrap()).unwrap();
/// let result = outline_lines(lines).unwrap();
/// ```
pub fn outline_lines(lines: Vec<LineRecord>) -> Result<DocumentOutline> {
    OutlineExtractor::new().extract(lines)
}

/// Extract the outline from line records with a custom configuration.
pub fn outline_lines_with_config(
    lines: Vec<LineRecord>,
    config: OutlineConfig,
) -> Result<DocumentOutline> {
    OutlineExtractor::with_config(config).extract(lines)
}
