//! Outline output types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Heading depth handled by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Deepest handled heading
    H3,
}

impl HeadingLevel {
    /// All levels, top first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Level for a numbered-section prefix with the given dot count
    /// ("2" -> 0 dots -> H1, "2.1" -> 1 dot -> H2, "2.1.1" -> H3).
    pub fn from_dot_count(dots: usize) -> Self {
        match dots {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Zero-based index into per-level arrays.
    pub fn index(&self) -> usize {
        match self {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeadingLevel::H1 => write!(f, "H1"),
            HeadingLevel::H2 => write!(f, "H2"),
            HeadingLevel::H3 => write!(f, "H3"),
        }
    }
}

/// A single heading in the extracted outline.
///
/// Entries are created by the assembler and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text after cleanup
    pub text: String,

    /// Page the heading appears on, 1-based
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// The extracted result for one document: a title plus an ordered outline.
///
/// Outline order is document reading order (page ascending, then vertical
/// position). No two entries share the same `(text, level, page)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Detected document title
    pub title: String,

    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentOutline {
    /// The degenerate result for documents with no usable text.
    pub fn untitled() -> Self {
        Self {
            title: "Untitled Document".to_string(),
            outline: Vec::new(),
        }
    }

    /// Check whether any headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Serialize to JSON in the output-contract shape.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };
        result.map_err(|e| Error::Serialize(e.to_string()))
    }
}

impl Default for DocumentOutline {
    fn default() -> Self {
        Self::untitled()
    }
}
