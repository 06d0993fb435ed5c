//! Outline assembly: orchestrates profiling, title detection, and
//! per-line classification into the final document result.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::{DocumentOutline, HeadingLevel, LineRecord, OutlineEntry};
use crate::outline::classify::HeadingClassifier;
use crate::outline::config::OutlineConfig;
use crate::outline::fonts::FontProfile;
use crate::outline::patterns::LinePatterns;
use crate::outline::title::{detect_title, UNTITLED};

/// Named headings canonicalized to a fixed display form when the source
/// line carries trailing content ("Keywords: svm, kernels" -> "Keywords").
const CANONICAL_HEADINGS: [(&str, &str); 6] = [
    ("abstract", "Abstract"),
    ("keywords:", "Keywords"),
    ("acknowledgement", "Acknowledgement"),
    ("conflict of interest", "Conflict of interest"),
    ("declaration of interests", "Declaration of interests"),
    ("references", "References"),
];

/// Extracts a `(title, outline)` result from the line records of one
/// document.
///
/// Processing is a bounded, deterministic sequence of passes: sort into
/// reading order, build the font profile, detect the title, then classify
/// each line once. Input order does not affect the output.
pub struct OutlineExtractor {
    config: OutlineConfig,
    patterns: LinePatterns,
}

impl OutlineExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(OutlineConfig::default())
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            config,
            patterns: LinePatterns::new(),
        }
    }

    /// Extract the outline for one document.
    ///
    /// Empty input yields the degenerate untitled result. Records that fail
    /// schema validation are an error for the whole document.
    pub fn extract(&self, mut lines: Vec<LineRecord>) -> Result<DocumentOutline> {
        for line in &lines {
            line.validate()?;
        }
        if lines.is_empty() {
            return Ok(DocumentOutline::untitled());
        }

        // Reading order: page ascending, then vertical position.
        lines.sort_by(|a, b| {
            a.page.cmp(&b.page).then_with(|| {
                a.bbox
                    .y0
                    .partial_cmp(&b.bbox.y0)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        let profile = FontProfile::build(&lines, &self.config);
        let title = detect_title(&lines, &profile, &self.patterns, &self.config);
        let title_lower = title.to_lowercase();
        let classifier = HeadingClassifier::new(&profile, &self.patterns, &self.config);

        let mut outline = Vec::new();
        let mut seen: HashSet<(String, HeadingLevel, u32)> = HashSet::new();

        for line in &lines {
            let text = line.text.trim();

            if self.patterns.has_watermark_marker(text) {
                continue;
            }
            if title != UNTITLED && text.to_lowercase() == title_lower {
                continue;
            }
            if self.patterns.is_pure_number(text) {
                continue;
            }

            let Some(level) = classifier.classify(line) else {
                continue;
            };

            let cleaned = self.clean_heading_text(text);
            if cleaned.chars().count() < 3 {
                continue;
            }

            let key = (cleaned.clone(), level, line.page);
            if !seen.insert(key) {
                continue;
            }

            log::debug!("{} heading on page {}: {:?}", level, line.page, cleaned);
            outline.push(OutlineEntry::new(level, cleaned, line.page));
        }

        Ok(DocumentOutline { title, outline })
    }

    /// Strip numbering prefixes or canonicalize known named headings.
    fn clean_heading_text(&self, text: &str) -> String {
        if let Some((_, rest)) = self.patterns.numbered_heading(text) {
            return rest.trim().to_string();
        }

        let lower = text.to_lowercase();
        if text.split_whitespace().count() > 1 {
            for (prefix, display) in CANONICAL_HEADINGS {
                if lower.starts_with(prefix) {
                    return display.to_string();
                }
            }
        }
        text.to_string()
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}
