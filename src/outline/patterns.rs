//! Compiled text patterns shared by title detection and classification.

use regex::Regex;

/// Watermark / manuscript boilerplate markers, matched case-insensitively
/// as substrings. Lines carrying these never reach the title or outline.
pub const WATERMARK_MARKERS: [&str; 5] = [
    "journal pre-proof",
    "highlights",
    "journal pre-print",
    "manuscript",
    "accepted manuscript",
];

/// Characters that typically open a formula or equation fragment.
const MATH_LEAD_CHARS: &str = "([{}])+-*/=<>$€£%";

/// Pattern set for line-level suppression and classification.
///
/// Regexes are compiled once per pipeline, the same way the teacher-style
/// cleanup pipeline holds its patterns.
pub struct LinePatterns {
    numbered_heading: Regex,
    pure_number: Regex,
    page_label: Regex,
    metadata_prefix: Regex,
    numeric_year_fragment: Regex,
    email: Regex,
    institution: Regex,
    author_name: Regex,
    citation_bracket_numeric: Regex,
    citation_bracket_text: Regex,
    citation_author_year: Regex,
    latex_command: Regex,
    numeric_operator_start: Regex,
    equation_number: Regex,
    pure_numeric_fragment: Regex,
    caption_prefix: Regex,
    math_symbol: Regex,
}

impl LinePatterns {
    /// Compile the pattern set.
    pub fn new() -> Self {
        Self {
            // Numbered section prefix; tolerates one trailing dot so
            // "1. Introduction" parses the same as "1 Introduction".
            numbered_heading: Regex::new(r"^(\d+(?:\.\d+)*)\.?\s+(.*)$").unwrap(),
            pure_number: Regex::new(r"^\s*\d+\s*$").unwrap(),
            page_label: Regex::new(r"(?i)^(Page|Pg\.)\s+\d+\s*(of\s+\d+)?$").unwrap(),
            metadata_prefix: Regex::new(
                r"(?i)^(PII|DOI|Reference|Received date|Revised date|Accepted date):",
            )
            .unwrap(),
            numeric_year_fragment: Regex::new(r"^\s*\d+,\s*(\d{4}|\w+)\s*$").unwrap(),
            email: Regex::new(r"@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap(),
            institution: Regex::new(
                r"\b(University|Department|Institute|Queensland|Australia|Nigeria)\b",
            )
            .unwrap(),
            author_name: Regex::new(r"^[A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+$").unwrap(),
            citation_bracket_numeric: Regex::new(r"^\s*\[\d+\]\s*$").unwrap(),
            citation_bracket_text: Regex::new(r"^\s*\[[a-zA-Z\s.]+\]\s*$").unwrap(),
            citation_author_year: Regex::new(r"\([A-Za-z\s.]+,\s*\d{4}\)").unwrap(),
            latex_command: Regex::new(
                r"\\(sum|alpha|beta|gamma|cdot|mathbb|mathfrak|xi|eta|forall|in|infty|ge|le|pm|mu|sigma|tanh|log|exp|frac|partial|Delta|lambda|emptyset|mathbf|mathrm|text)\b",
            )
            .unwrap(),
            numeric_operator_start: Regex::new(r"^[\d.]+\s*[-+*/=]").unwrap(),
            equation_number: Regex::new(r"^\s*\(\s*\d+\s*\)\s*$").unwrap(),
            pure_numeric_fragment: Regex::new(r"^\s*\d+(\.\d+)*\s*$").unwrap(),
            caption_prefix: Regex::new(r"(?i)^(Figure|Table)\s*\d+[:.]").unwrap(),
            math_symbol: Regex::new(r"[\d+\-*/=<>$\\]").unwrap(),
        }
    }

    /// Split a numbered-section line into `(prefix, rest)`, e.g.
    /// `"2.1 Related Work"` -> `("2.1", "Related Work")`.
    pub fn numbered_heading<'t>(&self, text: &'t str) -> Option<(&'t str, &'t str)> {
        self.numbered_heading.captures(text).map(|caps| {
            (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            )
        })
    }

    /// A line that is purely a number (page number, bare counter).
    pub fn is_pure_number(&self, text: &str) -> bool {
        self.pure_number.is_match(text)
    }

    /// "Page N" / "Pg. N of M" running labels.
    pub fn is_page_label(&self, text: &str) -> bool {
        self.page_label.is_match(text)
    }

    /// Whether the text carries a watermark / manuscript marker.
    pub fn has_watermark_marker(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        WATERMARK_MARKERS.iter().any(|m| lower.contains(m))
    }

    /// Bibliographic metadata field prefix ("DOI:", "Received date:", ...).
    pub fn is_metadata_prefix(&self, text: &str) -> bool {
        self.metadata_prefix.is_match(text)
    }

    /// Contains an email address.
    pub fn has_email(&self, text: &str) -> bool {
        self.email.is_match(text)
    }

    /// Contains an inline `(Author, Year)` citation.
    pub fn has_author_year_citation(&self, text: &str) -> bool {
        self.citation_author_year.is_match(text)
    }

    /// Author / affiliation / metadata noise that never forms a heading.
    pub fn is_metadata_line(&self, text: &str) -> bool {
        self.metadata_prefix.is_match(text)
            || self.numeric_year_fragment.is_match(text)
            || self.email.is_match(text)
            || self.institution.is_match(text)
            || self.author_name.is_match(text)
    }

    /// A bare bracketed citation like `[12]` or `[Smith]`.
    pub fn is_bracket_citation(&self, text: &str) -> bool {
        self.citation_bracket_numeric.is_match(text) || self.citation_bracket_text.is_match(text)
    }

    /// Whether the text looks like a mathematical expression, equation
    /// number, or figure/table caption.
    pub fn is_math_expression(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        if self.latex_command.is_match(text) {
            return true;
        }

        // Leading operator/bracket/currency punctuation.
        if let Some(first) = text.chars().next() {
            if MATH_LEAD_CHARS.contains(first) {
                return true;
            }
        }

        if self.numeric_operator_start.is_match(text)
            || self.equation_number.is_match(text)
            || self.pure_numeric_fragment.is_match(text)
            || self.caption_prefix.is_match(text)
        {
            return true;
        }

        // Mostly digits and operators: a formula, not prose.
        let symbols = self.math_symbol.find_iter(text).count();
        symbols as f32 / (text.chars().count() + 1) as f32 > 0.4
    }
}

impl Default for LinePatterns {
    fn default() -> Self {
        Self::new()
    }
}
