//! Per-line heading classification.
//!
//! The classifier is a pure, stateless, order-sensitive cascade: an ordered
//! list of named rejection rules runs first, then the classification stages
//! (numbered section, named heading, style fallback). The first rule or
//! stage that reaches a terminal decision wins.

use crate::model::{HeadingLevel, LineRecord};
use crate::outline::config::OutlineConfig;
use crate::outline::fonts::{FontProfile, FontSignature};
use crate::outline::patterns::LinePatterns;

/// Section names allowed to end in a period despite sentence length.
const SENTENCE_EXEMPT_PREFIXES: [&str; 4] = [
    "abstract",
    "introduction",
    "results",
    "discussion and conclusion",
];

/// Fixed heading vocabularies per level, compared after normalization.
const NAMED_H1: [&str; 7] = [
    "abstract",
    "introduction",
    "results",
    "discussion and conclusion",
    "acknowledgement",
    "references",
    "appendix",
];
const NAMED_H2: [&str; 5] = [
    "materials and method",
    "related work",
    "experimental setup",
    "data and implementation",
    "conclusion",
];
const NAMED_H3: [&str; 3] = ["keywords", "conflict of interest", "declaration of interests"];

/// Word-count caps for the style-fallback stage, per level.
const FALLBACK_WORD_CAPS: [(HeadingLevel, usize); 3] = [
    (HeadingLevel::H1, 10),
    (HeadingLevel::H2, 15),
    (HeadingLevel::H3, 20),
];

/// Pre-computed per-line facts handed to each rule.
struct LineFacts<'t> {
    text: &'t str,
    words: usize,
    page: u32,
    x0: f32,
    size: f32,
    bold: bool,
    signature: FontSignature,
}

/// Classifies a single line as `None` or one of H1/H2/H3.
pub struct HeadingClassifier<'a> {
    profile: &'a FontProfile,
    patterns: &'a LinePatterns,
    config: &'a OutlineConfig,
}

impl<'a> HeadingClassifier<'a> {
    /// Create a classifier over a built font profile.
    pub fn new(
        profile: &'a FontProfile,
        patterns: &'a LinePatterns,
        config: &'a OutlineConfig,
    ) -> Self {
        Self {
            profile,
            patterns,
            config,
        }
    }

    /// Classify one line. Pure function of the line and the profile.
    pub fn classify(&self, line: &LineRecord) -> Option<HeadingLevel> {
        let text = line.text.trim();
        let facts = LineFacts {
            text,
            words: text.split_whitespace().count(),
            page: line.page,
            x0: line.bbox.x0,
            size: line.rounded_size(),
            bold: FontSignature::of(line).bold,
            signature: FontSignature::of(line),
        };

        if let Some(rule) = self.rejection_reason(&facts) {
            log::trace!("rejected by {}: {:?}", rule, text);
            return None;
        }

        // Numbered sections are terminal: a numbered line that fails the
        // style or indentation requirement is not a heading at all.
        if let Some((prefix, _)) = self.patterns.numbered_heading(text) {
            return self.classify_numbered(&facts, prefix);
        }

        if let Some(level) = self.classify_named(&facts) {
            return Some(level);
        }

        self.classify_by_style(&facts)
    }

    /// Run the ordered rejection rules; returns the name of the first rule
    /// that fires.
    fn rejection_reason(&self, facts: &LineFacts<'_>) -> Option<&'static str> {
        let p = self.patterns;
        let rules: [(&'static str, &dyn Fn(&LineFacts<'_>) -> bool); 9] = [
            ("empty-or-short", &|f| f.text.is_empty() || f.text.chars().count() < 3),
            // Long lines are body text unless explicitly numbered.
            ("too-many-words", &|f| {
                f.words > 20 && p.numbered_heading(f.text).is_none()
            }),
            ("page-number", &|f| f.page > 1 && p.is_pure_number(f.text)),
            ("page-label", &|f| p.is_page_label(f.text)),
            ("watermark", &|f| p.has_watermark_marker(f.text)),
            ("metadata", &|f| p.is_metadata_line(f.text)),
            ("math-expression", &|f| p.is_math_expression(f.text)),
            ("citation", &|f| {
                p.is_bracket_citation(f.text)
                    || (f.words < 20 && p.has_author_year_citation(f.text))
            }),
            ("sentence", &|f| {
                f.text.ends_with('.')
                    && f.words > 5
                    && !sentence_exempt(f.text)
            }),
        ];

        rules
            .iter()
            .find(|(_, rule)| rule(facts))
            .map(|(name, _)| *name)
    }

    /// Stage 1: explicit section numbering ("2.1 Related Work").
    fn classify_numbered(&self, facts: &LineFacts<'_>, prefix: &str) -> Option<HeadingLevel> {
        let styled = facts.bold || self.profile.matches_any_level(&facts.signature);
        if facts.size < self.profile.body_font_size * self.config.level_size_ratio || !styled {
            return None;
        }

        let level = HeadingLevel::from_dot_count(prefix.matches('.').count());
        if self.indent_matches(facts.x0, level) {
            Some(level)
        } else {
            None
        }
    }

    /// Stage 2: fixed named headings ("Abstract", "References", ...).
    fn classify_named(&self, facts: &LineFacts<'_>) -> Option<HeadingLevel> {
        let normalized = normalize_heading_text(facts.text);
        let vocabularies: [(HeadingLevel, &[&str]); 3] = [
            (HeadingLevel::H1, &NAMED_H1),
            (HeadingLevel::H2, &NAMED_H2),
            (HeadingLevel::H3, &NAMED_H3),
        ];

        for (level, vocabulary) in vocabularies {
            if vocabulary.contains(&normalized.as_str())
                && facts.bold
                && facts.size >= self.profile.level(level).size * self.config.level_size_ratio
                && self.indent_matches(facts.x0, level)
            {
                return Some(level);
            }
        }
        None
    }

    /// Stage 3: fallback on the inferred level styles, shallowest first.
    fn classify_by_style(&self, facts: &LineFacts<'_>) -> Option<HeadingLevel> {
        for (level, max_words) in FALLBACK_WORD_CAPS {
            let style = self.profile.level(level);
            let style_match = style.signature.as_ref() == Some(&facts.signature)
                || (facts.bold && facts.size >= style.size * self.config.level_size_ratio);
            if style_match
                && facts.words < max_words
                && !facts.text.ends_with('.')
                && self.indent_matches(facts.x0, level)
            {
                return Some(level);
            }
        }
        None
    }

    fn indent_matches(&self, x0: f32, level: HeadingLevel) -> bool {
        (x0 - self.profile.level(level).x0_min).abs() < self.config.indent_tolerance
    }
}

/// Lower-case and strip trailing periods/colons for vocabulary comparison.
fn normalize_heading_text(text: &str) -> String {
    text.to_lowercase()
        .trim_end_matches(['.', ':', ' '])
        .to_string()
}

fn sentence_exempt(text: &str) -> bool {
    let lower = text.to_lowercase();
    SENTENCE_EXEMPT_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}
