//! Font signatures and document-wide font profiling.
//!
//! A document's heading hierarchy is usually carried by a small number of
//! recurring font styles. This module scans all line records once, groups
//! them by style signature, and ranks the groups by prominence to infer
//! which styles correspond to H1, H2, and H3.

use std::collections::{HashMap, HashSet};

use crate::model::{HeadingLevel, LineRecord};
use crate::outline::config::OutlineConfig;

/// Font-name substrings that indicate a bold (or visually heavy) face.
const BOLD_MARKERS: [&str; 6] = ["bold", "black", "demi", "heavy", "condensed", "extrabold"];

/// Canonical bold predicate.
///
/// A font counts as bold when its name contains any of the common heavy-face
/// markers, case-insensitively. This is the single definition used by every
/// stage; absence of "roman" in the name is deliberately NOT treated as bold.
pub fn is_bold_font(font_name: &str) -> bool {
    let lower = font_name.to_lowercase();
    BOLD_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// A recurring font style: name, size rounded to one decimal, boldness.
///
/// The rounded size is stored in tenths of a point so signatures are `Eq`
/// and hashable. Signatures compare structurally, never by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSignature {
    /// Font name as reported by the document
    pub name: String,
    /// Font size in tenths of a point (12.3pt -> 123)
    pub size_tenths: i32,
    /// Whether the face is bold per [`is_bold_font`]
    pub bold: bool,
}

impl FontSignature {
    /// Build the signature for a line record.
    pub fn of(line: &LineRecord) -> Self {
        Self {
            name: line.font_name.clone(),
            size_tenths: (line.font_size * 10.0).round() as i32,
            bold: is_bold_font(&line.font_name),
        }
    }

    /// Rounded size in points.
    pub fn size(&self) -> f32 {
        self.size_tenths as f32 / 10.0
    }
}

/// Expected style for one heading level.
#[derive(Debug, Clone, Default)]
pub struct LevelStyle {
    /// Representative signature, when a matching style group was found
    pub signature: Option<FontSignature>,
    /// Size threshold for the level
    pub size: f32,
    /// Expected left indentation for the level
    pub x0_min: f32,
}

/// Document-wide font statistics, built once per document and read-only
/// thereafter.
#[derive(Debug, Clone, Default)]
pub struct FontProfile {
    /// Largest rounded font size in the document
    pub max_font_size: f32,
    /// Most common mid-range font size (body text baseline)
    pub body_font_size: f32,
    /// Smallest x0 seen (left margin proxy)
    pub min_x0: f32,
    /// Expected styles for H1, H2, H3
    levels: [LevelStyle; 3],
}

/// Accumulated statistics for one signature group.
struct StyleGroup {
    signature: FontSignature,
    count: usize,
    pages: HashSet<u32>,
    sum_y0: f64,
    sum_x0: f64,
    has_watermark_text: bool,
}

/// A scored heading-style candidate.
struct StyleCandidate {
    signature: FontSignature,
    score: f32,
    avg_x0: f32,
}

impl FontProfile {
    /// Expected style for a heading level.
    pub fn level(&self, level: HeadingLevel) -> &LevelStyle {
        &self.levels[level.index()]
    }

    /// Whether a signature matches any inferred level style.
    pub fn matches_any_level(&self, sig: &FontSignature) -> bool {
        self.levels
            .iter()
            .any(|style| style.signature.as_ref() == Some(sig))
    }

    /// Build the profile from all line records of one document.
    ///
    /// Pure function of its input: scans the records once, infers the body
    /// font size, and assigns up to three heading styles by prominence.
    /// Empty input yields the default (empty) profile.
    pub fn build(lines: &[LineRecord], config: &OutlineConfig) -> FontProfile {
        let mut profile = FontProfile::default();
        if lines.is_empty() {
            return profile;
        }

        let mut size_counts: HashMap<i32, usize> = HashMap::new();
        let mut groups: HashMap<FontSignature, StyleGroup> = HashMap::new();
        let mut min_x0 = f32::INFINITY;
        let mut max_tenths = 0i32;
        let mut pages = HashSet::new();

        for line in lines {
            let sig = FontSignature::of(line);
            max_tenths = max_tenths.max(sig.size_tenths);
            min_x0 = min_x0.min(line.bbox.x0);
            *size_counts.entry(sig.size_tenths).or_insert(0) += 1;
            pages.insert(line.page);

            let group = groups.entry(sig.clone()).or_insert_with(|| StyleGroup {
                signature: sig,
                count: 0,
                pages: HashSet::new(),
                sum_y0: 0.0,
                sum_x0: 0.0,
                has_watermark_text: false,
            });
            group.count += 1;
            group.pages.insert(line.page);
            group.sum_y0 += line.bbox.y0 as f64;
            group.sum_x0 += line.bbox.x0 as f64;
            if line.text.to_lowercase().contains("journal pre-proof") {
                group.has_watermark_text = true;
            }
        }

        profile.max_font_size = max_tenths as f32 / 10.0;
        profile.min_x0 = min_x0;
        profile.body_font_size = body_font_size(&size_counts, profile.max_font_size, config);

        let page_count = pages.len();
        let (page_width, page_height) = page_extent(lines, config);

        let mut candidates: Vec<StyleCandidate> = Vec::new();
        for group in groups.values() {
            let size = group.signature.size();

            // Too small to be a heading.
            if size < (config.heading_min_size_ratio * profile.body_font_size).max(8.0) {
                continue;
            }
            // A running watermark is never a heading style, however prominent.
            if group.has_watermark_text {
                log::debug!("dropping watermark style {:?}", group.signature);
                continue;
            }
            // A style on most pages is a running element unless it is
            // exceptionally prominent.
            let ubiquitous = group.pages.len() as f32 > page_count as f32 * config.ubiquity_ratio;
            if ubiquitous
                && !(group.signature.bold
                    && size >= profile.max_font_size * config.prominence_size_ratio)
            {
                continue;
            }

            let avg_y0 = (group.sum_y0 / group.count as f64) as f32;
            let avg_x0 = (group.sum_x0 / group.count as f64) as f32;
            let score = size * 15.0
                + if group.signature.bold { 200.0 } else { 0.0 }
                - (avg_y0 / page_height) * 100.0
                - (avg_x0 / page_width) * 20.0
                + group.count as f32 * 0.05;

            candidates.push(StyleCandidate {
                signature: group.signature.clone(),
                score,
                avg_x0,
            });
        }

        // Highest score first; break score ties deterministically.
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.signature.size_tenths.cmp(&a.signature.size_tenths))
                .then_with(|| a.signature.name.cmp(&b.signature.name))
        });

        profile.assign_levels(&candidates, config);
        profile.fill_fallbacks(config);
        profile
    }

    /// Assign the top-scoring distinct styles to H1..H3.
    fn assign_levels(&mut self, candidates: &[StyleCandidate], config: &OutlineConfig) {
        let mut assigned = 0usize;
        for candidate in candidates {
            if assigned >= 3 {
                break;
            }
            if assigned > 0 {
                // A deeper level must be clearly smaller than the previous
                // one, or differ in face, so near-identical styles don't
                // occupy two levels.
                let prev = &self.levels[assigned - 1];
                let distinct = match prev.signature.as_ref() {
                    Some(prev_sig) => {
                        candidate.signature.size() < prev.size * config.distinct_size_ratio
                            || candidate.signature.name != prev_sig.name
                            || candidate.signature.bold != prev_sig.bold
                    }
                    None => true,
                };
                if !distinct {
                    continue;
                }
            }

            log::debug!(
                "assigned {:?} to level {}",
                candidate.signature,
                HeadingLevel::ALL[assigned]
            );
            self.levels[assigned] = LevelStyle {
                size: candidate.signature.size(),
                x0_min: candidate.avg_x0,
                signature: Some(candidate.signature.clone()),
            };
            assigned += 1;
        }
    }

    /// Fill size and indentation defaults for levels without an inferred
    /// style, keeping sizes non-increasing and indents non-decreasing.
    fn fill_fallbacks(&mut self, config: &OutlineConfig) {
        if self.levels[0].signature.is_none() {
            self.levels[0].size = if self.max_font_size > 0.0 {
                self.max_font_size * 0.9
            } else {
                18.0
            };
            self.levels[0].x0_min = if self.min_x0.is_finite() {
                self.min_x0
            } else {
                0.0
            };
        }
        for i in 1..3 {
            if self.levels[i].signature.is_none() {
                self.levels[i].size = self.levels[i - 1].size * config.fallback_size_ratio;
                self.levels[i].x0_min = self.levels[i - 1].x0_min + 10.0;
            }
        }
    }
}

/// The most frequent rounded size strictly between 6pt and 95% of the
/// maximum; defaults when no such size exists.
fn body_font_size(size_counts: &HashMap<i32, usize>, max_size: f32, config: &OutlineConfig) -> f32 {
    let upper = max_size * 0.95;
    let mut best: Option<(i32, usize)> = None;
    let mut keys: Vec<i32> = size_counts.keys().copied().collect();
    keys.sort_unstable();
    for tenths in keys {
        let size = tenths as f32 / 10.0;
        if size <= 6.0 || size >= upper {
            continue;
        }
        let count = size_counts[&tenths];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((tenths, count));
        }
    }
    best.map(|(tenths, _)| tenths as f32 / 10.0)
        .unwrap_or(config.default_body_size)
}

/// Page extent proxy: the first record's far corner when it sits on page 1
/// with positive extents, otherwise the configured default page size.
fn page_extent(lines: &[LineRecord], config: &OutlineConfig) -> (f32, f32) {
    if let Some(first) = lines.first() {
        if first.page == 1 && first.bbox.x1 > 0.0 && first.bbox.y1 > 0.0 {
            return (first.bbox.x1, first.bbox.y1);
        }
    }
    (config.default_page_width, config.default_page_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn line(text: &str, font: &str, size: f32, x0: f32, y0: f32, page: u32) -> LineRecord {
        LineRecord::new(
            text,
            font,
            size,
            BBox::new(x0, y0, x0 + 200.0, y0 + size),
            page,
        )
    }

    #[test]
    fn test_bold_predicate() {
        assert!(is_bold_font("Times-Bold"));
        assert!(is_bold_font("Arial-Black"));
        assert!(is_bold_font("FranklinGothic-Demi"));
        assert!(is_bold_font("Helvetica-ExtraBold"));
        assert!(!is_bold_font("Times-Roman"));
        assert!(!is_bold_font("Helvetica"));
        // "roman" absence alone is not boldness
        assert!(!is_bold_font("CMR10"));
    }

    #[test]
    fn test_signature_rounding() {
        let rec = line("x", "Helvetica", 11.96, 0.0, 0.0, 1);
        let sig = FontSignature::of(&rec);
        assert_eq!(sig.size_tenths, 120);
        assert_eq!(sig.size(), 12.0);
    }

    #[test]
    fn test_empty_profile() {
        let profile = FontProfile::build(&[], &OutlineConfig::default());
        assert_eq!(profile.max_font_size, 0.0);
        assert!(profile.level(HeadingLevel::H1).signature.is_none());
    }

    #[test]
    fn test_body_size_most_common_midrange() {
        let config = OutlineConfig::default();
        let mut lines = Vec::new();
        for i in 0..50 {
            lines.push(line("body text here", "Times-Roman", 10.0, 72.0, 100.0 + i as f32, 1));
        }
        lines.push(line("A Large Title Line", "Times-Bold", 20.0, 72.0, 40.0, 1));
        let profile = FontProfile::build(&lines, &config);
        assert_eq!(profile.body_font_size, 10.0);
        assert_eq!(profile.max_font_size, 20.0);
    }

    #[test]
    fn test_level_ordering_invariant() {
        let config = OutlineConfig::default();
        let mut lines = Vec::new();
        // Body text on three pages keeps heading styles non-ubiquitous.
        for page in 1..=4 {
            for i in 0..30 {
                lines.push(line("body", "Times-Roman", 10.0, 72.0, 200.0 + i as f32 * 12.0, page));
            }
        }
        lines.push(line("Top Heading", "Times-Bold", 18.0, 72.0, 60.0, 1));
        lines.push(line("Second Heading", "Times-Bold", 14.0, 82.0, 90.0, 2));
        lines.push(line("Third Heading", "Times-Bold", 12.0, 92.0, 120.0, 3));

        let profile = FontProfile::build(&lines, &config);
        let h1 = profile.level(HeadingLevel::H1);
        let h2 = profile.level(HeadingLevel::H2);
        let h3 = profile.level(HeadingLevel::H3);

        assert!(h1.size >= h2.size);
        assert!(h2.size >= h3.size);
        assert!(h1.x0_min <= h2.x0_min);
        assert!(h2.x0_min <= h3.x0_min);
    }

    #[test]
    fn test_watermark_style_never_assigned() {
        let config = OutlineConfig::default();
        let mut lines = Vec::new();
        for page in 1..=5 {
            lines.push(line("Journal Pre-proof", "Helvetica-Bold", 22.0, 72.0, 30.0, page));
            for i in 0..20 {
                lines.push(line("body", "Times-Roman", 10.0, 72.0, 200.0 + i as f32 * 12.0, page));
            }
        }
        lines.push(line("Introduction", "Times-Bold", 14.0, 72.0, 100.0, 2));

        let profile = FontProfile::build(&lines, &config);
        for level in HeadingLevel::ALL {
            if let Some(sig) = &profile.level(level).signature {
                assert_ne!(sig.name, "Helvetica-Bold");
            }
        }
    }

    #[test]
    fn test_ubiquitous_style_needs_prominence() {
        let config = OutlineConfig::default();
        let mut lines = Vec::new();
        // A small header style on every page must not become a heading style.
        for page in 1..=5 {
            lines.push(line("Running Header", "Times-Bold", 9.5, 72.0, 20.0, page));
            for i in 0..20 {
                lines.push(line("body", "Times-Roman", 10.0, 72.0, 200.0 + i as f32 * 12.0, page));
            }
        }
        lines.push(line("A Real Heading", "Arial-Bold", 16.0, 72.0, 100.0, 2));

        let profile = FontProfile::build(&lines, &config);
        let h1 = profile.level(HeadingLevel::H1).signature.as_ref().unwrap();
        assert_eq!(h1.name, "Arial-Bold");
    }

    #[test]
    fn test_fallback_sizes_when_no_styles() {
        let config = OutlineConfig::default();
        // Only tiny text: no group survives the size filter.
        let lines: Vec<LineRecord> = (0..10)
            .map(|i| line("tiny", "Times-Roman", 5.0, 72.0, 100.0 + i as f32, 1))
            .collect();
        let profile = FontProfile::build(&lines, &config);

        let h1 = profile.level(HeadingLevel::H1);
        let h2 = profile.level(HeadingLevel::H2);
        let h3 = profile.level(HeadingLevel::H3);
        assert!((h1.size - 5.0 * 0.9).abs() < 0.01);
        assert!((h2.size - h1.size * 0.85).abs() < 0.01);
        assert!((h3.size - h2.size * 0.85).abs() < 0.01);
        assert_eq!(h1.x0_min, 72.0);
        assert_eq!(h2.x0_min, 82.0);
        assert_eq!(h3.x0_min, 92.0);
    }
}
