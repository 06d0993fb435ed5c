//! Document title detection.

use crate::model::LineRecord;
use crate::outline::config::OutlineConfig;
use crate::outline::fonts::{is_bold_font, FontProfile};
use crate::outline::patterns::LinePatterns;

/// Title used when the document has no usable text at all.
pub const UNTITLED: &str = "Untitled Document";

/// Title used when page 1 yields no plausible candidate.
pub const GENERIC_TITLE: &str = "Academic Paper (Generic Title)";

/// Detect the document title from the page-1 lines.
///
/// The configured `known_titles` allow-list is checked first; otherwise the
/// largest bold text high on page 1 is taken, with vertically adjacent,
/// identically sized, left-aligned continuation lines appended.
pub fn detect_title(
    lines: &[LineRecord],
    profile: &FontProfile,
    patterns: &LinePatterns,
    config: &OutlineConfig,
) -> String {
    if lines.is_empty() {
        return UNTITLED.to_string();
    }

    if let Some(known) = find_known_title(lines, profile, config) {
        return known;
    }

    let candidates = title_candidates(lines, profile, patterns, config);
    if candidates.is_empty() {
        log::debug!("no title candidate on page 1, using generic title");
        return GENERIC_TITLE.to_string();
    }

    assemble_title(&candidates)
}

/// Match page-1 lines against the configured allow-list of known titles.
fn find_known_title(
    lines: &[LineRecord],
    profile: &FontProfile,
    config: &OutlineConfig,
) -> Option<String> {
    if config.known_titles.is_empty() {
        return None;
    }

    for line in lines.iter().filter(|l| l.page == 1) {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }
        let lower = text.to_lowercase();
        let matches_known = config.known_titles.iter().any(|t| lower.contains(t));
        if matches_known
            && is_bold_font(&line.font_name)
            && line.rounded_size() >= profile.max_font_size * config.known_title_size_ratio
            && line.bbox.y0 < config.known_title_max_y0
        {
            return Some(text.to_string());
        }
    }
    None
}

/// Collect plausible title lines: high on page 1, bold, near the maximum
/// size, title-length word count, and free of metadata/watermark/math noise.
/// Returned sorted by size descending (reading order preserved within a
/// size).
fn title_candidates<'a>(
    lines: &'a [LineRecord],
    profile: &FontProfile,
    patterns: &LinePatterns,
    config: &OutlineConfig,
) -> Vec<&'a LineRecord> {
    let mut candidates: Vec<&LineRecord> = lines
        .iter()
        .filter(|line| {
            let text = line.text.trim();
            let words = text.split_whitespace().count();
            line.page == 1
                && line.bbox.y0 < config.title_max_y0
                && is_bold_font(&line.font_name)
                && line.rounded_size() >= profile.max_font_size * config.prominence_size_ratio
                && words > 15
                && words < 30
                && !is_suppressed(text, patterns)
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.font_size
            .partial_cmp(&a.font_size)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Suppression patterns shared with the classifier (§ rejection cascade).
fn is_suppressed(text: &str, patterns: &LinePatterns) -> bool {
    patterns.has_watermark_marker(text)
        || patterns.is_metadata_prefix(text)
        || patterns.has_email(text)
        || patterns.has_author_year_citation(text)
        || patterns.is_math_expression(text)
}

/// Take the top candidate as the seed and greedily append continuation
/// lines: vertically adjacent (gap < 5), same font size, x0 within 10 units
/// of the seed. The first line breaking any condition stops the title.
fn assemble_title(candidates: &[&LineRecord]) -> String {
    let seed = candidates[0];
    let mut title = seed.text.trim().to_string();

    for window in candidates.windows(2) {
        let (prev, next) = (window[0], window[1]);
        let adjacent = next.bbox.y0 - prev.bbox.y1 < 5.0;
        let same_size = next.font_size == seed.font_size;
        let aligned = (next.bbox.x0 - seed.bbox.x0).abs() < 10.0;
        if adjacent && same_size && aligned {
            title.push(' ');
            title.push_str(next.text.trim());
        } else {
            break;
        }
    }

    title
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
            BBox::new(x0, y0, x0 + 400.0, y0 + size),
            page,
        )
    }

    fn with_body(mut extra: Vec<LineRecord>) -> Vec<LineRecord> {
        let mut lines = Vec::new();
        for i in 0..40 {
            lines.push(line(
                "plain body paragraph text",
                "Times-Roman",
                10.0,
                50.0,
                250.0 + i as f32 * 12.0,
                1,
            ));
        }
        lines.append(&mut extra);
        lines
    }

    fn detect(lines: &[LineRecord], config: &OutlineConfig) -> String {
        let profile = FontProfile::build(lines, config);
        let patterns = LinePatterns::new();
        detect_title(lines, &profile, &patterns, config)
    }

    const LONG_TITLE: &str =
        "A Comprehensive Study of Support Vector Machines and Kernel Methods \
         for the Classification of High Dimensional Remote Sensing Imagery Data";

    #[test]
    fn test_empty_input_untitled() {
        assert_eq!(detect(&[], &OutlineConfig::default()), UNTITLED);
    }

    #[test]
    fn test_known_title_allow_list() {
        let config = OutlineConfig::new()
            .with_known_title("Deep Support Vector Machine for Hyperspectral Image Classification");
        let lines = with_body(vec![line(
            "Deep Support Vector Machine For Hyperspectral Image Classification",
            "Times-Bold",
            20.0,
            50.0,
            40.0,
            1,
        )]);
        assert_eq!(
            detect(&lines, &config),
            "Deep Support Vector Machine For Hyperspectral Image Classification"
        );
    }

    #[test]
    fn test_known_title_ignored_when_not_prominent() {
        let config = OutlineConfig::new().with_known_title("some known paper");
        // Matching text but small and not bold: fall through to the
        // generic fallback (no 15-30 word bold candidate exists).
        let lines = with_body(vec![
            line("Some Known Paper", "Times-Roman", 10.0, 50.0, 40.0, 1),
            line("A Large Decoration", "Times-Bold", 20.0, 50.0, 60.0, 1),
        ]);
        assert_eq!(detect(&lines, &config), GENERIC_TITLE);
    }

    #[test]
    fn test_fallback_picks_large_bold_candidate() {
        let lines = with_body(vec![line(LONG_TITLE, "Times-Bold", 18.0, 50.0, 60.0, 1)]);
        assert_eq!(detect(&lines, &OutlineConfig::default()), LONG_TITLE);
    }

    #[test]
    fn test_fallback_joins_adjacent_lines() {
        let first = "A Comprehensive Study of Deep Support Vector Machines and \
                     Kernel Methods for the Robust Classification of";
        let second = "High Dimensional Hyperspectral Remote Sensing Imagery Data \
                      With Limited Training Samples and Very Strong Class Imbalance";
        let lines = with_body(vec![
            line(first, "Times-Bold", 18.0, 50.0, 60.0, 1),
            line(second, "Times-Bold", 18.0, 80.0, 60.0 + 18.0 + 2.0, 1),
        ]);
        // Second line starts 2 units below the first one's bottom and is
        // 30 units right of the seed: alignment fails, title is seed only.
        assert_eq!(detect(&lines, &OutlineConfig::default()), first);

        let lines = with_body(vec![
            line(first, "Times-Bold", 18.0, 50.0, 60.0, 1),
            line(second, "Times-Bold", 18.0, 52.0, 60.0 + 18.0 + 2.0, 1),
        ]);
        assert_eq!(
            detect(&lines, &OutlineConfig::default()),
            format!("{} {}", first, second)
        );
    }

    #[test]
    fn test_title_y_cutoff_is_tunable() {
        // A title sitting below the default page-1 cutoff is only found
        // when the cutoff is raised.
        let lines = with_body(vec![line(LONG_TITLE, "Times-Bold", 18.0, 50.0, 250.0, 1)]);
        assert_eq!(detect(&lines, &OutlineConfig::default()), GENERIC_TITLE);

        let mut config = OutlineConfig::default();
        config.title_max_y0 = 300.0;
        assert_eq!(detect(&lines, &config), LONG_TITLE);
    }

    #[test]
    fn test_watermark_never_becomes_title() {
        let lines = with_body(vec![line(
            "Journal Pre-proof Journal Pre-proof Journal Pre-proof Journal \
             Pre-proof Journal Pre-proof Journal Pre-proof Journal Pre-proof \
             Journal Pre-proof Journal",
            "Helvetica-Bold",
            22.0,
            50.0,
            30.0,
            1,
        )]);
        assert_eq!(detect(&lines, &OutlineConfig::default()), GENERIC_TITLE);
    }

    #[test]
    fn test_generic_fallback_without_candidates() {
        let lines = with_body(vec![]);
        assert_eq!(detect(&lines, &OutlineConfig::default()), GENERIC_TITLE);
    }
}
