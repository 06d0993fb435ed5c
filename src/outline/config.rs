//! Tunable thresholds for the outline heuristics.

/// Configuration for the outline extraction heuristics.
///
/// Every threshold the classifier and profile builder use lives here with a
/// documented default, so a document class with unusual styling can be tuned
/// without touching the rules themselves.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Fraction of pages a font style may appear on before it is treated as
    /// a running header/footer rather than a heading style.
    pub ubiquity_ratio: f32,

    /// Size ratio (relative to the document maximum) above which a bold,
    /// ubiquitous style is still considered heading-worthy.
    pub prominence_size_ratio: f32,

    /// Size ratio against a level's expected size below which a candidate
    /// line is rejected for that level.
    pub level_size_ratio: f32,

    /// Size ratio used when testing whether two styles are distinct enough
    /// to occupy different heading levels.
    pub distinct_size_ratio: f32,

    /// Size ratio (relative to the body size) below which a font style is
    /// too small to be a heading style.
    pub heading_min_size_ratio: f32,

    /// Size ratio applied to the previous level when filling an unassigned
    /// level's expected size.
    pub fallback_size_ratio: f32,

    /// Size ratio (relative to the document maximum) a known-title line
    /// must reach.
    pub known_title_size_ratio: f32,

    /// Maximum `y0` on page 1 for a known-title match.
    pub known_title_max_y0: f32,

    /// Maximum `y0` on page 1 for fallback title candidates.
    pub title_max_y0: f32,

    /// Maximum horizontal distance (in page units) between a line's left
    /// edge and a level's expected indentation.
    pub indent_tolerance: f32,

    /// Default page height when no page-1 record provides an extent proxy.
    pub default_page_height: f32,

    /// Default page width when no page-1 record provides an extent proxy.
    pub default_page_width: f32,

    /// Body font size fallback when no mid-range size dominates.
    pub default_body_size: f32,

    /// Known document titles (lower-cased substrings), matched against
    /// page-1 lines before the general title heuristic. Empty by default;
    /// populate only for a corpus whose titles are known ahead of time.
    pub known_titles: Vec<String>,
}

impl OutlineConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known title to the allow-list (stored lower-cased).
    pub fn with_known_title(mut self, title: impl Into<String>) -> Self {
        self.known_titles.push(title.into().to_lowercase());
        self
    }

    /// Set the indentation tolerance.
    pub fn with_indent_tolerance(mut self, tolerance: f32) -> Self {
        self.indent_tolerance = tolerance;
        self
    }

    /// Set the page-ubiquity cutoff.
    pub fn with_ubiquity_ratio(mut self, ratio: f32) -> Self {
        self.ubiquity_ratio = ratio;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            ubiquity_ratio: 0.7,
            prominence_size_ratio: 0.9,
            level_size_ratio: 0.9,
            distinct_size_ratio: 0.95,
            heading_min_size_ratio: 0.95,
            fallback_size_ratio: 0.85,
            known_title_size_ratio: 0.95,
            known_title_max_y0: 150.0,
            title_max_y0: 200.0,
            indent_tolerance: 25.0,
            // A4 in points, the common academic-paper page
            default_page_height: 842.0,
            default_page_width: 595.0,
            default_body_size: 10.0,
            known_titles: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OutlineConfig::default();
        assert_eq!(config.ubiquity_ratio, 0.7);
        assert_eq!(config.indent_tolerance, 25.0);
        assert_eq!(config.heading_min_size_ratio, 0.95);
        assert_eq!(config.fallback_size_ratio, 0.85);
        assert_eq!(config.known_title_size_ratio, 0.95);
        assert_eq!(config.known_title_max_y0, 150.0);
        assert_eq!(config.title_max_y0, 200.0);
        assert!(config.known_titles.is_empty());
    }

    #[test]
    fn test_known_title_lowercased() {
        let config = OutlineConfig::new().with_known_title("A Known TITLE");
        assert_eq!(config.known_titles, vec!["a known title".to_string()]);
    }
}
