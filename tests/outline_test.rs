//! End-to-end tests for the outline extraction pipeline.

use pdfoutline::{
    outline_lines, outline_lines_with_config, BBox, HeadingLevel, LineRecord, OutlineConfig,
};

fn line(text: &str, font: &str, size: f32, x0: f32, y0: f32, page: u32) -> LineRecord {
    LineRecord::new(
        text,
        font,
        size,
        BBox::new(x0, y0, x0 + 300.0, y0 + size),
        page,
    )
}

const PAPER_TITLE: &str = "Deep Support Vector Machine For Hyperspectral Image Classification";

/// Three pages of 10pt body text, a 20pt bold title on page 1, and a
/// 14pt bold "1. Introduction" heading (the §8-style base fixture).
fn paper_lines() -> Vec<LineRecord> {
    let mut lines = Vec::new();
    for page in 1..=3 {
        for i in 0..25 {
            lines.push(line(
                "ordinary paragraph text flows here",
                "Times-Roman",
                10.0,
                50.0,
                200.0 + i as f32 * 14.0,
                page,
            ));
        }
    }
    lines.push(line(PAPER_TITLE, "Times-Bold", 20.0, 50.0, 40.0, 1));
    lines.push(line("1. Introduction", "Times-Bold", 14.0, 50.0, 120.0, 1));
    lines
}

fn paper_config() -> OutlineConfig {
    OutlineConfig::new().with_known_title(PAPER_TITLE)
}

#[test]
fn test_numbered_heading_scenario() {
    let result = outline_lines_with_config(paper_lines(), paper_config()).unwrap();

    assert_eq!(result.title, PAPER_TITLE);
    assert_eq!(result.outline.len(), 1);
    assert_eq!(result.outline[0].level, HeadingLevel::H1);
    assert_eq!(result.outline[0].text, "Introduction");
    assert_eq!(result.outline[0].page, 1);
}

#[test]
fn test_sub_level_numbering_scenario() {
    let mut lines = paper_lines();
    lines.push(line("2.1 Related Work", "Times-Bold", 12.0, 50.0, 150.0, 2));

    let result = outline_lines_with_config(lines, paper_config()).unwrap();

    assert_eq!(result.outline.len(), 2);
    assert_eq!(result.outline[0].text, "Introduction");
    assert_eq!(result.outline[1].level, HeadingLevel::H2);
    assert_eq!(result.outline[1].text, "Related Work");
    assert_eq!(result.outline[1].page, 2);
}

#[test]
fn test_named_heading_scenario() {
    let mut lines = paper_lines();
    // Same face and size as the inferred H1 style, on the last page.
    lines.push(line("References", "Times-Bold", 20.0, 50.0, 100.0, 3));

    let result = outline_lines_with_config(lines, paper_config()).unwrap();

    let last = result.outline.last().unwrap();
    assert_eq!(last.level, HeadingLevel::H1);
    assert_eq!(last.text, "References");
    assert_eq!(last.page, 3);
}

#[test]
fn test_order_independence() {
    let config = paper_config();
    let mut lines = paper_lines();
    lines.push(line("2.1 Related Work", "Times-Bold", 12.0, 50.0, 150.0, 2));

    let forward = outline_lines_with_config(lines.clone(), config.clone()).unwrap();
    lines.reverse();
    let reversed = outline_lines_with_config(lines, config).unwrap();

    assert_eq!(forward.title, reversed.title);
    assert_eq!(forward.outline, reversed.outline);
}

#[test]
fn test_dedup_invariant() {
    let mut lines = paper_lines();
    // The same heading rendered twice on the same page.
    lines.push(line("1. Introduction", "Times-Bold", 14.0, 50.0, 125.0, 1));

    let result = outline_lines_with_config(lines, paper_config()).unwrap();

    let introductions = result
        .outline
        .iter()
        .filter(|e| e.text == "Introduction" && e.page == 1)
        .count();
    assert_eq!(introductions, 1);
}

#[test]
fn test_reading_order() {
    let mut lines = paper_lines();
    lines.push(line("References", "Times-Bold", 20.0, 50.0, 100.0, 3));
    lines.push(line("2.1 Related Work", "Times-Bold", 12.0, 50.0, 150.0, 2));

    let result = outline_lines_with_config(lines, paper_config()).unwrap();

    let pages: Vec<u32> = result.outline.iter().map(|e| e.page).collect();
    let mut sorted = pages.clone();
    sorted.sort_unstable();
    assert_eq!(pages, sorted);
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn test_degenerate_input() {
    let result = outline_lines(Vec::new()).unwrap();
    assert_eq!(result.title, "Untitled Document");
    assert!(result.outline.is_empty());
}

#[test]
fn test_watermark_suppression() {
    let mut lines = Vec::new();
    for page in 1..=3 {
        // Huge bold watermark stamped on every page.
        lines.push(line(
            "Journal Pre-Proof",
            "Helvetica-Bold",
            22.0,
            50.0,
            30.0,
            page,
        ));
        for i in 0..25 {
            lines.push(line(
                "ordinary paragraph text flows here",
                "Times-Roman",
                10.0,
                50.0,
                200.0 + i as f32 * 14.0,
                page,
            ));
        }
    }
    lines.push(line("1. Introduction", "Times-Bold", 14.0, 50.0, 120.0, 1));

    let result = outline_lines(lines).unwrap();

    assert!(!result.title.to_lowercase().contains("journal pre-proof"));
    for entry in &result.outline {
        assert!(!entry.text.to_lowercase().contains("journal pre-proof"));
    }
    assert!(result.outline.iter().any(|e| e.text == "Introduction"));
}

#[test]
fn test_page_number_suppression() {
    let mut lines = paper_lines();
    lines.push(line("7", "Times-Bold", 16.0, 300.0, 800.0, 3));

    let result = outline_lines_with_config(lines, paper_config()).unwrap();

    assert!(result.outline.iter().all(|e| e.text != "7"));
}

#[test]
fn test_json_round_trip_of_line_records() {
    let lines = paper_lines();
    let json = serde_json::to_string(&lines).unwrap();
    let parsed: Vec<LineRecord> = serde_json::from_str(&json).unwrap();

    let from_original = outline_lines_with_config(lines, paper_config()).unwrap();
    let from_parsed = outline_lines_with_config(parsed, paper_config()).unwrap();
    assert_eq!(from_original.outline, from_parsed.outline);
}

#[test]
fn test_invalid_record_fails_document() {
    let mut lines = paper_lines();
    let mut bad = line("broken", "Times-Roman", f32::NAN, 50.0, 100.0, 1);
    bad.page = 1;
    lines.push(bad);

    assert!(outline_lines(lines).is_err());
}
