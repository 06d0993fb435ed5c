//! The heuristic outline extraction core.
//!
//! Data flows strictly downward: [`FontProfile`] is built once from all
//! line records, title detection and per-line classification read it, and
//! [`OutlineExtractor`] assembles the final `(title, outline)` result.

mod assemble;
mod classify;
mod config;
mod fonts;
mod patterns;
mod title;

pub use assemble::OutlineExtractor;
pub use classify::HeadingClassifier;
pub use config::OutlineConfig;
pub use fonts::{is_bold_font, FontProfile, FontSignature, LevelStyle};
pub use patterns::{LinePatterns, WATERMARK_MARKERS};
pub use title::{detect_title, GENERIC_TITLE, UNTITLED};
