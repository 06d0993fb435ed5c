//! Data model for line records and extracted outlines.

mod line;
mod outline;

pub use line::{BBox, LineRecord};
pub use outline::{DocumentOutline, HeadingLevel, JsonFormat, OutlineEntry};
