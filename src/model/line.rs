//! Line-level input records.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bounding box of a line on its page, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

/// One rendered visual line of text, as supplied by the extractor.
///
/// Fields are independent of each other; `bbox` extents may serve as a
/// page-size proxy only for the first record of page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// The line's text content
    pub text: String,

    /// Font name as reported by the document (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Font size in points
    pub font_size: f32,

    /// Position on the page, top-left origin
    pub bbox: BBox,

    /// Page number, 1-based
    pub page: u32,
}

impl LineRecord {
    /// Create a new line record.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f32,
        bbox: BBox,
        page: u32,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            font_size,
            bbox,
            page,
        }
    }

    /// Validate the record's schema.
    ///
    /// A record with non-finite coordinates or sizes, or a zero page
    /// number, is malformed and fatal for its document.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::InvalidRecord("page must be >= 1".to_string()));
        }
        if !self.font_size.is_finite() {
            return Err(Error::InvalidRecord(format!(
                "non-finite font size {}",
                self.font_size
            )));
        }
        if !self.bbox.is_finite() {
            return Err(Error::InvalidRecord("non-finite bounding box".to_string()));
        }
        Ok(())
    }

    /// Font size rounded to one decimal place.
    pub fn rounded_size(&self) -> f32 {
        (self.font_size * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(page: u32) -> LineRecord {
        LineRecord::new(
            "Introduction",
            "Times-Bold",
            14.04,
            BBox::new(50.0, 100.0, 200.0, 114.0),
            page,
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(record(1).validate().is_ok());
    }

    #[test]
    fn test_validate_page_zero() {
        let result = record(0).validate();
        assert!(matches!(result, Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_validate_nan_bbox() {
        let mut rec = record(1);
        rec.bbox.y0 = f32::NAN;
        assert!(matches!(rec.validate(), Err(Error::InvalidRecord(_))));
    }

    #[test]
    fn test_rounded_size() {
        assert_eq!(record(1).rounded_size(), 14.0);
    }

    #[test]
    fn test_bbox_extents() {
        let bbox = BBox::new(10.0, 20.0, 110.0, 35.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 15.0);
    }
}
