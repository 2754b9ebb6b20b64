//! Page geometry used by the paginated export

use crate::error::ExportError;
use serde::{Deserialize, Serialize};

/// Distance between the header baseline and the first content line
pub const HEADER_OFFSET: f64 = 20.0;

/// Margins and dimensions of an exported page, in PDF points
///
/// Vertical positions are measured downward from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub margin_left: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub line_height: f64,
    pub page_width: f64,
    pub page_height: f64,
    /// Body text size
    pub font_size: f64,
    /// Bold header size
    pub header_font_size: f64,
}

impl PageGeometry {
    pub const A4_WIDTH: f64 = 595.28;
    pub const A4_HEIGHT: f64 = 841.89;

    /// A4 portrait with the report's default margins
    pub fn a4() -> Self {
        Self {
            margin_left: 40.0,
            margin_top: 60.0,
            margin_bottom: 40.0,
            line_height: 16.0,
            page_width: Self::A4_WIDTH,
            page_height: Self::A4_HEIGHT,
            font_size: 11.0,
            header_font_size: 13.0,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin_left
    }

    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Lowest position a content line may reach
    pub fn content_bottom(&self) -> f64 {
        self.margin_top + self.usable_height()
    }

    pub fn header_y(&self) -> f64 {
        (self.margin_top - HEADER_OFFSET).max(0.0)
    }

    pub fn validate(&self) -> Result<(), ExportError> {
        let fields = [
            ("margin_left", self.margin_left),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("line_height", self.line_height),
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("font_size", self.font_size),
            ("header_font_size", self.header_font_size),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExportError::InvalidGeometry(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.usable_width() <= 0.0 {
            return Err(ExportError::InvalidGeometry(
                "horizontal margins leave no usable width".into(),
            ));
        }
        if self.usable_height() <= 0.0 {
            return Err(ExportError::InvalidGeometry(
                "vertical margins leave no usable height".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
