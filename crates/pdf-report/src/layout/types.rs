//! Layout data types for reports

/// Page margins in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageMargins {
    pub top_cm: f32,
    pub bottom_cm: f32,
    pub left_cm: f32,
    pub right_cm: f32,
}

/// Size and margins of one report section's pages
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PageGeometry {
    pub width_cm: f32,
    pub height_cm: f32,
    pub margins: PageMargins,
}

impl PageGeometry {
    /// Width available between the left and right margins
    pub fn content_width_cm(&self) -> f32 {
        (self.width_cm - self.margins.left_cm - self.margins.right_cm).max(0.0)
    }

    /// Height available between the top and bottom margins
    pub fn content_height_cm(&self) -> f32 {
        (self.height_cm - self.margins.top_cm - self.margins.bottom_cm).max(0.0)
    }
}
