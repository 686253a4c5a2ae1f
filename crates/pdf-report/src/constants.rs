//! Shared constants for report layout and rendering
//!
//! Values that a deployment may want to change live in `ReportOptions`;
//! this module holds the defaults behind those options plus the few
//! values that are fixed by the PDF format or the fonts in use.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per centimeter (1 inch = 72 points, 1 inch = 2.54cm)
pub const POINTS_PER_CM: f32 = 72.0 / 2.54; // ≈ 28.3465

/// Convert centimeters to points
#[inline]
pub fn cm_to_pt(cm: f32) -> f32 {
    cm * POINTS_PER_CM
}

/// Convert points to centimeters
#[inline]
pub fn pt_to_cm(pt: f32) -> f32 {
    pt / POINTS_PER_CM
}

// =============================================================================
// Text
// =============================================================================

/// Zero-width space inserted as an invisible wrap opportunity
pub const SOFT_BREAK: char = '\u{200B}';

/// Default number of characters between soft breaks
pub const DEFAULT_SOFT_BREAK_INTERVAL: usize = 20;

/// Placeholder for metadata entries that were not supplied
pub const NOT_AVAILABLE: &str = "N/A";

/// Text drawn in place of the logo when the asset is missing
pub const LOGO_NOT_FOUND: &str = "Logo Not Found";

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Approximate character width ratio for Helvetica-Bold
pub const HELVETICA_BOLD_CHAR_WIDTH_RATIO: f32 = 0.55;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

// =============================================================================
// Column Sizing
// =============================================================================

/// Width of one character of table text (cm)
pub const DEFAULT_CHAR_WIDTH_CM: f32 = 0.225;

/// Narrowest allowed column (cm)
pub const DEFAULT_MIN_COL_WIDTH_CM: f32 = 2.0;

/// Widest allowed column (cm)
pub const DEFAULT_MAX_COL_WIDTH_CM: f32 = 10.0;

/// Nearest-rank percentile of cell lengths used to size a column
pub const DEFAULT_WIDTH_PERCENTILE: f64 = 0.9;

// =============================================================================
// Page Geometry
// =============================================================================

/// A4 page height (cm)
pub const A4_HEIGHT_CM: f32 = 29.7;

/// Horizontal space added around the table (cm)
pub const DEFAULT_TABLE_MARGIN_BUDGET_CM: f32 = 3.0;

/// Narrowest table page (cm)
pub const DEFAULT_TABLE_PAGE_MIN_WIDTH_CM: f32 = 21.0;

/// Widest table page (cm)
pub const DEFAULT_TABLE_PAGE_MAX_WIDTH_CM: f32 = 70.0;

/// Display multiplier applied to the image width in inches
pub const DEFAULT_IMAGE_WIDTH_SCALE: f32 = 3.0;

/// Display multiplier applied to the image height in inches
pub const DEFAULT_IMAGE_HEIGHT_SCALE: f32 = 3.5;

/// Smallest image page side (cm)
pub const DEFAULT_IMAGE_PAGE_MIN_CM: f32 = 15.0;

/// Largest image page side (cm). PDF viewers reject pages over 200 inches.
pub const DEFAULT_IMAGE_PAGE_MAX_CM: f32 = 508.0;

/// Resolution assumed when the image carries no density metadata
pub const DEFAULT_DPI: f32 = 96.0;

/// Rendered width of the uploaded image (cm)
pub const DEFAULT_IMAGE_TARGET_WIDTH_CM: f32 = 18.0;

/// Space between the header area and the uploaded image (cm)
pub const IMAGE_SPACE_BEFORE_CM: f32 = 2.0;

// =============================================================================
// Margins
// =============================================================================

/// Top margin reserved for the header (cm)
pub const DEFAULT_HEADER_TOP_MARGIN_CM: f32 = 5.0;

/// Bottom margin reserved for the footer (cm)
pub const DEFAULT_BOTTOM_MARGIN_CM: f32 = 2.5;

/// Left/right margin of the image page (cm)
pub const DEFAULT_SIDE_MARGIN_CM: f32 = 2.5;

// =============================================================================
// Header Frames
// =============================================================================

pub const LEFT_FRAME_TOP_CM: f32 = 1.5;
pub const LEFT_FRAME_LEFT_CM: f32 = 1.5;
pub const LEFT_FRAME_WIDTH_CM: f32 = 10.0;

pub const RIGHT_FRAME_TOP_CM: f32 = 2.0;
pub const RIGHT_FRAME_WIDTH_CM: f32 = 7.0;
/// The right frame is positioned as if it were this wide
pub const RIGHT_FRAME_NOMINAL_WIDTH_CM: f32 = 6.0;
pub const RIGHT_FRAME_RIGHT_MARGIN_CM: f32 = 2.5;

/// Frame height for both header frames (cm)
pub const HEADER_FRAME_HEIGHT_CM: f32 = 4.0;

/// Rendered width of the logo (cm)
pub const LOGO_WIDTH_CM: f32 = 4.0;

// =============================================================================
// Table Borders
// =============================================================================

/// Bottom border under every table cell (points)
pub const CELL_BORDER_WIDTH: f32 = 0.5;

pub const HEADER_CELL_SPACING_CM: f32 = 0.3;
pub const BODY_CELL_SPACING_CM: f32 = 0.15;
