//! Page geometry calculation
//!
//! The image page is sized from the image's physical size, scaled by
//! display multipliers. The table page is sized to fit the table plus a
//! margin budget and centers the table horizontally.

use crate::options::PageSizing;
use crate::types::ImageInfo;

use super::{PageGeometry, PageMargins};

/// Geometry of the page holding the uploaded image.
///
/// Each side is at least `image_page_min_cm` and, when a ceiling is
/// configured, at most `image_page_max_cm`.
pub fn image_page_geometry(image: &ImageInfo, sizing: &PageSizing) -> PageGeometry {
    let dpi_x = usable_dpi(image.dpi_x, sizing.default_dpi);
    let dpi_y = usable_dpi(image.dpi_y, sizing.default_dpi);

    let raw_width = image.pixel_width as f32 / dpi_x * sizing.image_width_scale;
    let raw_height = image.pixel_height as f32 / dpi_y * sizing.image_height_scale;

    let bound = |raw: f32| {
        let floored = raw.max(sizing.image_page_min_cm);
        match sizing.image_page_max_cm {
            Some(max) => floored.min(max),
            None => floored,
        }
    };
    let width_cm = bound(raw_width);
    let height_cm = bound(raw_height);

    if sizing.image_page_max_cm.is_some_and(|max| raw_width > max || raw_height > max) {
        log::warn!(
            "Image page {:.1}x{:.1} cm exceeds the ceiling; clamped to {:.1}x{:.1} cm",
            raw_width,
            raw_height,
            width_cm,
            height_cm
        );
    }
    log::debug!("Image page geometry: {:.2}x{:.2} cm", width_cm, height_cm);

    PageGeometry {
        width_cm,
        height_cm,
        margins: PageMargins {
            top_cm: sizing.header_top_margin_cm,
            bottom_cm: sizing.bottom_margin_cm,
            left_cm: sizing.side_margin_cm,
            right_cm: sizing.side_margin_cm,
        },
    }
}

/// Geometry of the table pages for the given column widths.
///
/// Width is the table width plus the margin budget, bounded to the
/// configured page width range. Left and right margins split the leftover
/// space evenly and are never negative; a table wider than the page
/// overflows on the right.
pub fn table_page_geometry(column_widths_cm: &[f32], sizing: &PageSizing) -> PageGeometry {
    let table_width: f32 = column_widths_cm.iter().sum();
    let width_cm = (table_width + sizing.table_margin_budget_cm)
        .min(sizing.table_page_max_width_cm)
        .max(sizing.table_page_min_width_cm);

    let margin = ((width_cm - table_width) / 2.0).max(0.0);
    if margin == 0.0 {
        log::warn!(
            "Table is {:.1} cm wide but the page is limited to {:.1} cm",
            table_width,
            width_cm
        );
    }
    log::debug!(
        "Table page geometry: {:.2}x{:.2} cm, side margins {:.2} cm",
        width_cm,
        sizing.table_page_height_cm,
        margin
    );

    PageGeometry {
        width_cm,
        height_cm: sizing.table_page_height_cm,
        margins: PageMargins {
            top_cm: sizing.header_top_margin_cm,
            bottom_cm: sizing.bottom_margin_cm,
            left_cm: margin,
            right_cm: margin,
        },
    }
}

fn usable_dpi(dpi: f32, fallback: f32) -> f32 {
    if dpi.is_finite() && dpi > 0.0 { dpi } else { fallback }
}
