//! Report layout planning
//!
//! This module turns validated inputs into a `LayoutPlan`:
//! 1. Check the table has a header and data
//! 2. Size every column
//! 3. Derive geometry for the image page and the table page
//! 4. Attach header/footer directives and soft-broken cell text

mod header;
mod types;

pub use header::{build_footer, build_header};
pub use types::*;

use crate::assets::AssetLocator;
use crate::constants::*;
use crate::layout::{column_widths, image_page_geometry, table_page_geometry};
use crate::metadata::{FooterSpec, HeaderSpec};
use crate::options::ReportOptions;
use crate::text::insert_soft_breaks;
use crate::types::*;
use std::sync::Arc;

/// The uploaded image: encoded bytes plus decoded dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct ReportImage {
    pub bytes: Arc<[u8]>,
    pub info: ImageInfo,
}

impl ReportImage {
    pub fn new(bytes: impl Into<Arc<[u8]>>, info: ImageInfo) -> Self {
        Self {
            bytes: bytes.into(),
            info,
        }
    }
}

/// Build the complete layout plan for one report
pub fn plan_report(
    table: &Table,
    image: &ReportImage,
    header: &HeaderSpec,
    footer: &FooterSpec,
    options: &ReportOptions,
    locator: &dyn AssetLocator,
) -> Result<LayoutPlan> {
    table.validate()?;

    let widths = column_widths(table, &options.columns);
    log::debug!("Column widths (cm): {:?}", widths);

    let image_geometry = image_page_geometry(&image.info, &options.pages);
    let table_geometry = table_page_geometry(&widths, &options.pages);

    let footer_directive = build_footer(footer, &options.fonts);

    let image_page = PageSection {
        geometry: image_geometry,
        header: build_header(header, &options.fonts, image_geometry.width_cm, locator),
        footer: footer_directive.clone(),
        body: SectionBody::Image(ImageDirective {
            source: ImageSource::Embedded(Arc::clone(&image.bytes)),
            width_cm: options.pages.image_target_width_cm,
            lock_aspect_ratio: true,
            alignment: Alignment::Center,
            space_before_cm: IMAGE_SPACE_BEFORE_CM,
            fallback: None,
        }),
    };

    let table_page = PageSection {
        geometry: table_geometry,
        header: build_header(header, &options.fonts, table_geometry.width_cm, locator),
        footer: footer_directive,
        body: SectionBody::Table(build_table(table, widths, options)),
    };

    log::info!(
        "Planned report '{}': {} columns, {} data rows",
        header.title,
        table.column_count(),
        table.data_rows().len()
    );

    Ok(LayoutPlan {
        header: header.clone(),
        footer: footer.clone(),
        image_page,
        table_page,
    })
}

fn build_table(table: &Table, widths: Vec<f32>, options: &ReportOptions) -> TableDirective {
    let interval = options.soft_break_interval;
    let columns = table.column_count();

    let header = table
        .header()
        .iter()
        .map(|cell| insert_soft_breaks(cell, interval))
        .collect();

    // Rows are cut or padded to the header's column count
    let rows = table
        .data_rows()
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| {
                    row.get(i)
                        .map(|cell| insert_soft_breaks(cell, interval))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    TableDirective {
        column_widths_cm: widths,
        header,
        rows,
        header_style: RowStyle {
            font_size: options.fonts.table_header,
            bold: true,
            alignment: Alignment::Left,
            space_before_cm: HEADER_CELL_SPACING_CM,
            space_after_cm: HEADER_CELL_SPACING_CM,
            bottom_border_pt: CELL_BORDER_WIDTH,
            border_color: BorderColor::Black,
        },
        body_style: RowStyle {
            font_size: options.fonts.table_body,
            bold: false,
            alignment: Alignment::Left,
            space_before_cm: BODY_CELL_SPACING_CM,
            space_after_cm: BODY_CELL_SPACING_CM,
            bottom_border_pt: CELL_BORDER_WIDTH,
            border_color: BorderColor::Gray,
        },
        border_width_pt: 0.0,
        repeat_header: true,
    }
}
