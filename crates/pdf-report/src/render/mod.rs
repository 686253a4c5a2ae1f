//! PDF rendering of layout plans
//!
//! Rendering runs in two passes: section bodies are laid out first so the
//! total page count is known, then headers and footers are drawn onto
//! every page with its final "Page n of N" numbering.

mod canvas;
mod table;

use crate::constants::DEFAULT_DPI;
use crate::image_info::embeddable_image;
use crate::layout::PageGeometry;
use crate::plan::*;
use crate::types::*;
use canvas::{Canvas, PlacedImage};
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, RawImage};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

/// Footer band distance from the bottom edge (cm)
const FOOTER_DISTANCE_CM: f32 = 1.25;

/// Footer text never starts closer than this to the page edge (cm)
const FOOTER_MIN_SIDE_CM: f32 = 1.0;

/// Render a complete plan to PDF bytes
pub fn render_pdf(plan: &LayoutPlan) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(&plan.header.title);
    let mut header_images = HashMap::new();

    // Pass 1: bodies
    let mut drafts: Vec<(&PageSection, Canvas)> = Vec::new();
    for section in plan.sections() {
        for item in section.header.left.items.iter().chain(&section.header.right.items) {
            if let FrameItem::Image(directive) = item {
                register_header_image(&mut doc, &mut header_images, &directive.source);
            }
        }

        match &section.body {
            SectionBody::Image(directive) => {
                let image = load_image(&mut doc, &directive.source)?;
                let mut canvas = Canvas::new(section.geometry.height_cm);
                draw_body_image(&mut canvas, &section.geometry, directive, &image);
                drafts.push((section, canvas));
            }
            SectionBody::Table(directive) => {
                for canvas in draw_table_pages(&section.geometry, directive) {
                    drafts.push((section, canvas));
                }
            }
        }
    }

    // Pass 2: headers and footers
    let total = drafts.len();
    let mut pages = Vec::with_capacity(total);
    for (index, (section, mut canvas)) in drafts.into_iter().enumerate() {
        let page = index + 1;
        draw_frame(&mut canvas, &section.header.left, &header_images, page, total);
        draw_frame(&mut canvas, &section.header.right, &header_images, page, total);
        draw_footer(&mut canvas, &section.geometry, &section.footer, page, total);

        pages.push(PdfPage::new(
            Mm(section.geometry.width_cm * 10.0),
            Mm(section.geometry.height_cm * 10.0),
            canvas.into_ops(),
        ));
    }

    doc.pages = pages;

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    log::info!("Rendered '{}': {} pages, {} bytes", plan.header.title, total, bytes.len());

    Ok(bytes)
}

fn load_image(doc: &mut PdfDocument, source: &ImageSource) -> Result<PlacedImage> {
    let file;
    let bytes: Cow<[u8]> = match source {
        ImageSource::Path(path) => {
            file = std::fs::read(path)?;
            embeddable_image(&file, DEFAULT_DPI)?.1
        }
        ImageSource::Embedded(bytes) => Cow::Borrowed(bytes.as_ref()),
    };
    let mut warnings = Vec::new();
    let raw = RawImage::decode_from_bytes(&bytes, &mut warnings)
        .map_err(|e| ReportError::Pdf(format!("Failed to decode image: {}", e)))?;
    let (width_px, height_px) = (raw.width, raw.height);
    let id = doc.add_image(&raw);
    Ok(PlacedImage {
        id,
        width_px,
        height_px,
    })
}

/// Header images are optional: one that cannot be read is drawn as
/// placeholder text instead of failing the report.
fn register_header_image(
    doc: &mut PdfDocument,
    images: &mut HashMap<PathBuf, Option<PlacedImage>>,
    source: &ImageSource,
) {
    let ImageSource::Path(path) = source else {
        return;
    };
    if images.contains_key(path) {
        return;
    }
    let placed = match load_image(doc, source) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Could not load header image {}: {}", path.display(), e);
            None
        }
    };
    images.insert(path.clone(), placed);
}

fn draw_body_image(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    directive: &ImageDirective,
    image: &PlacedImage,
) {
    let top = geometry.margins.top_cm + directive.space_before_cm;
    let available_width = geometry.content_width_cm();
    let available_height = (geometry.height_cm - geometry.margins.bottom_cm - top).max(0.0);

    let mut width = directive.width_cm.min(available_width);
    let mut height = if directive.lock_aspect_ratio {
        image.height_for_width(width)
    } else {
        available_height
    };
    if directive.lock_aspect_ratio && height > available_height && height > 0.0 {
        width *= available_height / height;
        height = available_height;
    }

    let left = geometry.margins.left_cm;
    let x = match directive.alignment {
        Alignment::Left => left,
        Alignment::Center => left + (available_width - width) / 2.0,
        Alignment::Right => left + available_width - width,
    };
    canvas.image(image, x, top, width, height);
}

fn draw_table_pages(geometry: &PageGeometry, directive: &TableDirective) -> Vec<Canvas> {
    let widths = &directive.column_widths_cm;
    let header = table::layout_row(&directive.header, widths, &directive.header_style);
    let body = table::layout_body(directive);

    let header_allowance = if directive.repeat_header {
        header.height_cm
    } else {
        0.0
    };
    let heights: Vec<f32> = body.iter().map(|row| row.height_cm).collect();
    let ranges = table::paginate(header_allowance, &heights, geometry.content_height_cm());

    let left = geometry.margins.left_cm;
    ranges
        .into_iter()
        .enumerate()
        .map(|(page_index, range)| {
            let mut canvas = Canvas::new(geometry.height_cm);
            let mut y = geometry.margins.top_cm;
            if directive.border_width_pt > 0.0 {
                canvas.hline(
                    left,
                    left + directive.width_cm(),
                    y,
                    directive.border_width_pt,
                    BorderColor::Black,
                );
            }
            if page_index == 0 || directive.repeat_header {
                y += table::draw_row(&mut canvas, &header, widths, left, y, &directive.header_style);
            }
            for row in &body[range] {
                y += table::draw_row(&mut canvas, row, widths, left, y, &directive.body_style);
            }
            canvas
        })
        .collect()
}

fn draw_frame(
    canvas: &mut Canvas,
    frame: &Frame,
    images: &HashMap<PathBuf, Option<PlacedImage>>,
    page: usize,
    total: usize,
) {
    let mut y = frame.top_cm;
    for item in &frame.items {
        match item {
            FrameItem::Paragraph(paragraph) => {
                y += canvas.paragraph(paragraph, frame.left_cm, y, frame.width_cm, page, total);
            }
            FrameItem::Image(directive) => {
                let placed = match &directive.source {
                    ImageSource::Path(path) => images.get(path).and_then(Option::as_ref),
                    ImageSource::Embedded(_) => None,
                };
                match placed {
                    Some(image) => {
                        let height = image.height_for_width(directive.width_cm);
                        canvas.image(image, frame.left_cm, y, directive.width_cm, height);
                        y += height;
                    }
                    None => {
                        if let Some(fallback) = &directive.fallback {
                            y += canvas.paragraph(
                                fallback,
                                frame.left_cm,
                                y,
                                frame.width_cm,
                                page,
                                total,
                            );
                        }
                    }
                }
            }
        }
    }
}

fn draw_footer(
    canvas: &mut Canvas,
    geometry: &PageGeometry,
    footer: &FooterDirective,
    page: usize,
    total: usize,
) {
    let left = geometry.margins.left_cm.max(FOOTER_MIN_SIDE_CM);
    let right = geometry.margins.right_cm.max(FOOTER_MIN_SIDE_CM);
    let width = (geometry.width_cm - left - right).max(0.0);

    for paragraph in &footer.paragraphs {
        let top = geometry.height_cm - FOOTER_DISTANCE_CM - canvas::line_height_cm(paragraph.font_size);
        canvas.paragraph(paragraph, left, top, width, page, total);
    }
}
